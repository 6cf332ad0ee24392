use crate::{
    db::course::{get::get_course_by_id, put::save_course},
    errors::AppError,
    models::course::{Course, CourseStatus},
    state::RedisClient,
};
use chrono::Utc;
use uuid::Uuid;

pub async fn set_course_status(
    course_id: Uuid,
    status: CourseStatus,
    reason: Option<String>,
    redis: RedisClient,
) -> Result<Course, AppError> {
    let mut course = get_course_by_id(course_id, redis.clone()).await?;

    course.status = status;
    course.rejection_reason = match status {
        CourseStatus::Rejected => reason,
        _ => None,
    };
    course.last_updated = Utc::now();

    save_course(&course, redis).await?;
    Ok(course)
}
