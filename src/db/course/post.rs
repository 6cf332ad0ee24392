use crate::{
    db::course::put::save_course,
    errors::AppError,
    models::course::{Course, CourseStatus, NewCourse, RatingSummary},
    state::RedisClient,
};
use chrono::Utc;
use uuid::Uuid;

pub async fn create_course(
    payload: NewCourse,
    submitted_by: Uuid,
    status: CourseStatus,
    redis: RedisClient,
) -> Result<Course, AppError> {
    let now = Utc::now();
    let price = payload.normalized_price();
    let thumbnail =
        Course::assign_thumbnail(payload.thumbnail.clone(), &payload.tags, &payload.category);

    let course = Course {
        id: Uuid::new_v4(),
        title: payload.title,
        description: payload.description,
        instructor: payload.instructor,
        provider: payload.provider,
        price,
        currency: payload.currency,
        duration: payload.duration,
        level: payload.level,
        language: payload.language,
        tags: payload.tags,
        category: payload.category,
        skills: payload.skills,
        syllabus: payload.syllabus,
        thumbnail,
        url: payload.url,
        submitted_by,
        status,
        rejection_reason: None,
        ratings: RatingSummary::empty(),
        created_at: now,
        last_updated: now,
    };

    save_course(&course, redis).await?;
    Ok(course)
}
