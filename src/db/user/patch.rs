use crate::{
    db::{get_conn, user::get::get_user_by_id},
    errors::AppError,
    models::redis::RedisKey,
    state::RedisClient,
};
use chrono::Utc;
use redis::AsyncCommands;
use uuid::Uuid;

pub async fn touch_last_login(user_id: Uuid, redis: RedisClient) -> Result<(), AppError> {
    let mut user = get_user_by_id(user_id, redis.clone()).await?;
    user.last_login = Utc::now();

    let mut conn = get_conn(&redis).await?;
    let json = serde_json::to_string(&user).map_err(|e| AppError::Serialization(e.to_string()))?;

    let _: () = conn
        .set(RedisKey::user(user_id), json)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

/// Toggle a course in the user's saved list. Returns whether the course is
/// saved after the call, plus the full saved list.
pub async fn toggle_saved_course(
    user_id: Uuid,
    course_id: Uuid,
    redis: RedisClient,
) -> Result<(bool, Vec<Uuid>), AppError> {
    let mut user = get_user_by_id(user_id, redis.clone()).await?;

    let saved = if user.saved_courses.contains(&course_id) {
        user.saved_courses.retain(|id| *id != course_id);
        false
    } else {
        user.saved_courses.push(course_id);
        true
    };

    let mut conn = get_conn(&redis).await?;
    let json = serde_json::to_string(&user).map_err(|e| AppError::Serialization(e.to_string()))?;

    let _: () = conn
        .set(RedisKey::user(user_id), json)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok((saved, user.saved_courses))
}
