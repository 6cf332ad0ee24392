use crate::{
    db::get_conn,
    errors::AppError,
    models::{redis::RedisKey, review::Review},
    state::RedisClient,
};
use redis::AsyncCommands;

/// Overwrite an existing review document in place.
pub async fn update_review(review: &Review, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = get_conn(&redis).await?;

    let json =
        serde_json::to_string(review).map_err(|e| AppError::Serialization(e.to_string()))?;

    let _: () = conn
        .set(RedisKey::review(review.course_id, review.user_id), json)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}
