use crate::{
    db::get_conn,
    errors::AppError,
    models::{redis::RedisKey, review::Review},
    state::RedisClient,
};
use redis::AsyncCommands;

pub async fn delete_review(review: &Review, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = get_conn(&redis).await?;

    let _: () = conn
        .del(RedisKey::review(review.course_id, review.user_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    let _: () = conn
        .del(RedisKey::review_id(review.id))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}
