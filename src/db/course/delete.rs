use crate::{
    db::get_conn,
    errors::AppError,
    models::{redis::RedisKey, review::Review},
    state::RedisClient,
};
use redis::AsyncCommands;
use uuid::Uuid;

/// Delete a course and cascade to its reviews (both the composite keys and
/// the review-id lookups).
pub async fn delete_course(course_id: Uuid, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = get_conn(&redis).await?;

    let course_key = RedisKey::course(course_id);
    let deleted: u64 = conn
        .del(&course_key)
        .await
        .map_err(AppError::RedisCommandError)?;

    if deleted == 0 {
        return Err(AppError::NotFound("Course not found".into()));
    }

    let review_keys: Vec<String> = redis::cmd("KEYS")
        .arg(RedisKey::reviews_for_course_pattern(course_id))
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    for key in review_keys {
        let json: Option<String> = conn.get(&key).await.map_err(AppError::RedisCommandError)?;

        if let Some(json) = json {
            if let Ok(review) = serde_json::from_str::<Review>(&json) {
                let _: () = conn
                    .del(RedisKey::review_id(review.id))
                    .await
                    .map_err(AppError::RedisCommandError)?;
            }
        }

        let _: () = conn.del(&key).await.map_err(AppError::RedisCommandError)?;
    }

    tracing::info!("Deleted course {} and its reviews", course_id);

    Ok(())
}
