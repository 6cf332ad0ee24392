use crate::{
    db::get_conn,
    errors::AppError,
    models::{notification::Notification, redis::RedisKey},
    state::RedisClient,
};
use redis::AsyncCommands;

// Keep only the most recent notifications per user.
const FEED_CAP: isize = 50;

pub async fn create_notification(
    notification: &Notification,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = get_conn(&redis).await?;

    let json = serde_json::to_string(notification)
        .map_err(|e| AppError::Serialization(e.to_string()))?;

    let _: () = conn
        .set(RedisKey::notification(notification.id), json)
        .await
        .map_err(AppError::RedisCommandError)?;

    let feed_key = RedisKey::user_notifications(notification.user_id);

    let _: () = conn
        .lpush(&feed_key, notification.id.to_string())
        .await
        .map_err(AppError::RedisCommandError)?;

    let _: () = conn
        .ltrim(&feed_key, 0, FEED_CAP - 1)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}
