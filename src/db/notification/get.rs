use crate::{
    db::get_conn,
    errors::AppError,
    models::{notification::Notification, redis::RedisKey},
    state::RedisClient,
};
use redis::AsyncCommands;
use uuid::Uuid;

/// The user's feed, newest first (LPUSH order already gives that).
pub async fn get_notifications_for_user(
    user_id: Uuid,
    redis: RedisClient,
) -> Result<Vec<Notification>, AppError> {
    let mut conn = get_conn(&redis).await?;

    let ids: Vec<String> = conn
        .lrange(RedisKey::user_notifications(user_id), 0, -1)
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut notifications = Vec::with_capacity(ids.len());

    for id in ids {
        let Ok(notification_id) = Uuid::parse_str(&id) else {
            continue;
        };

        let json: Option<String> = conn
            .get(RedisKey::notification(notification_id))
            .await
            .map_err(AppError::RedisCommandError)?;

        if let Some(json) = json {
            let notification: Notification = serde_json::from_str(&json)
                .map_err(|e| AppError::Deserialization(e.to_string()))?;
            notifications.push(notification);
        }
    }

    Ok(notifications)
}

pub async fn get_notification_by_id(
    notification_id: Uuid,
    redis: RedisClient,
) -> Result<Notification, AppError> {
    let mut conn = get_conn(&redis).await?;

    let json: Option<String> = conn
        .get(RedisKey::notification(notification_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    let json = json.ok_or_else(|| AppError::NotFound("Notification not found".into()))?;
    serde_json::from_str(&json).map_err(|e| AppError::Deserialization(e.to_string()))
}
