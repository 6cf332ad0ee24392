use crate::{
    db::{
        get_conn,
        notification::get::{get_notification_by_id, get_notifications_for_user},
    },
    errors::AppError,
    models::{notification::Notification, redis::RedisKey},
    state::RedisClient,
};
use redis::AsyncCommands;
use uuid::Uuid;

/// Mark one notification read. Only the owner may do so; anyone else gets
/// Not-Found rather than a hint the notification exists.
pub async fn mark_read(
    notification_id: Uuid,
    user_id: Uuid,
    redis: RedisClient,
) -> Result<Notification, AppError> {
    let mut notification = get_notification_by_id(notification_id, redis.clone()).await?;

    if notification.user_id != user_id {
        return Err(AppError::NotFound("Notification not found".into()));
    }

    notification.read = true;
    save(&notification, redis).await?;
    Ok(notification)
}

pub async fn mark_all_read(user_id: Uuid, redis: RedisClient) -> Result<(), AppError> {
    let notifications = get_notifications_for_user(user_id, redis.clone()).await?;

    for mut notification in notifications {
        if !notification.read {
            notification.read = true;
            save(&notification, redis.clone()).await?;
        }
    }

    Ok(())
}

async fn save(notification: &Notification, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = get_conn(&redis).await?;

    let json = serde_json::to_string(notification)
        .map_err(|e| AppError::Serialization(e.to_string()))?;

    let _: () = conn
        .set(RedisKey::notification(notification.id), json)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}
