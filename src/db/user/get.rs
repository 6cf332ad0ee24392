use crate::{
    db::get_conn,
    errors::AppError,
    models::{User, redis::RedisKey, user::UserRole},
    state::RedisClient,
};
use redis::AsyncCommands;
use uuid::Uuid;

pub async fn get_user_by_id(user_id: Uuid, redis: RedisClient) -> Result<User, AppError> {
    let mut conn = get_conn(&redis).await?;

    let key = RedisKey::user(user_id);
    let json: Option<String> = conn.get(&key).await.map_err(AppError::RedisCommandError)?;

    let json = json.ok_or_else(|| AppError::NotFound("User not found".into()))?;
    serde_json::from_str(&json).map_err(|e| AppError::Deserialization(e.to_string()))
}

pub async fn get_user_by_email(email: &str, redis: RedisClient) -> Result<User, AppError> {
    let mut conn = get_conn(&redis).await?;

    let email_key = RedisKey::email(email);
    let user_id: Option<String> = conn
        .get(&email_key)
        .await
        .map_err(AppError::RedisCommandError)?;

    let user_id = user_id.ok_or_else(|| AppError::NotFound("User not found".into()))?;
    let user_id = Uuid::parse_str(&user_id)
        .map_err(|e| AppError::Deserialization(format!("Invalid UUID from email lookup: {e}")))?;

    get_user_by_id(user_id, redis.clone()).await
}

pub async fn get_all_users(redis: RedisClient) -> Result<Vec<User>, AppError> {
    let mut conn = get_conn(&redis).await?;

    let user_keys: Vec<String> = redis::cmd("KEYS")
        .arg(RedisKey::user_pattern())
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut users = Vec::new();

    for key in user_keys {
        // The pattern also matches per-user notification lists; the id
        // parse filters those out.
        if let Some(user_id) = RedisKey::extract_user_id(&key) {
            if let Ok(user) = get_user_by_id(user_id, redis.clone()).await {
                users.push(user);
            }
        }
    }

    Ok(users)
}

pub async fn get_admin_users(redis: RedisClient) -> Result<Vec<User>, AppError> {
    let users = get_all_users(redis).await?;
    Ok(users
        .into_iter()
        .filter(|u| u.role == UserRole::Admin)
        .collect())
}
