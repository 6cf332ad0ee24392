use crate::{
    auth::hash_password,
    db::get_conn,
    errors::AppError,
    models::{
        User,
        redis::RedisKey,
        user::{UserProfile, UserRole},
    },
    state::RedisClient,
};
use chrono::Utc;
use redis::AsyncCommands;
use uuid::Uuid;

pub async fn register_user(
    name: String,
    email: String,
    password: String,
    redis: RedisClient,
) -> Result<User, AppError> {
    let mut conn = get_conn(&redis).await?;

    let email_key = RedisKey::email(&email);
    let existing: Option<String> = conn
        .get(&email_key)
        .await
        .map_err(AppError::RedisCommandError)?;

    if existing.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }

    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        name,
        email: email.trim().to_lowercase(),
        password_hash: hash_password(&password)?,
        role: UserRole::User,
        profile: UserProfile::default(),
        saved_courses: Vec::new(),
        xp: 0,
        badges: Vec::new(),
        created_at: now,
        last_login: now,
    };

    let json =
        serde_json::to_string(&user).map_err(|e| AppError::Serialization(e.to_string()))?;

    let _: () = conn
        .set(RedisKey::user(user.id), json)
        .await
        .map_err(AppError::RedisCommandError)?;

    let _: () = conn
        .set(&email_key, user.id.to_string())
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(user)
}
