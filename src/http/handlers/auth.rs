use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{AuthClaims, generate_jwt, verify_password},
    db::user::{get::get_user_by_email, get::get_user_by_id, patch::touch_last_login, post},
    errors::AppError,
    models::user::UserView,
    state::AppState,
};

#[derive(Deserialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

fn validate_registration(payload: &RegisterPayload) -> Result<(), AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".into()));
    }
    if !payload.email.contains('@') {
        return Err(AppError::BadRequest("A valid email is required".into()));
    }
    if payload.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".into(),
        ));
    }
    Ok(())
}

pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    validate_registration(&payload).map_err(|e| e.to_response())?;

    let user = post::register_user(
        payload.name,
        payload.email,
        payload.password,
        state.redis.clone(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Error registering user: {}", e);
        e.to_response()
    })?;

    let token = generate_jwt(&user).map_err(|e| e.to_response())?;

    tracing::info!("User registered: {}", user.email);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    let user = match get_user_by_email(&payload.email, state.redis.clone()).await {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => {
            return Err((StatusCode::UNAUTHORIZED, "Invalid email or password".into()));
        }
        Err(e) => {
            tracing::error!("Error during login: {}", e);
            return Err(e.to_response());
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        return Err((StatusCode::UNAUTHORIZED, "Invalid email or password".into()));
    }

    if let Err(e) = touch_last_login(user.id, state.redis.clone()).await {
        tracing::warn!("Failed to update last login for {}: {}", user.id, e);
    }

    let token = generate_jwt(&user).map_err(|e| e.to_response())?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

pub async fn me_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<UserView>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    let user = get_user_by_id(user_id, state.redis)
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_validation() {
        let ok = RegisterPayload {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "longenough".into(),
        };
        assert!(validate_registration(&ok).is_ok());

        let short_password = RegisterPayload {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "short".into(),
        };
        assert!(validate_registration(&short_password).is_err());

        let bad_email = RegisterPayload {
            name: "Ada".into(),
            email: "nope".into(),
            password: "longenough".into(),
        };
        assert!(validate_registration(&bad_email).is_err());
    }
}
