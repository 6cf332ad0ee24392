use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    db::notification::{
        get::get_notifications_for_user,
        patch::{mark_all_read, mark_read},
    },
    models::notification::Notification,
    state::AppState,
};

#[derive(Serialize)]
pub struct NotificationListResponse {
    pub success: bool,
    pub notifications: Vec<Notification>,
}

#[derive(Serialize)]
pub struct NotificationResponse {
    pub success: bool,
    pub notification: Notification,
}

pub async fn list_notifications_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<NotificationListResponse>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    let notifications = get_notifications_for_user(user_id, state.redis)
        .await
        .map_err(|e| {
            tracing::error!("Error fetching notifications: {}", e);
            e.to_response()
        })?;

    Ok(Json(NotificationListResponse {
        success: true,
        notifications,
    }))
}

pub async fn mark_read_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<NotificationResponse>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    let notification = mark_read(notification_id, user_id, state.redis)
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(NotificationResponse {
        success: true,
        notification,
    }))
}

pub async fn mark_all_read_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    mark_all_read(user_id, state.redis).await.map_err(|e| {
        tracing::error!("Error marking notifications read: {}", e);
        e.to_response()
    })?;

    Ok(Json(serde_json::json!({ "success": true })))
}
