use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::AdminClaims,
    db::{
        course::{
            delete::delete_course,
            get::{get_all_courses, get_courses_by_status},
            patch::set_course_status,
        },
        stats::{get_dashboard_stats, get_public_stats},
        user::get::get_all_users,
    },
    models::{
        course::{Course, CourseStatus},
        stats::{DashboardStats, PublicStats},
        user::UserView,
    },
    state::AppState,
};

#[derive(Deserialize)]
pub struct RejectPayload {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct StatusPayload {
    pub status: CourseStatus,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Serialize)]
pub struct CourseActionResponse {
    pub success: bool,
    pub course: Course,
    pub message: String,
}

pub async fn list_users_handler(
    State(state): State<AppState>,
    _claims: AdminClaims,
) -> Result<Json<Vec<UserView>>, (StatusCode, String)> {
    let mut users = get_all_users(state.redis).await.map_err(|e| {
        tracing::error!("Error listing users: {}", e);
        e.to_response()
    })?;

    users.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

pub async fn pending_courses_handler(
    State(state): State<AppState>,
    _claims: AdminClaims,
) -> Result<Json<Vec<Course>>, (StatusCode, String)> {
    let courses = get_courses_by_status(CourseStatus::Pending, state.redis)
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(courses))
}

pub async fn all_courses_handler(
    State(state): State<AppState>,
    _claims: AdminClaims,
) -> Result<Json<Vec<Course>>, (StatusCode, String)> {
    let mut courses = get_all_courses(state.redis)
        .await
        .map_err(|e| e.to_response())?;

    courses.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(courses))
}

pub async fn approve_course_handler(
    State(state): State<AppState>,
    claims: AdminClaims,
    Path(course_id): Path<Uuid>,
) -> Result<Json<CourseActionResponse>, (StatusCode, String)> {
    apply_status_change(state, claims, course_id, CourseStatus::Approved, None).await
}

pub async fn reject_course_handler(
    State(state): State<AppState>,
    claims: AdminClaims,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<RejectPayload>,
) -> Result<Json<CourseActionResponse>, (StatusCode, String)> {
    apply_status_change(
        state,
        claims,
        course_id,
        CourseStatus::Rejected,
        payload.reason,
    )
    .await
}

pub async fn set_status_handler(
    State(state): State<AppState>,
    claims: AdminClaims,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<StatusPayload>,
) -> Result<Json<CourseActionResponse>, (StatusCode, String)> {
    apply_status_change(state, claims, course_id, payload.status, payload.reason).await
}

async fn apply_status_change(
    state: AppState,
    claims: AdminClaims,
    course_id: Uuid,
    status: CourseStatus,
    reason: Option<String>,
) -> Result<Json<CourseActionResponse>, (StatusCode, String)> {
    let admin_id = claims.user_id()?;

    let course = set_course_status(course_id, status, reason.clone(), state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error updating course {} status: {}", course_id, e);
            e.to_response()
        })?;

    tracing::info!(
        "Course {} set to {:?} by admin {}",
        course_id,
        status,
        admin_id
    );

    if let Err(e) = state
        .notifier
        .course_status_changed(&course, reason.as_deref())
        .await
    {
        tracing::warn!(
            "Failed to notify submitter of course {} status change: {}",
            course_id,
            e
        );
    }

    let status_word = match status {
        CourseStatus::Approved => "approved",
        CourseStatus::Rejected => "rejected",
        CourseStatus::Pending => "pending",
    };

    Ok(Json(CourseActionResponse {
        success: true,
        course,
        message: format!("Course {status_word} successfully"),
    }))
}

pub async fn delete_course_handler(
    State(state): State<AppState>,
    claims: AdminClaims,
    Path(course_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let admin_id = claims.user_id()?;

    delete_course(course_id, state.redis).await.map_err(|e| {
        tracing::error!("Error deleting course {}: {}", course_id, e);
        e.to_response()
    })?;

    tracing::info!("Course {} deleted by admin {}", course_id, admin_id);

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Course deleted successfully"
    })))
}

pub async fn stats_handler(
    State(state): State<AppState>,
    _claims: AdminClaims,
) -> Result<Json<DashboardStats>, (StatusCode, String)> {
    let stats = get_dashboard_stats(state.redis).await.map_err(|e| {
        tracing::error!("Error computing dashboard stats: {}", e);
        e.to_response()
    })?;

    Ok(Json(stats))
}

pub async fn public_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<PublicStats>, (StatusCode, String)> {
    let stats = get_public_stats(state.redis).await.map_err(|e| {
        tracing::error!("Error computing public stats: {}", e);
        e.to_response()
    })?;

    Ok(Json(stats))
}
