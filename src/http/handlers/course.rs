use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    db::{
        course::get::{
            CourseFilters, get_course_by_id, get_courses_by_ids, get_courses_by_submitter,
            list_approved_courses, search_courses,
        },
        course::post::create_course,
        review::get::get_course_review_views,
        user::{get::get_user_by_id, patch::toggle_saved_course},
    },
    errors::AppError,
    models::{
        course::{Course, CourseStatus, NewCourse},
        notification::{NotificationData, NotificationKind},
        review::ReviewView,
        user::{PublicUser, UserRole},
    },
    state::AppState,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub course: Course,
    pub submitter: Option<PublicUser>,
    pub reviews: Vec<ReviewView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCourseResponse {
    pub success: bool,
    pub saved: bool,
    pub saved_courses: Vec<Uuid>,
}

pub async fn list_courses_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Course>>, (StatusCode, String)> {
    let courses = list_approved_courses(state.redis).await.map_err(|e| {
        tracing::error!("Error listing courses: {}", e);
        e.to_response()
    })?;

    Ok(Json(courses))
}

pub async fn search_courses_handler(
    State(state): State<AppState>,
    Query(filters): Query<CourseFilters>,
) -> Result<Json<Vec<Course>>, (StatusCode, String)> {
    let courses = search_courses(&filters, state.redis).await.map_err(|e| {
        tracing::error!("Error searching courses: {}", e);
        e.to_response()
    })?;

    Ok(Json(courses))
}

pub async fn get_course_handler(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<CourseDetail>, (StatusCode, String)> {
    let course = get_course_by_id(course_id, state.redis.clone())
        .await
        .map_err(|e| e.to_response())?;

    let submitter = match get_user_by_id(course.submitted_by, state.redis.clone()).await {
        Ok(user) => Some(PublicUser::from(&user)),
        Err(AppError::NotFound(_)) => None,
        Err(e) => return Err(e.to_response()),
    };

    let reviews = get_course_review_views(course_id, state.redis)
        .await
        .map_err(|e| {
            tracing::error!("Error fetching reviews for course {}: {}", course_id, e);
            e.to_response()
        })?;

    Ok(Json(CourseDetail {
        course,
        submitter,
        reviews,
    }))
}

pub async fn create_course_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(payload): Json<NewCourse>,
) -> Result<Json<Course>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    payload
        .validate()
        .map_err(|msg| AppError::BadRequest(msg).to_response())?;

    // Admin submissions skip moderation.
    let is_admin = claims.0.role == UserRole::Admin;
    let status = if is_admin {
        CourseStatus::Approved
    } else {
        CourseStatus::Pending
    };

    let course = create_course(payload, user_id, status, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error submitting course: {}", e);
            e.to_response()
        })?;

    tracing::info!("Course submitted: {} ({:?})", course.title, course.status);

    if !is_admin {
        let submitter_name = get_user_by_id(user_id, state.redis.clone())
            .await
            .map(|u| u.name)
            .unwrap_or_else(|_| "A user".into());

        if let Err(e) = state
            .notifier
            .notify_admins(
                NotificationKind::CoursePending,
                "New Course Pending Review",
                &format!(
                    "{} submitted a new course: \"{}\"",
                    submitter_name, course.title
                ),
                NotificationData {
                    course_id: Some(course.id),
                    user_id: Some(user_id),
                    review_id: None,
                },
            )
            .await
        {
            tracing::warn!("Failed to notify admins about course {}: {}", course.id, e);
        }
    }

    Ok(Json(course))
}

pub async fn save_course_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(course_id): Path<Uuid>,
) -> Result<Json<SaveCourseResponse>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    // The course must exist before it can be favorited.
    get_course_by_id(course_id, state.redis.clone())
        .await
        .map_err(|e| e.to_response())?;

    let (saved, saved_courses) = toggle_saved_course(user_id, course_id, state.redis)
        .await
        .map_err(|e| {
            tracing::error!("Error toggling saved course: {}", e);
            e.to_response()
        })?;

    Ok(Json(SaveCourseResponse {
        success: true,
        saved,
        saved_courses,
    }))
}

pub async fn saved_courses_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<Vec<Course>>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    let user = get_user_by_id(user_id, state.redis.clone())
        .await
        .map_err(|e| e.to_response())?;

    let courses = get_courses_by_ids(&user.saved_courses, state.redis)
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(courses))
}

pub async fn submitted_courses_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<Vec<Course>>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    let courses = get_courses_by_submitter(user_id, None, state.redis)
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(courses))
}

pub async fn pending_courses_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<Vec<Course>>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    let courses = get_courses_by_submitter(user_id, Some(CourseStatus::Pending), state.redis)
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(courses))
}
