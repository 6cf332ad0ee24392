use axum::{
    Json, Router,
    extract::State,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use crate::{
    http::handlers::{admin, auth, course, notification, review},
    middleware::{create_auth_rate_limiter, rate_limit_middleware},
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    let auth_rate_limiter = create_auth_rate_limiter();

    let auth_routes = Router::new()
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route_layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(auth_rate_limiter.clone(), req, next)
        }))
        .route("/api/auth/me", get(auth::me_handler));

    let course_routes = Router::new()
        .route("/api/courses", get(course::list_courses_handler))
        .route("/api/courses", post(course::create_course_handler))
        .route("/api/courses/search", get(course::search_courses_handler))
        .route("/api/courses/user/saved", get(course::saved_courses_handler))
        .route(
            "/api/courses/user/submitted",
            get(course::submitted_courses_handler),
        )
        .route(
            "/api/courses/user/pending",
            get(course::pending_courses_handler),
        )
        .route("/api/courses/{id}", get(course::get_course_handler))
        .route("/api/courses/{id}/save", post(course::save_course_handler))
        .route(
            "/api/courses/{id}/reviews",
            post(review::submit_review_handler),
        )
        .route("/api/reviews/{id}", put(review::update_review_handler))
        .route("/api/reviews/{id}", delete(review::delete_review_handler));

    let admin_routes = Router::new()
        .route("/api/admin/users", get(admin::list_users_handler))
        .route(
            "/api/admin/pending-courses",
            get(admin::pending_courses_handler),
        )
        .route("/api/admin/all-courses", get(admin::all_courses_handler))
        .route(
            "/api/admin/courses/{id}/approve",
            post(admin::approve_course_handler),
        )
        .route(
            "/api/admin/courses/{id}/reject",
            post(admin::reject_course_handler),
        )
        .route(
            "/api/admin/courses/{id}/status",
            put(admin::set_status_handler),
        )
        .route("/api/admin/courses/{id}", delete(admin::delete_course_handler))
        .route("/api/admin/stats", get(admin::stats_handler))
        .route("/api/admin/public-stats", get(admin::public_stats_handler));

    let notification_routes = Router::new()
        .route(
            "/api/notifications",
            get(notification::list_notifications_handler),
        )
        .route(
            "/api/notifications/read-all",
            post(notification::mark_all_read_handler),
        )
        .route(
            "/api/notifications/{id}/read",
            post(notification::mark_read_handler),
        );

    Router::new()
        .route("/health", get(health_handler))
        .merge(auth_routes)
        .merge(course_routes)
        .merge(admin_routes)
        .merge(notification_routes)
        .with_state(state)
}

async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let redis_status = match state.redis.get().await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    Json(serde_json::json!({
        "status": "OK",
        "timestamp": chrono::Utc::now(),
        "redis": redis_status,
    }))
}
