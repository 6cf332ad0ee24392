use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{course::Course, user::UserRole};

/// Admin dashboard numbers plus recent activity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_courses: u64,
    pub approved_courses: u64,
    pub pending_courses: u64,
    pub rejected_courses: u64,
    pub total_users: u64,
    pub total_reviews: u64,
    pub recent_courses: Vec<Course>,
    pub recent_users: Vec<RecentUser>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Subset exposed without authentication.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStats {
    pub total_courses: u64,
    pub approved_courses: u64,
    pub pending_courses: u64,
    pub total_users: u64,
    pub total_reviews: u64,
    pub avg_course_rating: f64,
    pub total_providers: u64,
    pub total_instructors: u64,
}
