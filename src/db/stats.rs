use crate::{
    db::{course::get::get_all_courses, get_conn, user::get::get_all_users},
    errors::AppError,
    models::{
        course::CourseStatus,
        redis::RedisKey,
        stats::{DashboardStats, PublicStats, RecentUser},
    },
    state::RedisClient,
};
use std::collections::HashSet;

async fn count_reviews(redis: &RedisClient) -> Result<u64, AppError> {
    let mut conn = get_conn(redis).await?;

    let keys: Vec<String> = redis::cmd("KEYS")
        .arg(RedisKey::review_id_pattern())
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(keys.len() as u64)
}

pub async fn get_dashboard_stats(redis: RedisClient) -> Result<DashboardStats, AppError> {
    let mut courses = get_all_courses(redis.clone()).await?;
    let mut users = get_all_users(redis.clone()).await?;
    let total_reviews = count_reviews(&redis).await?;

    let total_courses = courses.len() as u64;
    let total_users = users.len() as u64;
    let approved_courses = courses
        .iter()
        .filter(|c| c.status == CourseStatus::Approved)
        .count() as u64;
    let pending_courses = courses
        .iter()
        .filter(|c| c.status == CourseStatus::Pending)
        .count() as u64;
    let rejected_courses = courses
        .iter()
        .filter(|c| c.status == CourseStatus::Rejected)
        .count() as u64;

    courses.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
    courses.truncate(5);

    users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    users.truncate(5);
    let recent_users = users
        .into_iter()
        .map(|u| RecentUser {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            created_at: u.created_at,
        })
        .collect();

    Ok(DashboardStats {
        total_courses,
        approved_courses,
        pending_courses,
        rejected_courses,
        total_users,
        total_reviews,
        recent_courses: courses,
        recent_users,
    })
}

pub async fn get_public_stats(redis: RedisClient) -> Result<PublicStats, AppError> {
    let courses = get_all_courses(redis.clone()).await?;
    let total_users = get_all_users(redis.clone()).await?.len() as u64;
    let total_reviews = count_reviews(&redis).await?;

    let approved: Vec<_> = courses
        .iter()
        .filter(|c| c.status == CourseStatus::Approved)
        .collect();

    let rated: Vec<_> = approved
        .iter()
        .filter(|c| c.ratings.average_rating > 0.0)
        .collect();
    let avg_course_rating = if rated.is_empty() {
        0.0
    } else {
        let sum: f64 = rated.iter().map(|c| c.ratings.average_rating).sum();
        ((sum / rated.len() as f64) * 10.0).round() / 10.0
    };

    let providers: HashSet<&str> = approved.iter().map(|c| c.provider.as_str()).collect();
    let instructors: HashSet<&str> = approved.iter().map(|c| c.instructor.as_str()).collect();

    Ok(PublicStats {
        total_courses: courses.len() as u64,
        approved_courses: approved.len() as u64,
        pending_courses: courses
            .iter()
            .filter(|c| c.status == CourseStatus::Pending)
            .count() as u64,
        total_users,
        total_reviews,
        avg_course_rating,
        total_providers: providers.len() as u64,
        total_instructors: instructors.len() as u64,
    })
}
