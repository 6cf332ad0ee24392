use crate::{
    db::get_conn,
    errors::AppError,
    models::{
        course::{Course, CourseLevel, CourseStatus},
        redis::RedisKey,
    },
    state::RedisClient,
};
use redis::AsyncCommands;
use serde::Deserialize;
use uuid::Uuid;

const LISTING_CAP: usize = 50;

pub async fn get_course_by_id(course_id: Uuid, redis: RedisClient) -> Result<Course, AppError> {
    let mut conn = get_conn(&redis).await?;

    let key = RedisKey::course(course_id);
    let json: Option<String> = conn.get(&key).await.map_err(AppError::RedisCommandError)?;

    let json = json.ok_or_else(|| AppError::NotFound("Course not found".into()))?;
    serde_json::from_str(&json).map_err(|e| AppError::Deserialization(e.to_string()))
}

pub async fn get_all_courses(redis: RedisClient) -> Result<Vec<Course>, AppError> {
    let mut conn = get_conn(&redis).await?;

    let course_keys: Vec<String> = redis::cmd("KEYS")
        .arg(RedisKey::course_pattern())
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut courses = Vec::new();

    for key in course_keys {
        if let Some(course_id) = RedisKey::extract_course_id(&key) {
            if let Ok(course) = get_course_by_id(course_id, redis.clone()).await {
                courses.push(course);
            }
        }
    }

    Ok(courses)
}

/// Approved courses, best-rated first, capped at 50.
pub async fn list_approved_courses(redis: RedisClient) -> Result<Vec<Course>, AppError> {
    let mut courses = get_all_courses(redis).await?;
    courses.retain(|c| c.status == CourseStatus::Approved);
    sort_by_rating(&mut courses);
    courses.truncate(LISTING_CAP);
    Ok(courses)
}

pub async fn search_courses(
    filters: &CourseFilters,
    redis: RedisClient,
) -> Result<Vec<Course>, AppError> {
    let mut courses = get_all_courses(redis).await?;
    courses.retain(|c| c.status == CourseStatus::Approved && filters.matches(c));
    sort_by_rating(&mut courses);
    courses.truncate(LISTING_CAP);
    Ok(courses)
}

pub async fn get_courses_by_status(
    status: CourseStatus,
    redis: RedisClient,
) -> Result<Vec<Course>, AppError> {
    let mut courses = get_all_courses(redis).await?;
    courses.retain(|c| c.status == status);
    courses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(courses)
}

pub async fn get_courses_by_submitter(
    user_id: Uuid,
    status: Option<CourseStatus>,
    redis: RedisClient,
) -> Result<Vec<Course>, AppError> {
    let mut courses = get_all_courses(redis).await?;
    courses.retain(|c| c.submitted_by == user_id && status.is_none_or(|s| c.status == s));
    courses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(courses)
}

/// Resolve a saved-courses id list, silently skipping ids whose course has
/// since been deleted.
pub async fn get_courses_by_ids(
    course_ids: &[Uuid],
    redis: RedisClient,
) -> Result<Vec<Course>, AppError> {
    let mut courses = Vec::new();
    for course_id in course_ids {
        match get_course_by_id(*course_id, redis.clone()).await {
            Ok(course) => courses.push(course),
            Err(AppError::NotFound(_)) => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(courses)
}

// Rating desc, then review count desc as the tiebreaker.
fn sort_by_rating(courses: &mut [Course]) {
    courses.sort_by(|a, b| {
        let rating_cmp = b
            .ratings
            .average_rating
            .partial_cmp(&a.ratings.average_rating)
            .unwrap_or(std::cmp::Ordering::Equal);
        if rating_cmp == std::cmp::Ordering::Equal {
            b.ratings.total_reviews.cmp(&a.ratings.total_reviews)
        } else {
            rating_cmp
        }
    });
}

#[derive(Debug, Default, Deserialize)]
pub struct CourseFilters {
    pub q: Option<String>,
    pub provider: Option<String>,
    pub level: Option<CourseLevel>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Comma-separated; a course matches if it carries any of them.
    pub tags: Option<String>,
}

impl CourseFilters {
    pub fn matches(&self, course: &Course) -> bool {
        if let Some(q) = &self.q {
            let q = q.to_lowercase();
            let hit = course.title.to_lowercase().contains(&q)
                || course.description.to_lowercase().contains(&q)
                || course.tags.iter().any(|t| t.to_lowercase().contains(&q));
            if !hit {
                return false;
            }
        }
        if let Some(provider) = &self.provider {
            if !course.provider.eq_ignore_ascii_case(provider) {
                return false;
            }
        }
        if let Some(level) = self.level {
            if course.level != level {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !course.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if course.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if course.price > max {
                return false;
            }
        }
        if let Some(tags) = &self.tags {
            let wanted: Vec<String> = tags
                .split(',')
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect();
            if !wanted.is_empty()
                && !course
                    .tags
                    .iter()
                    .any(|t| wanted.contains(&t.to_lowercase()))
            {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::course::RatingSummary;
    use chrono::Utc;

    fn course(title: &str, provider: &str, price: f64, tags: &[&str]) -> Course {
        Course {
            id: Uuid::new_v4(),
            title: title.into(),
            description: "A course".into(),
            instructor: "Someone".into(),
            provider: provider.into(),
            price,
            currency: "USD".into(),
            duration: "10 hours".into(),
            level: CourseLevel::Beginner,
            language: "English".into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category: "General".into(),
            skills: vec![],
            syllabus: vec![],
            thumbnail: String::new(),
            url: None,
            submitted_by: Uuid::new_v4(),
            status: CourseStatus::Approved,
            rejection_reason: None,
            ratings: RatingSummary::empty(),
            created_at: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn text_query_matches_title_and_tags() {
        let c = course("Rust in Action", "Manning", 30.0, &["Systems"]);
        let by_title = CourseFilters {
            q: Some("rust".into()),
            ..Default::default()
        };
        let by_tag = CourseFilters {
            q: Some("systems".into()),
            ..Default::default()
        };
        let miss = CourseFilters {
            q: Some("haskell".into()),
            ..Default::default()
        };
        assert!(by_title.matches(&c));
        assert!(by_tag.matches(&c));
        assert!(!miss.matches(&c));
    }

    #[test]
    fn price_range_is_inclusive() {
        let c = course("X", "Udemy", 50.0, &[]);
        let exact = CourseFilters {
            min_price: Some(50.0),
            max_price: Some(50.0),
            ..Default::default()
        };
        let below = CourseFilters {
            max_price: Some(49.99),
            ..Default::default()
        };
        assert!(exact.matches(&c));
        assert!(!below.matches(&c));
    }

    #[test]
    fn tags_filter_matches_any() {
        let c = course("X", "Udemy", 10.0, &["Python", "AI"]);
        let filters = CourseFilters {
            tags: Some("ml, ai".into()),
            ..Default::default()
        };
        assert!(filters.matches(&c));
    }

    #[test]
    fn sorting_prefers_rating_then_review_count() {
        let mut a = course("A", "X", 0.0, &[]);
        a.ratings.average_rating = 4.5;
        a.ratings.total_reviews = 10;
        let mut b = course("B", "X", 0.0, &[]);
        b.ratings.average_rating = 4.5;
        b.ratings.total_reviews = 50;
        let mut c = course("C", "X", 0.0, &[]);
        c.ratings.average_rating = 4.9;
        c.ratings.total_reviews = 1;

        let mut all = vec![a, b, c];
        sort_by_rating(&mut all);
        let titles: Vec<&str> = all.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "B", "A"]);
    }
}
