use crate::{
    db::{get_conn, user::get::get_user_by_id},
    errors::AppError,
    models::{
        redis::RedisKey,
        review::{Review, ReviewView},
        user::PublicUser,
    },
    state::RedisClient,
};
use redis::AsyncCommands;
use uuid::Uuid;

const REVIEW_CAP: usize = 50;

/// All reviews for a course, unordered. The aggregator consumes this as-is;
/// presentation ordering happens in `get_course_review_views`.
pub async fn get_reviews_for_course(
    course_id: Uuid,
    redis: RedisClient,
) -> Result<Vec<Review>, AppError> {
    let mut conn = get_conn(&redis).await?;

    let review_keys: Vec<String> = redis::cmd("KEYS")
        .arg(RedisKey::reviews_for_course_pattern(course_id))
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut reviews = Vec::new();

    for key in review_keys {
        let json: Option<String> = conn.get(&key).await.map_err(AppError::RedisCommandError)?;

        if let Some(json) = json {
            let review: Review = serde_json::from_str(&json)
                .map_err(|e| AppError::Deserialization(e.to_string()))?;
            reviews.push(review);
        }
    }

    Ok(reviews)
}

pub async fn get_review_by_id(review_id: Uuid, redis: RedisClient) -> Result<Review, AppError> {
    let mut conn = get_conn(&redis).await?;

    let composite: Option<String> = conn
        .get(RedisKey::review_id(review_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    let composite = composite.ok_or_else(|| AppError::NotFound("Review not found".into()))?;

    let json: Option<String> = conn
        .get(format!("review:{composite}"))
        .await
        .map_err(AppError::RedisCommandError)?;

    let json = json.ok_or_else(|| AppError::NotFound("Review not found".into()))?;
    serde_json::from_str(&json).map_err(|e| AppError::Deserialization(e.to_string()))
}

/// Reviews joined with their reviewers for the HTTP layer: newest first,
/// capped at 50. Reviews whose author has been deleted keep a placeholder
/// rather than dropping the review.
pub async fn get_course_review_views(
    course_id: Uuid,
    redis: RedisClient,
) -> Result<Vec<ReviewView>, AppError> {
    let mut reviews = get_reviews_for_course(course_id, redis.clone()).await?;
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    reviews.truncate(REVIEW_CAP);

    let mut views = Vec::with_capacity(reviews.len());

    for review in reviews {
        let user = match get_user_by_id(review.user_id, redis.clone()).await {
            Ok(user) => PublicUser::from(&user),
            Err(AppError::NotFound(_)) => PublicUser {
                id: review.user_id,
                name: "Deleted user".into(),
                email: String::new(),
            },
            Err(e) => return Err(e),
        };
        views.push(ReviewView::new(review, user));
    }

    Ok(views)
}
