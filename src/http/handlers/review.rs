use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    db::{
        course::get::get_course_by_id,
        review::{
            delete::delete_review, get::get_course_review_views, get::get_review_by_id,
            post::create_review, put::update_review,
        },
    },
    errors::AppError,
    models::{
        course::Course,
        notification::{NotificationData, NotificationKind},
        review::{Review, ReviewView},
        user::UserRole,
    },
    ratings::recompute_ratings,
    state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewPayload {
    pub rating: f64,
    pub content_quality: f64,
    pub instructor_quality: f64,
    pub value_for_money: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub pros: String,
    #[serde(default)]
    pub cons: String,
}

impl SubmitReviewPayload {
    /// Ratings are validated into [1,5] here, at the boundary; the
    /// aggregator may assume stored values are in range.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_dimensions(&[
            ("rating", self.rating),
            ("contentQuality", self.content_quality),
            ("instructorQuality", self.instructor_quality),
            ("valueForMoney", self.value_for_money),
        ])
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewPayload {
    pub rating: Option<f64>,
    pub content_quality: Option<f64>,
    pub instructor_quality: Option<f64>,
    pub value_for_money: Option<f64>,
    pub text: Option<String>,
    pub pros: Option<String>,
    pub cons: Option<String>,
}

impl UpdateReviewPayload {
    pub fn validate(&self) -> Result<(), AppError> {
        let provided: Vec<(&str, f64)> = [
            ("rating", self.rating),
            ("contentQuality", self.content_quality),
            ("instructorQuality", self.instructor_quality),
            ("valueForMoney", self.value_for_money),
        ]
        .into_iter()
        .filter_map(|(name, v)| v.map(|v| (name, v)))
        .collect();

        validate_dimensions(&provided)
    }
}

fn validate_dimensions(dimensions: &[(&str, f64)]) -> Result<(), AppError> {
    for (name, value) in dimensions {
        if !value.is_finite() || !(1.0..=5.0).contains(value) {
            return Err(AppError::BadRequest(format!(
                "{name} must be between 1 and 5"
            )));
        }
    }
    Ok(())
}

/// Result shape shared by all three review mutations: the mutation outcome,
/// the course's refreshed review list, and the course with its recomputed
/// summary.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewMutationResponse {
    pub success: bool,
    pub reviews: Vec<ReviewView>,
    pub course: Course,
}

async fn build_response(
    course: Course,
    state: &AppState,
) -> Result<ReviewMutationResponse, AppError> {
    let reviews = get_course_review_views(course.id, state.redis.clone()).await?;
    Ok(ReviewMutationResponse {
        success: true,
        reviews,
        course,
    })
}

pub async fn submit_review_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<SubmitReviewPayload>,
) -> Result<Json<ReviewMutationResponse>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    payload.validate().map_err(|e| e.to_response())?;

    let course = get_course_by_id(course_id, state.redis.clone())
        .await
        .map_err(|e| e.to_response())?;

    let now = Utc::now();
    let review = Review {
        id: Uuid::new_v4(),
        course_id,
        user_id,
        rating: payload.rating,
        content_quality: payload.content_quality,
        instructor_quality: payload.instructor_quality,
        value_for_money: payload.value_for_money,
        text: payload.text,
        pros: payload.pros,
        cons: payload.cons,
        helpful_count: 0,
        created_at: now,
        updated_at: now,
    };

    create_review(&review, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error submitting review: {}", e);
            e.to_response()
        })?;

    // The review is committed; a summary refresh failure must surface
    // rather than hand back a stale summary as fresh.
    let course_updated = recompute_ratings(course_id, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!(
                "Review {} committed but summary refresh failed: {}",
                review.id,
                e
            );
            e.to_response()
        })?;

    if course.submitted_by != user_id {
        if let Err(e) = state
            .notifier
            .notify_user(
                course.submitted_by,
                NotificationKind::NewReview,
                "New Review",
                format!("Your course \"{}\" received a new review", course.title),
                NotificationData {
                    course_id: Some(course.id),
                    user_id: Some(user_id),
                    review_id: Some(review.id),
                },
            )
            .await
        {
            tracing::warn!("Failed to notify submitter of new review: {}", e);
        }
    }

    let response = build_response(course_updated, &state)
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(response))
}

pub async fn update_review_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(review_id): Path<Uuid>,
    Json(payload): Json<UpdateReviewPayload>,
) -> Result<Json<ReviewMutationResponse>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    payload.validate().map_err(|e| e.to_response())?;

    let mut review = get_review_by_id(review_id, state.redis.clone())
        .await
        .map_err(|e| e.to_response())?;

    if review.user_id != user_id {
        return Err(
            AppError::NotFound("Review not found or unauthorized".into()).to_response(),
        );
    }

    if let Some(rating) = payload.rating {
        review.rating = rating;
    }
    if let Some(content_quality) = payload.content_quality {
        review.content_quality = content_quality;
    }
    if let Some(instructor_quality) = payload.instructor_quality {
        review.instructor_quality = instructor_quality;
    }
    if let Some(value_for_money) = payload.value_for_money {
        review.value_for_money = value_for_money;
    }
    if let Some(text) = payload.text {
        review.text = text;
    }
    if let Some(pros) = payload.pros {
        review.pros = pros;
    }
    if let Some(cons) = payload.cons {
        review.cons = cons;
    }
    review.updated_at = Utc::now();

    update_review(&review, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error updating review {}: {}", review_id, e);
            e.to_response()
        })?;

    // Count is unchanged but averages and distribution may have shifted.
    let course_updated = recompute_ratings(review.course_id, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!(
                "Review {} updated but summary refresh failed: {}",
                review_id,
                e
            );
            e.to_response()
        })?;

    let response = build_response(course_updated, &state)
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(response))
}

pub async fn delete_review_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(review_id): Path<Uuid>,
) -> Result<Json<ReviewMutationResponse>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    let review = get_review_by_id(review_id, state.redis.clone())
        .await
        .map_err(|e| e.to_response())?;

    // Owners delete their own reviews; admins may moderate any.
    if review.user_id != user_id && claims.0.role != UserRole::Admin {
        return Err(
            AppError::NotFound("Review not found or unauthorized".into()).to_response(),
        );
    }

    delete_review(&review, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error deleting review {}: {}", review_id, e);
            e.to_response()
        })?;

    let course_updated = recompute_ratings(review.course_id, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!(
                "Review {} deleted but summary refresh failed: {}",
                review_id,
                e
            );
            e.to_response()
        })?;

    let response = build_response(course_updated, &state)
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_payload_rejects_out_of_range_ratings() {
        let mut payload = SubmitReviewPayload {
            rating: 4.5,
            content_quality: 3.0,
            instructor_quality: 5.0,
            value_for_money: 1.0,
            text: String::new(),
            pros: String::new(),
            cons: String::new(),
        };
        assert!(payload.validate().is_ok());

        payload.rating = 5.1;
        assert!(payload.validate().is_err());

        payload.rating = 0.0;
        assert!(payload.validate().is_err());

        payload.rating = f64::NAN;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn update_payload_validates_only_provided_fields() {
        let partial = UpdateReviewPayload {
            rating: Some(2.0),
            content_quality: None,
            instructor_quality: None,
            value_for_money: None,
            text: Some("revised".into()),
            pros: None,
            cons: None,
        };
        assert!(partial.validate().is_ok());

        let bad = UpdateReviewPayload {
            rating: Some(6.0),
            content_quality: None,
            instructor_quality: None,
            value_for_money: None,
            text: None,
            pros: None,
            cons: None,
        };
        assert!(bad.validate().is_err());
    }
}
