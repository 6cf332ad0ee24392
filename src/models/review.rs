use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::PublicUser;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub course_id: Uuid,
    pub user_id: Uuid,
    pub rating: f64,
    pub content_quality: f64,
    pub instructor_quality: f64,
    pub value_for_money: f64,
    pub text: String,
    pub pros: String,
    pub cons: String,
    pub helpful_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Review as presented to clients, with the reviewer joined in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub id: Uuid,
    pub rating: f64,
    pub content_quality: f64,
    pub instructor_quality: f64,
    pub value_for_money: f64,
    pub text: String,
    pub pros: String,
    pub cons: String,
    pub helpful_count: u64,
    pub created_at: DateTime<Utc>,
    pub user: PublicUser,
}

impl ReviewView {
    pub fn new(review: Review, user: PublicUser) -> Self {
        Self {
            id: review.id,
            rating: review.rating,
            content_quality: review.content_quality,
            instructor_quality: review.instructor_quality,
            value_for_money: review.value_for_money,
            text: review.text,
            pros: review.pros,
            cons: review.cons,
            helpful_count: review.helpful_count,
            created_at: review.created_at,
            user,
        }
    }
}
