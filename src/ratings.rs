//! Rating aggregation: keeps a course's denormalized rating summary in sync
//! with its review set.
//!
//! Policy, applied uniformly: dimension averages are rounded to one decimal,
//! distribution buckets hold raw counts of the overall rating rounded to the
//! nearest star. Both use half-up rounding (`f64::round` is half-away-from-
//! zero, which is half-up on this non-negative domain), so 3.5 tallies into
//! bucket 4 and the buckets always sum to the review count.

use uuid::Uuid;

use crate::{
    db,
    errors::AppError,
    models::course::{Course, RatingDistribution, RatingSummary},
    models::review::Review,
    state::RedisClient,
};

/// Round to one decimal place, half-up.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Bucket an overall rating into its star (1..=5). Stored values are
/// validated into [1,5] on the way in, so anything outside that range is a
/// data-quality problem: clamp into range and warn rather than panic.
fn star_bucket(rating: f64) -> u8 {
    let rounded = rating.round();
    if !(1.0..=5.0).contains(&rounded) {
        tracing::warn!("Out-of-range overall rating {} clamped for bucketing", rating);
    }
    rounded.clamp(1.0, 5.0) as u8
}

/// Compute a course's summary from its current review set. Deterministic in
/// everything but the `last_updated` stamp; an empty set resets all averages
/// and buckets to zero.
pub fn summarize(reviews: &[Review]) -> RatingSummary {
    if reviews.is_empty() {
        return RatingSummary::empty();
    }

    let count = reviews.len() as f64;
    let mut total_rating = 0.0;
    let mut total_content = 0.0;
    let mut total_instructor = 0.0;
    let mut total_value = 0.0;
    let mut distribution = RatingDistribution::default();

    for review in reviews {
        total_rating += review.rating;
        total_content += review.content_quality;
        total_instructor += review.instructor_quality;
        total_value += review.value_for_money;
        distribution.add(star_bucket(review.rating));
    }

    RatingSummary {
        average_rating: round_one_decimal(total_rating / count),
        total_reviews: reviews.len() as u64,
        average_content_quality: round_one_decimal(total_content / count),
        average_instructor_quality: round_one_decimal(total_instructor / count),
        average_value_for_money: round_one_decimal(total_value / count),
        rating_distribution: distribution,
        last_updated: chrono::Utc::now(),
    }
}

/// Recompute and persist a course's rating summary from its current reviews.
///
/// Called after every review create, update, and delete. Reads are not
/// serialized against concurrent recomputations; the summary lands through
/// `save_course_ratings`, which replaces only the rating fields on the
/// freshest document, so the last summary writer wins without reverting
/// concurrent non-summary changes. Never mutates reviews.
pub async fn recompute_ratings(course_id: Uuid, redis: RedisClient) -> Result<Course, AppError> {
    let reviews = db::review::get::get_reviews_for_course(course_id, redis.clone()).await?;
    let summary = summarize(&reviews);

    let course = db::course::put::save_course_ratings(course_id, &summary, redis).await?;

    tracing::info!(
        "Recomputed ratings for course {}: average {} over {} reviews",
        course_id,
        course.ratings.average_rating,
        course.ratings.total_reviews
    );

    Ok(course)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn review(rating: f64) -> Review {
        review_full(rating, rating, rating, rating)
    }

    fn review_full(rating: f64, content: f64, instructor: f64, value: f64) -> Review {
        Review {
            id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            rating,
            content_quality: content,
            instructor_quality: instructor,
            value_for_money: value,
            text: String::new(),
            pros: String::new(),
            cons: String::new(),
            helpful_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_set_resets_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_reviews, 0);
        assert_eq!(summary.average_rating, 0.0);
        assert_eq!(summary.average_content_quality, 0.0);
        assert_eq!(summary.average_instructor_quality, 0.0);
        assert_eq!(summary.average_value_for_money, 0.0);
        assert_eq!(summary.rating_distribution.total(), 0);
    }

    #[test]
    fn averages_round_to_one_decimal_half_up() {
        // (4 + 4 + 5) / 3 = 4.333... -> 4.3
        let summary = summarize(&[review(4.0), review(4.0), review(5.0)]);
        assert_eq!(summary.average_rating, 4.3);

        // (4 + 4.5 + 4.4) / 3 = 4.2999...; the quotient itself rounds to 4.3
        let summary = summarize(&[review(4.0), review(4.5), review(4.4)]);
        assert_eq!(summary.average_rating, 4.3);

        // 4.25 -> 4.3 (half-up, not banker's)
        let summary = summarize(&[review(4.0), review(4.5)]);
        assert_eq!(summary.average_rating, 4.3);
    }

    #[test]
    fn dimensions_average_independently() {
        let summary = summarize(&[
            review_full(5.0, 4.0, 3.0, 2.0),
            review_full(3.0, 2.0, 5.0, 4.0),
        ]);
        assert_eq!(summary.average_rating, 4.0);
        assert_eq!(summary.average_content_quality, 3.0);
        assert_eq!(summary.average_instructor_quality, 4.0);
        assert_eq!(summary.average_value_for_money, 3.0);
    }

    #[test]
    fn half_ratings_bucket_half_up() {
        assert_eq!(star_bucket(3.5), 4);
        assert_eq!(star_bucket(1.5), 2);
        assert_eq!(star_bucket(4.4), 4);
        assert_eq!(star_bucket(4.6), 5);
    }

    #[test]
    fn out_of_range_ratings_are_clamped_not_fatal() {
        assert_eq!(star_bucket(7.0), 5);
        assert_eq!(star_bucket(0.2), 1);
        assert_eq!(star_bucket(-3.0), 1);

        // An over-range stored value still lands in a bucket and keeps the
        // sum invariant intact.
        let summary = summarize(&[review(7.0), review(4.0)]);
        assert_eq!(summary.total_reviews, 2);
        assert_eq!(summary.rating_distribution.total(), 2);
        assert_eq!(summary.rating_distribution.count(5), 1);
        assert_eq!(summary.rating_distribution.count(4), 1);
    }

    #[test]
    fn buckets_sum_to_total_reviews() {
        let reviews: Vec<Review> = [1.0, 2.5, 3.0, 3.5, 4.9, 5.0, 2.0, 4.2]
            .into_iter()
            .map(review)
            .collect();
        let summary = summarize(&reviews);
        assert_eq!(summary.rating_distribution.total(), summary.total_reviews);
    }

    #[test]
    fn averages_stay_in_bounds() {
        for ratings in [vec![1.0], vec![5.0], vec![1.0, 5.0, 3.3, 2.7]] {
            let reviews: Vec<Review> = ratings.into_iter().map(review).collect();
            let summary = summarize(&reviews);
            assert!((0.0..=5.0).contains(&summary.average_rating));
            assert!((0.0..=5.0).contains(&summary.average_content_quality));
        }
    }
}
