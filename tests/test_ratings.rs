use chrono::Utc;
use coursehub_be::models::course::{Course, CourseLevel, CourseStatus, RatingSummary};
use coursehub_be::models::review::Review;
use coursehub_be::ratings::summarize;
use uuid::Uuid;

fn review_for(course_id: Uuid, user_id: Uuid, rating: f64) -> Review {
    Review {
        id: Uuid::new_v4(),
        course_id,
        user_id,
        rating,
        content_quality: rating,
        instructor_quality: rating,
        value_for_money: rating,
        text: String::new(),
        pros: String::new(),
        cons: String::new(),
        helpful_count: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn reviews(ratings: &[f64]) -> Vec<Review> {
    let course_id = Uuid::new_v4();
    ratings
        .iter()
        .map(|r| review_for(course_id, Uuid::new_v4(), *r))
        .collect()
}

fn course_with_status(status: CourseStatus) -> Course {
    Course {
        id: Uuid::new_v4(),
        title: "Rust 101".into(),
        description: String::new(),
        instructor: "Ferris".into(),
        provider: "Udemy".into(),
        price: 0.0,
        currency: "USD".into(),
        duration: "5 hours".into(),
        level: CourseLevel::Beginner,
        language: "English".into(),
        tags: vec![],
        category: "Programming".into(),
        skills: vec![],
        syllabus: vec![],
        thumbnail: String::new(),
        url: None,
        submitted_by: Uuid::new_v4(),
        status,
        rejection_reason: None,
        ratings: RatingSummary::empty(),
        created_at: Utc::now(),
        last_updated: Utc::now(),
    }
}

#[test]
fn test_recomputation_is_deterministic() {
    let set = reviews(&[5.0, 3.5, 4.0, 2.0]);

    let first = summarize(&set);
    let second = summarize(&set);

    // Identical in everything but the timestamp.
    assert_eq!(first.average_rating, second.average_rating);
    assert_eq!(first.total_reviews, second.total_reviews);
    assert_eq!(first.average_content_quality, second.average_content_quality);
    assert_eq!(
        first.average_instructor_quality,
        second.average_instructor_quality
    );
    assert_eq!(first.average_value_for_money, second.average_value_for_money);
    assert_eq!(first.rating_distribution, second.rating_distribution);
}

#[test]
fn test_empty_review_set_zeroes_summary() {
    let summary = summarize(&[]);

    assert_eq!(summary.total_reviews, 0);
    assert_eq!(summary.average_rating, 0.0);
    assert_eq!(summary.average_content_quality, 0.0);
    assert_eq!(summary.average_instructor_quality, 0.0);
    assert_eq!(summary.average_value_for_money, 0.0);
    for star in 1..=5 {
        assert_eq!(summary.rating_distribution.count(star), 0);
    }
}

#[test]
fn test_distribution_counts_sum_to_total() {
    for ratings in [
        vec![5.0],
        vec![1.0, 1.0, 1.0],
        vec![1.5, 2.5, 3.5, 4.5, 5.0, 2.2, 3.8],
    ] {
        let summary = summarize(&reviews(&ratings));
        assert_eq!(summary.rating_distribution.total(), summary.total_reviews);
        assert_eq!(summary.total_reviews, ratings.len() as u64);
    }
}

#[test]
fn test_averages_stay_within_bounds() {
    for ratings in [vec![1.0], vec![5.0; 20], vec![1.0, 5.0, 2.5, 3.7, 4.9]] {
        let summary = summarize(&reviews(&ratings));
        for avg in [
            summary.average_rating,
            summary.average_content_quality,
            summary.average_instructor_quality,
            summary.average_value_for_money,
        ] {
            assert!((0.0..=5.0).contains(&avg), "average {avg} out of bounds");
        }
    }
}

#[test]
fn test_deleting_last_review_matches_empty_state() {
    let set = reviews(&[4.0]);
    let with_review = summarize(&set);
    assert_eq!(with_review.total_reviews, 1);

    // The store no longer holds the review; recomputation sees an empty set.
    let after_delete = summarize(&[]);
    let fresh = summarize(&[]);

    assert_eq!(after_delete.average_rating, fresh.average_rating);
    assert_eq!(after_delete.total_reviews, fresh.total_reviews);
    assert_eq!(after_delete.rating_distribution, fresh.rating_distribution);
}

// Overall ratings [5, 5, 4, 3, 5]: average 4.4, counts {5:3, 4:1, 3:1}.
#[test]
fn test_known_review_set_summary() {
    let summary = summarize(&reviews(&[5.0, 5.0, 4.0, 3.0, 5.0]));

    assert_eq!(summary.average_rating, 4.4);
    assert_eq!(summary.total_reviews, 5);
    assert_eq!(summary.rating_distribution.count(5), 3);
    assert_eq!(summary.rating_distribution.count(4), 1);
    assert_eq!(summary.rating_distribution.count(3), 1);
    assert_eq!(summary.rating_distribution.count(2), 0);
    assert_eq!(summary.rating_distribution.count(1), 0);
}

// Half-up policy: 3.5 tallies into bucket 4.
#[test]
fn test_half_rating_buckets_upward() {
    let summary = summarize(&reviews(&[3.5]));

    assert_eq!(summary.rating_distribution.count(4), 1);
    assert_eq!(summary.rating_distribution.count(3), 0);
}

// Editing a review from 5 to 2: count unchanged, average shifts down,
// bucket 5 loses one and bucket 2 gains one.
#[test]
fn test_edited_review_moves_buckets() {
    let course_id = Uuid::new_v4();
    let reviewer = Uuid::new_v4();
    let mut set = vec![
        review_for(course_id, reviewer, 5.0),
        review_for(course_id, Uuid::new_v4(), 4.0),
    ];

    let before = summarize(&set);
    assert_eq!(before.average_rating, 4.5);
    assert_eq!(before.rating_distribution.count(5), 1);
    assert_eq!(before.rating_distribution.count(2), 0);

    set[0].rating = 2.0;
    let after = summarize(&set);

    assert_eq!(after.total_reviews, before.total_reviews);
    assert!(after.average_rating < before.average_rating);
    assert_eq!(after.average_rating, 3.0);
    assert_eq!(after.rating_distribution.count(5), 0);
    assert_eq!(after.rating_distribution.count(2), 1);
}

// A second submission for the same (course, user) pair loses the first-write
// claim on the composite key; the summary keeps reflecting the first review.
#[test]
fn test_duplicate_review_is_rejected_and_not_counted() {
    use std::collections::HashMap;
    use std::collections::hash_map::Entry;

    let course_id = Uuid::new_v4();
    let reviewer = Uuid::new_v4();
    let mut store: HashMap<(Uuid, Uuid), Review> = HashMap::new();

    // The store claims the composite key once; a held key rejects the write.
    let mut submit = |review: Review| match store.entry((review.course_id, review.user_id)) {
        Entry::Occupied(_) => Err("You have already reviewed this course"),
        Entry::Vacant(slot) => {
            slot.insert(review);
            Ok(())
        }
    };

    assert!(submit(review_for(course_id, reviewer, 5.0)).is_ok());
    assert_eq!(
        submit(review_for(course_id, reviewer, 1.0)),
        Err("You have already reviewed this course")
    );

    let stored: Vec<Review> = store.into_values().collect();
    let summary = summarize(&stored);
    assert_eq!(summary.total_reviews, 1);
    assert_eq!(summary.average_rating, 5.0);
    assert_eq!(summary.rating_distribution.count(5), 1);
    assert_eq!(summary.rating_distribution.count(1), 0);
}

// A recompute that started while the course was pending must not revert an
// approval that lands before the summary write: the summary is applied onto
// the freshest document and only the rating fields change.
#[test]
fn test_summary_write_preserves_concurrent_status_change() {
    let summary = summarize(&reviews(&[5.0, 4.0]));

    let mut course = course_with_status(CourseStatus::Pending);
    // The admin approval that landed mid-recompute.
    course.status = CourseStatus::Approved;

    course.apply_ratings(summary.clone());

    assert_eq!(course.status, CourseStatus::Approved);
    assert_eq!(course.ratings.average_rating, summary.average_rating);
    assert_eq!(course.ratings.total_reviews, 2);
    assert_eq!(course.last_updated, summary.last_updated);
}

// Two recomputations racing over different snapshots: whichever lands last
// leaves the summary equal to a fresh recomputation of its own snapshot.
// The race is tolerated, not prevented.
#[test]
fn test_concurrent_recomputation_is_last_write_wins() {
    let course_id = Uuid::new_v4();
    let first_snapshot = vec![review_for(course_id, Uuid::new_v4(), 5.0)];
    let mut second_snapshot = first_snapshot.clone();
    second_snapshot.push(review_for(course_id, Uuid::new_v4(), 3.0));

    let early = summarize(&first_snapshot);
    let late = summarize(&second_snapshot);

    // Simulate the late writer overwriting the early one's output.
    let stored = late.clone();

    let fresh = summarize(&second_snapshot);
    assert_eq!(stored.average_rating, fresh.average_rating);
    assert_eq!(stored.total_reviews, fresh.total_reviews);
    assert_eq!(stored.rating_distribution, fresh.rating_distribution);

    // The early output is simply superseded.
    assert_ne!(early.total_reviews, stored.total_reviews);
}
