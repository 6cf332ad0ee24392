pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub use get::{get_review_by_id, get_reviews_for_course};
pub use post::create_review;
