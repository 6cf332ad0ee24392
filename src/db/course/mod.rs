pub mod delete;
pub mod get;
pub mod patch;
pub mod post;
pub mod put;

pub use get::get_course_by_id;
pub use post::create_course;
