pub mod course;
pub mod notification;
pub mod redis;
pub mod review;
pub mod stats;
pub mod user;

pub use user::User;
