pub mod admin;
pub mod auth;
pub mod course;
pub mod notification;
pub mod review;
