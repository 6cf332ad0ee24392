pub mod get;
pub mod patch;
pub mod post;

pub use get::get_notifications_for_user;
pub use post::create_notification;
