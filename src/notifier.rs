use uuid::Uuid;

use crate::{
    db::{notification::post::create_notification, user::get::get_admin_users},
    errors::AppError,
    models::{
        course::{Course, CourseStatus},
        notification::{Notification, NotificationData, NotificationKind},
    },
    state::RedisClient,
};

/// Notification fan-out collaborator, carried on `AppState` and passed to
/// handlers explicitly. Delivery is best-effort: callers log failures and
/// never fail the owning request over them.
#[derive(Clone)]
pub struct Notifier {
    redis: RedisClient,
}

impl Notifier {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }

    pub async fn notify_user(
        &self,
        user_id: Uuid,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        data: NotificationData,
    ) -> Result<Notification, AppError> {
        let notification = Notification::new(user_id, kind, title, message, data);
        create_notification(&notification, self.redis.clone()).await?;
        Ok(notification)
    }

    pub async fn notify_admins(
        &self,
        kind: NotificationKind,
        title: &str,
        message: &str,
        data: NotificationData,
    ) -> Result<(), AppError> {
        let admins = get_admin_users(self.redis.clone()).await?;
        let admin_count = admins.len();

        for admin in admins {
            self.notify_user(admin.id, kind, title, message, data.clone())
                .await?;
        }

        tracing::info!("Notified {} admin(s): {}", admin_count, title);
        Ok(())
    }

    /// Tell the submitter their course changed status.
    pub async fn course_status_changed(
        &self,
        course: &Course,
        reason: Option<&str>,
    ) -> Result<(), AppError> {
        let (kind, title, message) = match course.status {
            CourseStatus::Approved => (
                NotificationKind::CourseApproved,
                "Course Approved",
                format!(
                    "Your course \"{}\" has been approved and is now live on CourseHub!",
                    course.title
                ),
            ),
            CourseStatus::Rejected => (
                NotificationKind::CourseRejected,
                "Course Rejected",
                match reason {
                    Some(reason) if !reason.is_empty() => format!(
                        "Your course \"{}\" has been rejected. Reason: {}",
                        course.title, reason
                    ),
                    _ => format!(
                        "Your course \"{}\" has been rejected. Please review the guidelines and resubmit.",
                        course.title
                    ),
                },
            ),
            CourseStatus::Pending => (
                NotificationKind::CoursePending,
                "Course Status Updated",
                format!(
                    "Your course \"{}\" status has been updated to pending review.",
                    course.title
                ),
            ),
        };

        self.notify_user(
            course.submitted_by,
            kind,
            title,
            message,
            NotificationData::course(course.id),
        )
        .await?;

        Ok(())
    }
}
