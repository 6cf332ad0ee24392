use uuid::Uuid;

pub struct RedisKey;

impl RedisKey {
    pub fn user(user_id: Uuid) -> String {
        format!("user:{user_id}")
    }

    pub fn email(email: &str) -> String {
        let email = email.trim().to_lowercase();
        format!("user_email:{email}")
    }

    pub fn user_pattern() -> &'static str {
        "user:*"
    }

    pub fn course(course_id: Uuid) -> String {
        format!("course:{course_id}")
    }

    pub fn course_pattern() -> &'static str {
        "course:*"
    }

    /// One review per (course, user) pair lives behind this composite key.
    pub fn review(course_id: Uuid, user_id: Uuid) -> String {
        format!("review:{course_id}:{user_id}")
    }

    pub fn reviews_for_course_pattern(course_id: Uuid) -> String {
        format!("review:{course_id}:*")
    }

    /// Lookup from a review id to its composite key.
    pub fn review_id(review_id: Uuid) -> String {
        format!("review_id:{review_id}")
    }

    /// One review_id mapping exists per review, so this pattern counts them.
    pub fn review_id_pattern() -> &'static str {
        "review_id:*"
    }

    pub fn notification(notification_id: Uuid) -> String {
        format!("notification:{notification_id}")
    }

    pub fn user_notifications(user_id: Uuid) -> String {
        format!("user:{user_id}:notifications")
    }

    /// Parses `user:{id}`. Returns None for secondary keys such as
    /// `user:{id}:notifications`, so pattern scans can filter on it.
    pub fn extract_user_id(key: &str) -> Option<Uuid> {
        let rest = key.strip_prefix("user:")?;
        if rest.contains(':') {
            return None;
        }
        Uuid::parse_str(rest).ok()
    }

    pub fn extract_course_id(key: &str) -> Option<Uuid> {
        let rest = key.strip_prefix("course:")?;
        if rest.contains(':') {
            return None;
        }
        Uuid::parse_str(rest).ok()
    }
}
