use crate::{
    db::get_conn,
    errors::AppError,
    models::{redis::RedisKey, review::Review},
    state::RedisClient,
};
use redis::AsyncCommands;

/// Persist a new review. The composite key carries the (course, user)
/// uniqueness constraint and the store enforces it: the document is written
/// with SET NX, so of two racing first-time submissions exactly one claims
/// the key and the other reports the duplicate. The id mapping is written
/// only after a successful claim, so a rejected create leaves nothing
/// behind.
pub async fn create_review(review: &Review, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = get_conn(&redis).await?;

    let json =
        serde_json::to_string(review).map_err(|e| AppError::Serialization(e.to_string()))?;

    let reply: Option<String> = redis::cmd("SET")
        .arg(RedisKey::review(review.course_id, review.user_id))
        .arg(json)
        .arg("NX")
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    claim_outcome(reply)?;

    let _: () = conn
        .set(
            RedisKey::review_id(review.id),
            format!("{}:{}", review.course_id, review.user_id),
        )
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

/// SET NX replies OK when the key was claimed and nil when it already held
/// a review for this (course, user) pair.
fn claim_outcome(reply: Option<String>) -> Result<(), AppError> {
    match reply {
        Some(_) => Ok(()),
        None => Err(AppError::BadRequest(
            "You have already reviewed this course".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claimed_key_accepts_the_review() {
        assert!(claim_outcome(Some("OK".into())).is_ok());
    }

    #[test]
    fn held_key_reports_duplicate_review() {
        let err = claim_outcome(None).unwrap_err();
        match err {
            AppError::BadRequest(msg) => {
                assert_eq!(msg, "You have already reviewed this course");
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }
}
