use crate::{
    db::get_conn,
    errors::AppError,
    models::course::{Course, RatingSummary},
    models::redis::RedisKey,
    state::RedisClient,
};
use redis::AsyncCommands;
use uuid::Uuid;

/// Overwrite the whole course document in one SET. Used by writers that own
/// the full document (create, status changes); the rating summary goes
/// through `save_course_ratings` instead.
pub async fn save_course(course: &Course, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = get_conn(&redis).await?;

    let json =
        serde_json::to_string(course).map_err(|e| AppError::Serialization(e.to_string()))?;

    let _: () = conn
        .set(RedisKey::course(course.id), json)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

/// Persist a recomputed rating summary without touching the rest of the
/// document. The course is re-read under WATCH and only the summary fields
/// are replaced, so a status change landing mid-recompute is never reverted
/// by a stale snapshot; if the document moves while watched, the EXEC
/// aborts and the write retries against the fresh copy. Racing summary
/// writers still resolve as last-write-wins among themselves.
pub async fn save_course_ratings(
    course_id: Uuid,
    ratings: &RatingSummary,
    redis: RedisClient,
) -> Result<Course, AppError> {
    let mut conn = get_conn(&redis).await?;
    let key = RedisKey::course(course_id);

    loop {
        let _: () = redis::cmd("WATCH")
            .arg(&key)
            .query_async(&mut *conn)
            .await
            .map_err(AppError::RedisCommandError)?;

        let json: Option<String> = conn.get(&key).await.map_err(AppError::RedisCommandError)?;

        let Some(json) = json else {
            let _: () = redis::cmd("UNWATCH")
                .query_async(&mut *conn)
                .await
                .map_err(AppError::RedisCommandError)?;
            return Err(AppError::NotFound("Course not found".into()));
        };

        let mut course: Course =
            serde_json::from_str(&json).map_err(|e| AppError::Deserialization(e.to_string()))?;
        course.apply_ratings(ratings.clone());

        let updated =
            serde_json::to_string(&course).map_err(|e| AppError::Serialization(e.to_string()))?;

        let committed: Option<()> = redis::pipe()
            .atomic()
            .set(&key, updated)
            .ignore()
            .query_async(&mut *conn)
            .await
            .map_err(AppError::RedisCommandError)?;

        if committed.is_some() {
            return Ok(course);
        }
        // The document moved under the watch; read again and reapply.
    }
}
