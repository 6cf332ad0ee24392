pub mod course;
pub mod notification;
pub mod review;
pub mod stats;
pub mod user;

use bb8::PooledConnection;
use bb8_redis::RedisConnectionManager;

use crate::{errors::AppError, state::RedisClient};

/// Check a connection out of the pool, mapping pool failures onto AppError.
pub(crate) async fn get_conn(
    redis: &RedisClient,
) -> Result<PooledConnection<'_, RedisConnectionManager>, AppError> {
    redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })
}
