use bb8::Pool;
use bb8_redis::RedisConnectionManager;

use crate::notifier::Notifier;

#[derive(Clone)]
pub struct AppState {
    pub redis: RedisClient,
    pub notifier: Notifier,
}

pub type RedisClient = Pool<RedisConnectionManager>;
