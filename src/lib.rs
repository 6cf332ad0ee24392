pub mod auth;
mod db;
pub mod errors;
mod http;
mod middleware;
pub mod models;
pub mod notifier;
pub mod ratings;
mod state;

use axum::middleware as axum_middleware;
use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use middleware::{cors_layer, create_global_rate_limiter, rate_limit_middleware};
use notifier::Notifier;
use state::AppState;
use std::net::SocketAddr;

pub async fn start_server() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let redis_url = std::env::var("REDIS_URL").expect("REDIS_URL must be set");
    let manager = RedisConnectionManager::new(redis_url).unwrap();
    let redis_pool = Pool::builder().build(manager).await.unwrap();

    let state = AppState {
        notifier: Notifier::new(redis_pool.clone()),
        redis: redis_pool,
    };

    let global_rate_limiter = create_global_rate_limiter();

    let app = http::create_http_routes(state)
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(global_rate_limiter.clone(), req, next)
        }))
        .layer(cors_layer())
        .fallback(|| async { "404 Not Found" });

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(5000);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("Failed to bind address");

    tracing::info!("CourseHub API listening on port {}", port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
