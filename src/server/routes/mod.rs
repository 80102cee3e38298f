use crate::server::router::AppState;
use axum::{Router, routing::get};

pub mod estimate;
pub mod health;
pub mod messages;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/estimate", get(estimate::estimate_handler))
        .route(
            "/api/messages",
            get(messages::list_messages_handler).post(messages::post_message_handler),
        )
}
