use crate::error::AppError;
use crate::server::router::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::debug;
use vconsult_schema::Message;

#[derive(Debug, Deserialize)]
pub struct PostMessageBody {
    pub text: String,
}

pub(super) async fn list_messages_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = state.board.recent().await?;
    debug!(count = messages.len(), "Listed messages");
    Ok(Json(messages))
}

pub(super) async fn post_message_handler(
    State(state): State<AppState>,
    body: Result<Json<PostMessageBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<Message>>), AppError> {
    let Json(body) = body.map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;
    let inserted = state.board.post(&body.text).await?;
    Ok((StatusCode::CREATED, Json(inserted)))
}
