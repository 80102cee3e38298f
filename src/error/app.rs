use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error as ThisError;

use super::{MessageError, SupabaseError};

#[derive(Debug, ThisError)]
pub enum AppError {
    #[error(transparent)]
    Message(#[from] MessageError),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl From<SupabaseError> for AppError {
    fn from(e: SupabaseError) -> Self {
        AppError::Message(MessageError::Supabase(e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            AppError::Message(MessageError::EmptyText) => (
                StatusCode::BAD_REQUEST,
                ApiErrorObject {
                    code: "EMPTY_MESSAGE".to_string(),
                    message: "Message text must not be empty.".to_string(),
                    details: None,
                },
            ),

            AppError::InvalidQuantity(reason) => (
                StatusCode::BAD_REQUEST,
                ApiErrorObject {
                    code: "INVALID_QUANTITY".to_string(),
                    message: "Quantity must be a non-negative whole number.".to_string(),
                    details: Some(Value::String(reason)),
                },
            ),

            AppError::InvalidBody(reason) => (
                StatusCode::BAD_REQUEST,
                ApiErrorObject {
                    code: "INVALID_REQUEST".to_string(),
                    message: "Request body is not valid.".to_string(),
                    details: Some(Value::String(reason)),
                },
            ),

            AppError::Message(MessageError::Supabase(SupabaseError::NotConfigured)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiErrorObject {
                    code: "NOT_CONFIGURED".to_string(),
                    message: SupabaseError::NotConfigured.to_string(),
                    details: None,
                },
            ),

            AppError::Message(MessageError::Supabase(
                SupabaseError::InvalidEndpoint(_) | SupabaseError::EndpointNotBase(_),
            )) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorObject {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                    details: None,
                },
            ),

            AppError::Message(MessageError::Supabase(
                SupabaseError::Reqwest(_)
                | SupabaseError::Json(_)
                | SupabaseError::Postgrest { .. }
                | SupabaseError::UpstreamStatus { .. },
            )) => (
                StatusCode::BAD_GATEWAY,
                ApiErrorObject {
                    code: "UPSTREAM_ERROR".to_string(),
                    message: "Upstream data service error.".to_string(),
                    details: None,
                },
            ),
        };
        (status, Json(ApiErrorBody { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorObject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_configured_maps_to_service_unavailable() {
        let resp = AppError::from(SupabaseError::NotConfigured).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn empty_message_maps_to_bad_request() {
        let resp = AppError::from(MessageError::EmptyText).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failures_map_to_bad_gateway() {
        let err = SupabaseError::UpstreamStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        let resp = AppError::from(err).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }
}
