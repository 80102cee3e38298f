use reqwest::StatusCode;
use thiserror::Error as ThisError;
use vconsult_schema::PostgrestErrorBody;

#[derive(Debug, ThisError)]
pub enum SupabaseError {
    /// Returned by every terminal operation of the stub client.
    #[error("Supabase not configured")]
    NotConfigured,

    #[error("Invalid Supabase endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("Supabase endpoint cannot be a base URL: {0}")]
    EndpointNotBase(String),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PostgREST error with status {status}: {}", .body.summary())]
    Postgrest {
        status: StatusCode,
        body: PostgrestErrorBody,
    },

    #[error("Upstream error with status {status}: {body}")]
    UpstreamStatus { status: StatusCode, body: String },
}

impl SupabaseError {
    pub fn is_not_configured(&self) -> bool {
        matches!(self, SupabaseError::NotConfigured)
    }

    /// HTTP status reported by the data service, if the failure came from a response.
    pub fn upstream_status(&self) -> Option<StatusCode> {
        match self {
            SupabaseError::Postgrest { status, .. } | SupabaseError::UpstreamStatus { status, .. } => {
                Some(*status)
            }
            SupabaseError::Reqwest(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_configured_message_is_stable() {
        assert_eq!(
            SupabaseError::NotConfigured.to_string(),
            "Supabase not configured"
        );
        assert!(SupabaseError::NotConfigured.is_not_configured());
    }

    #[test]
    fn postgrest_display_uses_body_summary() {
        let err = SupabaseError::Postgrest {
            status: StatusCode::NOT_FOUND,
            body: PostgrestErrorBody {
                code: Some("42P01".to_string()),
                message: Some("relation does not exist".to_string()),
                ..Default::default()
            },
        };

        assert_eq!(
            err.to_string(),
            "PostgREST error with status 404 Not Found: relation does not exist"
        );
        assert_eq!(err.upstream_status(), Some(StatusCode::NOT_FOUND));
        assert!(!err.is_not_configured());
    }
}
