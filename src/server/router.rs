use crate::messages::MessageBoard;
use crate::server::routes;

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderName, Method, StatusCode},
    middleware::{self, Next},
    response::Response,
};
use base64::Engine as _;
use rand::RngCore;
use reqwest::header::HeaderValue;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Routes that reach the data service; their log lines carry the backend in use.
const DATA_ROUTE_PREFIX: &str = "/api/messages";

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Process-wide state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<MessageBoard>,
}

impl AppState {
    pub fn new(board: MessageBoard) -> Self {
        Self {
            board: Arc::new(board),
        }
    }
}

struct AccessLine<'a> {
    status: StatusCode,
    request_id: &'a str,
    method: &'a Method,
    path: &'a str,
    latency_ms: u64,
    /// Set for data routes: `(live, table)`.
    backend: Option<(bool, &'a str)>,
}

impl fmt::Display for AccessLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "| {:>3} | {} | {:^7} | {} | {}ms",
            self.status.as_u16(),
            self.request_id,
            self.method.as_str(),
            self.path,
            self.latency_ms
        )?;
        if let Some((live, table)) = self.backend {
            let backend = if live { "live" } else { "stub" };
            write!(f, " | supabase={backend} table={table}")?;
        }
        Ok(())
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn access_log(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(generate_request_id, str::to_string);

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let path = uri.path();
    let line = AccessLine {
        status: resp.status(),
        request_id: &request_id,
        method: &method,
        path,
        latency_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        backend: path
            .starts_with(DATA_ROUTE_PREFIX)
            .then(|| (state.board.is_configured(), state.board.table())),
    };

    if line.status.is_server_error() {
        error!("{line}");
    } else if line.status.is_client_error() {
        warn!("{line}");
    } else {
        info!("{line}");
    }

    resp
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(state.clone(), access_log))
        .with_state(state)
}
