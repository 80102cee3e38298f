//! Drives the live client against a throwaway local server speaking the
//! subset of PostgREST the messages board relies on.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use vconsult::config::{SupabaseCredentials, SupabaseSettings};
use vconsult::supabase::build_http_client;
use vconsult::{MessageBoard, MessageError, SupabaseClient, SupabaseError};

const ANON_KEY: &str = "eyJhbGciOiJIUzI1NiJ9.eyJyb2xlIjoiYW5vbiJ9.sig";

#[derive(Clone, Default)]
struct FakeDb {
    rows: Arc<Mutex<Vec<Value>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok());
    apikey == Some(ANON_KEY) && bearer.is_some_and(|b| b == format!("Bearer {ANON_KEY}"))
}

fn jwt_error() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"code":"PGRST301","message":"JWT invalid","details":null,"hint":null})),
    )
        .into_response()
}

async fn list_rows(
    State(db): State<FakeDb>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return jwt_error();
    }

    let mut rows = db.rows.lock().expect("rows lock").clone();
    if params.get("order").map(String::as_str) == Some("id.desc") {
        rows.sort_by_key(|r| std::cmp::Reverse(r["id"].as_i64().unwrap_or_default()));
    }
    if let Some(limit) = params.get("limit").and_then(|l| l.parse::<usize>().ok()) {
        rows.truncate(limit);
    }
    Json(rows).into_response()
}

async fn insert_rows(
    State(db): State<FakeDb>,
    headers: HeaderMap,
    Json(payload): Json<Vec<Value>>,
) -> Response {
    if !authorized(&headers) {
        return jwt_error();
    }
    if headers.get("prefer").and_then(|v| v.to_str().ok()) != Some("return=representation") {
        return StatusCode::NO_CONTENT.into_response();
    }

    let mut rows = db.rows.lock().expect("rows lock");
    let mut inserted = Vec::new();
    for item in payload {
        let id = i64::try_from(rows.len()).expect("row count") + 1;
        let row = json!({ "id": id, "text": item["text"] });
        rows.push(row.clone());
        inserted.push(row);
    }
    (StatusCode::CREATED, Json(inserted)).into_response()
}

async fn broken_table() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
}

async fn spawn_fake_postgrest() -> SocketAddr {
    let app = Router::new()
        .route("/rest/v1/messages", get(list_rows).post(insert_rows))
        .route("/rest/v1/broken", get(broken_table))
        .with_state(FakeDb::default());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake postgrest");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake postgrest");
    });
    addr
}

fn live_client(addr: SocketAddr, token: &str) -> SupabaseClient {
    let http = build_http_client(&SupabaseSettings::default()).expect("http client");
    SupabaseClient::new(
        Some(SupabaseCredentials {
            endpoint: format!("http://{addr}"),
            token: token.to_string(),
        }),
        http,
    )
}

#[tokio::test]
async fn board_posts_then_lists_newest_first_within_limit() {
    let addr = spawn_fake_postgrest().await;
    let board = MessageBoard::new(live_client(addr, ANON_KEY), "messages", 2);

    assert!(board.recent().await.expect("empty list").is_empty());

    for text in ["first", "second", "third"] {
        let inserted = board.post(text).await.expect("insert");
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].text, text);
    }

    let recent = board.recent().await.expect("list");
    let texts: Vec<&str> = recent.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["third", "second"]);
    assert_eq!(recent[0].id, 3);
}

#[tokio::test]
async fn wrong_key_surfaces_structured_postgrest_error() {
    let addr = spawn_fake_postgrest().await;
    let client = live_client(addr, "eyJwrong.key.value");

    let err = client
        .from("messages")
        .select("*")
        .execute::<Value>()
        .await
        .expect_err("unauthorized");
    assert_eq!(err.upstream_status(), Some(StatusCode::UNAUTHORIZED));

    match err {
        SupabaseError::Postgrest { status, body } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body.code.as_deref(), Some("PGRST301"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unstructured_failure_keeps_body_preview() {
    let addr = spawn_fake_postgrest().await;
    let board = MessageBoard::new(live_client(addr, ANON_KEY), "broken", 10);

    let err = board.recent().await.expect_err("server error");
    let MessageError::Supabase(inner) = &err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(inner.upstream_status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    match err {
        MessageError::Supabase(SupabaseError::UpstreamStatus { status, body }) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn raw_insert_returns_stored_rows_with_server_ids() {
    let addr = spawn_fake_postgrest().await;
    let client = live_client(addr, ANON_KEY);

    let rows: Vec<Value> = client
        .from("messages")
        .insert(&[json!({"text": "x"}), json!({"text": "y"})])
        .await
        .expect("insert");
    assert_eq!(rows, vec![json!({"id": 1, "text": "x"}), json!({"id": 2, "text": "y"})]);
}
