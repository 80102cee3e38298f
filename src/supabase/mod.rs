//! Data client facade over the hosted Supabase REST API.
//!
//! [`SupabaseClient`] is either backed by a live PostgREST transport or is a
//! stub when no credentials were resolved; callers use the same chained
//! surface either way and the stub reports [`SupabaseError::NotConfigured`]
//! from every terminal operation.

mod api;
mod query;

pub use api::PostgrestApi;
pub use query::{OrderBy, QueryBuilder, SelectQuery};

use crate::config::{SupabaseCredentials, SupabaseSettings};
use crate::error::SupabaseError;
use reqwest::header::{CONNECTION, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::info;

pub const SUPABASE_USER_AGENT: &str = concat!("vconsult/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub enum SupabaseClient {
    Live(PostgrestApi),
    Stub,
}

impl SupabaseClient {
    /// Live client when credentials are present, stub otherwise. Sends nothing.
    pub fn new(credentials: Option<SupabaseCredentials>, http: reqwest::Client) -> Self {
        match credentials {
            Some(credentials) => {
                info!("[supabase] Using live PostgREST client");
                SupabaseClient::Live(PostgrestApi::new(credentials, http))
            }
            None => {
                info!("[supabase] Using stub client; queries will report not configured");
                SupabaseClient::Stub
            }
        }
    }

    pub fn stub() -> Self {
        SupabaseClient::Stub
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, SupabaseClient::Live(_))
    }

    pub fn from(&self, table: &str) -> QueryBuilder<'_> {
        QueryBuilder::new(self, table)
    }
}

/// Shared reqwest client for the data service.
pub fn build_http_client(settings: &SupabaseSettings) -> Result<reqwest::Client, SupabaseError> {
    let mut headers = HeaderMap::new();

    let mut builder = reqwest::Client::builder()
        .user_agent(SUPABASE_USER_AGENT)
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(settings.timeout_secs));

    if let Some(proxy_url) = settings.proxy.as_ref() {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
    }

    if settings.enable_multiplexing {
        builder = builder.http2_adaptive_window(true);
    } else {
        headers.insert(CONNECTION, HeaderValue::from_static("close"));
        builder = builder.http1_only();
    }

    Ok(builder.default_headers(headers).build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use vconsult_schema::NewMessage;

    fn assert_not_configured<T: std::fmt::Debug>(res: Result<Vec<T>, SupabaseError>) {
        let err = res.expect_err("stub must fail");
        assert!(err.is_not_configured());
        assert_eq!(err.to_string(), "Supabase not configured");
    }

    #[test]
    fn new_without_credentials_builds_stub() {
        let client = SupabaseClient::new(None, reqwest::Client::new());
        assert!(!client.is_configured());
    }

    #[test]
    fn new_with_credentials_builds_live_without_validating_endpoint() {
        let client = SupabaseClient::new(
            Some(SupabaseCredentials {
                endpoint: "definitely not a url".to_string(),
                token: "t".to_string(),
            }),
            reqwest::Client::new(),
        );
        assert!(client.is_configured());
    }

    #[tokio::test]
    async fn stub_select_chain_reports_not_configured() {
        let client = SupabaseClient::stub();
        let res = client
            .from("messages")
            .select("*")
            .order("id", false)
            .limit(10)
            .execute::<Value>()
            .await;
        assert_not_configured(res);
    }

    #[tokio::test]
    async fn stub_is_uniform_across_tables_and_chains() {
        let client = SupabaseClient::stub();

        assert_not_configured(client.from("").execute::<Value>().await);
        assert_not_configured(
            client
                .from("anything-at-all")
                .limit(1)
                .limit(2)
                .order("a", true)
                .select("x")
                .order("b", false)
                .execute::<Value>()
                .await,
        );

        let mut builder = client.from("deep");
        for i in 0..100 {
            builder = builder.select("*").order("id", i % 2 == 0).limit(i);
        }
        assert_not_configured(builder.execute::<Value>().await);
    }

    #[tokio::test]
    async fn stub_insert_reports_not_configured() {
        let client = SupabaseClient::stub();
        let res = client
            .from("messages")
            .insert::<_, Value>(&[NewMessage::new("x")])
            .await;
        assert_not_configured(res);
    }

    #[tokio::test]
    async fn live_client_surfaces_bad_endpoint_on_first_use() {
        let client = SupabaseClient::new(
            Some(SupabaseCredentials {
                endpoint: "not a url".to_string(),
                token: "t".to_string(),
            }),
            reqwest::Client::new(),
        );

        let err = client
            .from("messages")
            .execute::<Value>()
            .await
            .expect_err("bad endpoint");
        assert!(matches!(err, SupabaseError::InvalidEndpoint(_)));
    }

    #[test]
    fn build_http_client_accepts_defaults_and_proxy() {
        let mut settings = SupabaseSettings::default();
        assert!(build_http_client(&settings).is_ok());

        settings.proxy = Some("http://127.0.0.1:1080".parse().expect("proxy url"));
        settings.enable_multiplexing = true;
        assert!(build_http_client(&settings).is_ok());
    }
}
