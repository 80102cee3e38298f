use crate::config::SupabaseCredentials;
use crate::error::SupabaseError;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use vconsult_schema::PostgrestErrorBody;

use super::query::SelectQuery;

/// Max characters of an unparsable upstream body kept in errors and logs.
pub(crate) const UPSTREAM_BODY_PREVIEW_CHARS: usize = 512;

const APIKEY_HEADER: &str = "apikey";
const PREFER_HEADER: &str = "Prefer";

/// PostgREST transport as hosted Supabase exposes it under `/rest/v1`.
#[derive(Debug, Clone)]
pub struct PostgrestApi {
    http: reqwest::Client,
    credentials: SupabaseCredentials,
}

impl PostgrestApi {
    pub fn new(credentials: SupabaseCredentials, http: reqwest::Client) -> Self {
        Self { http, credentials }
    }

    /// `{endpoint}/rest/v1/{table}`. The endpoint is only parsed here, on first use.
    pub fn table_url(&self, table: &str) -> Result<Url, SupabaseError> {
        let mut url = Url::parse(&self.credentials.endpoint)?;
        url.path_segments_mut()
            .map_err(|()| SupabaseError::EndpointNotBase(self.credentials.endpoint.clone()))?
            .pop_if_empty()
            .extend(["rest", "v1", table]);
        Ok(url)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(APIKEY_HEADER, self.credentials.token.as_str())
            .header(AUTHORIZATION, format!("Bearer {}", self.credentials.token))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
    }

    pub fn build_select_request(
        &self,
        query: &SelectQuery,
    ) -> Result<reqwest::Request, SupabaseError> {
        let url = self.table_url(&query.table)?;
        let req = self
            .authorized(self.http.get(url))
            .query(&query.params())
            .build()?;
        Ok(req)
    }

    pub fn build_insert_request<R>(
        &self,
        table: &str,
        rows: &[R],
    ) -> Result<reqwest::Request, SupabaseError>
    where
        R: serde::Serialize,
    {
        let url = self.table_url(table)?;
        let req = self
            .authorized(self.http.post(url))
            .header(PREFER_HEADER, "return=representation")
            .json(rows)
            .build()?;
        Ok(req)
    }

    pub async fn select<T>(&self, query: &SelectQuery) -> Result<Vec<T>, SupabaseError>
    where
        T: DeserializeOwned,
    {
        let req = self.build_select_request(query)?;
        debug!(table = %query.table, url = %req.url().path(), "PostgREST select");
        self.send(req).await
    }

    pub async fn insert<R, T>(&self, table: &str, rows: &[R]) -> Result<Vec<T>, SupabaseError>
    where
        R: serde::Serialize,
        T: DeserializeOwned,
    {
        let req = self.build_insert_request(table, rows)?;
        debug!(table = %table, rows = rows.len(), "PostgREST insert");
        self.send(req).await
    }

    async fn send<T>(&self, req: reqwest::Request) -> Result<Vec<T>, SupabaseError>
    where
        T: DeserializeOwned,
    {
        let resp = self.http.execute(req).await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            return Err(classify_error(status, &bytes));
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn classify_error(status: reqwest::StatusCode, bytes: &[u8]) -> SupabaseError {
    match serde_json::from_slice::<PostgrestErrorBody>(bytes) {
        Ok(body) if !body.is_empty() => {
            debug!(%status, code = ?body.code, message = %body.summary(), "PostgREST error");
            SupabaseError::Postgrest { status, body }
        }
        _ => {
            let raw_body = String::from_utf8_lossy(bytes);
            let preview = format!("{:.len$}", raw_body, len = UPSTREAM_BODY_PREVIEW_CHARS);
            debug!(%status, body = %preview, "Unstructured upstream error");
            SupabaseError::UpstreamStatus {
                status,
                body: preview,
            }
        }
    }
}
