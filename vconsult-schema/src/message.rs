use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A row of the `messages` table as returned by PostgREST.
///
/// `id` is assigned by the database and grows with insertion order, so
/// ordering by `id` descending yields the newest messages first.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    pub id: i64,

    pub text: String,

    /// Present when the table carries Supabase's conventional `created_at` column.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Any additional columns the table may have.
    #[serde(flatten)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

/// Insert payload for the `messages` table. The id is left to the database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewMessage {
    pub text: String,
}

impl NewMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
