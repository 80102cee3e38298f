//! The messages board: newest entries first, plus posting new ones.

use crate::error::{MessageError, SupabaseError};
use crate::supabase::SupabaseClient;
use tracing::{info, warn};
use vconsult_schema::{Message, NewMessage};

#[derive(Debug, Clone)]
pub struct MessageBoard {
    client: SupabaseClient,
    table: String,
    limit: usize,
}

impl MessageBoard {
    pub fn new(client: SupabaseClient, table: impl Into<String>, limit: usize) -> Self {
        Self {
            client,
            table: table.into(),
            limit,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// Up to `limit` messages, highest id first.
    pub async fn recent(&self) -> Result<Vec<Message>, MessageError> {
        self.client
            .from(&self.table)
            .select("*")
            .order("id", false)
            .limit(self.limit)
            .execute()
            .await
            .map_err(|e| self.failed("fetch", e))
    }

    /// Stores `text` as a new message. Blank text is rejected without contacting the service.
    pub async fn post(&self, text: &str) -> Result<Vec<Message>, MessageError> {
        if text.trim().is_empty() {
            return Err(MessageError::EmptyText);
        }

        let inserted: Vec<Message> = self
            .client
            .from(&self.table)
            .insert(&[NewMessage::new(text)])
            .await
            .map_err(|e| self.failed("insert", e))?;

        info!(table = %self.table, rows = inserted.len(), "Message stored");
        Ok(inserted)
    }

    fn failed(&self, op: &'static str, e: SupabaseError) -> MessageError {
        warn!(
            op,
            table = %self.table,
            upstream_status = ?e.upstream_status().map(|s| s.as_u16()),
            error = %e,
            "Supabase {op} error"
        );
        MessageError::from(e)
    }
}
