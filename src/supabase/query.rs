use crate::error::SupabaseError;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::SupabaseClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub ascending: bool,
}

/// A read against one table, as accumulated by [`QueryBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectQuery {
    pub table: String,
    /// `None` selects every column.
    pub columns: Option<String>,
    pub orders: Vec<OrderBy>,
    pub limit: Option<usize>,
}

impl SelectQuery {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    /// PostgREST query parameters, in `select`, `order`, `limit` order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("select", self.columns.clone().unwrap_or_else(|| "*".into()))];

        if !self.orders.is_empty() {
            let order = self
                .orders
                .iter()
                .map(|o| {
                    let dir = if o.ascending { "asc" } else { "desc" };
                    format!("{}.{dir}", o.column)
                })
                .collect::<Vec<_>>()
                .join(",");
            params.push(("order", order));
        }

        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// Chainable query against one table.
///
/// `select`, `order` and `limit` only record intent; nothing is sent until
/// [`execute`](Self::execute) or [`insert`](Self::insert) runs. Against the stub
/// client both terminals return [`SupabaseError::NotConfigured`].
#[derive(Debug, Clone)]
pub struct QueryBuilder<'a> {
    client: &'a SupabaseClient,
    query: SelectQuery,
}

impl<'a> QueryBuilder<'a> {
    pub(super) fn new(client: &'a SupabaseClient, table: &str) -> Self {
        Self {
            client,
            query: SelectQuery::new(table),
        }
    }

    /// Comma-separated column list; replaces any earlier selection.
    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        self.query.columns = Some(columns.to_string());
        self
    }

    /// Adds a sort key. Later calls sort within earlier ones.
    #[must_use]
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.query.orders.push(OrderBy {
            column: column.to_string(),
            ascending,
        });
        self
    }

    /// Caps the number of returned rows; replaces any earlier limit.
    #[must_use]
    pub fn limit(mut self, count: usize) -> Self {
        self.query.limit = Some(count);
        self
    }

    pub fn query(&self) -> &SelectQuery {
        &self.query
    }

    pub async fn execute<T>(self) -> Result<Vec<T>, SupabaseError>
    where
        T: DeserializeOwned,
    {
        match self.client {
            SupabaseClient::Live(api) => api.select(&self.query).await,
            SupabaseClient::Stub => Err(SupabaseError::NotConfigured),
        }
    }

    /// Inserts `rows` and returns them as stored, with server-assigned columns filled in.
    ///
    /// Sends `Prefer: return=representation`, so the anon role needs `SELECT` as well as
    /// `INSERT` under row-level security; an insert-only policy rejects the request.
    pub async fn insert<R, T>(self, rows: &[R]) -> Result<Vec<T>, SupabaseError>
    where
        R: Serialize,
        T: DeserializeOwned,
    {
        match self.client {
            SupabaseClient::Live(api) => api.insert(&self.query.table, rows).await,
            SupabaseClient::Stub => Err(SupabaseError::NotConfigured),
        }
    }
}
