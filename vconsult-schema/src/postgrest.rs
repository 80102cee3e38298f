use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// PostgREST error response schema.
///
/// PostgREST reports failures as a flat object, e.g.
/// `{"code":"42P01","message":"relation \"public.x\" does not exist","details":null,"hint":null}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PostgrestErrorBody {
    /// SQLSTATE or PostgREST-specific code (`PGRST...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Often a string or null.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<Value>,

    #[serde(flatten)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl PostgrestErrorBody {
    /// Best human-readable summary of the error.
    pub fn summary(&self) -> &str {
        self.message
            .as_deref()
            .or(self.code.as_deref())
            .unwrap_or("unknown PostgREST error")
    }

    /// True when the body carries none of the fields PostgREST normally sets.
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.message.is_none() && self.details.is_none() && self.hint.is_none()
    }
}
