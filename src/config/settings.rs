use serde::{Deserialize, Serialize};
use url::Url;

/// Data service settings managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SupabaseSettings {
    /// Table backing the messages board.
    /// TOML: `supabase.table`. Default: `messages`.
    #[serde(default = "default_table")]
    pub table: String,

    /// How many messages the board lists, newest first.
    /// TOML: `supabase.list_limit`. Default: `10`.
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    /// Optional outbound HTTP proxy for the reqwest client.
    /// TOML: `supabase.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Allow HTTP/2 multiplexing; disabled forces HTTP/1.
    /// TOML: `supabase.enable_multiplexing`. Default: `false`.
    #[serde(default)]
    pub enable_multiplexing: bool,

    /// Whole-request timeout in seconds.
    /// TOML: `supabase.timeout_secs`. Default: `30`.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SupabaseSettings {
    fn default() -> Self {
        Self {
            table: default_table(),
            list_limit: default_list_limit(),
            proxy: None,
            enable_multiplexing: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_table() -> String {
    "messages".to_string()
}

fn default_list_limit() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    30
}
