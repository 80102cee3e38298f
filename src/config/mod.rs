mod basic;
mod settings;
pub mod supabase;

pub use basic::BasicConfig;
pub use settings::SupabaseSettings;
pub use supabase::{
    ANON_KEY_VAR, EnvSource, ProcessEnv, SupabaseCredentials, URL_VAR, looks_like_token,
    looks_like_url, resolve,
};

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
///
/// Credentials are deliberately not part of this struct: they come from the
/// process environment through [`supabase::resolve`].
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Data service settings (see `supabase` table in config.toml).
    #[serde(default)]
    pub supabase: SupabaseSettings,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";

impl Config {
    /// Builds a Figment that merges defaults and a config TOML file.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        }
    }

    /// Loads configuration by merging defaults and `config.toml` if present.
    pub fn from_optional_toml() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}
