//! Supabase credential resolution from the process environment.
//!
//! Both values are read once at startup. A frequent operator mistake is to
//! paste the anon key into the URL variable and vice versa; when the shapes
//! make that unambiguous the two are swapped back before use.

use crate::utils::mask::{mask_os, presence};
use regex::Regex;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::hash::Hash;
use std::sync::LazyLock;
use tracing::{info, warn};

/// Environment variable holding the service base URL.
pub const URL_VAR: &str = "SUPABASE_URL";

/// Environment variable holding the public anon key.
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

static TOKEN_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+").expect("valid token regex")
});

static URL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid url regex"));

/// Three URL-safe base64 segments separated by dots, the first one starting with `eyJ`.
pub fn looks_like_token(s: &str) -> bool {
    TOKEN_SHAPE.is_match(s)
}

/// Starts with `http://` or `https://`, case-insensitive.
pub fn looks_like_url(s: &str) -> bool {
    URL_SHAPE.is_match(s)
}

/// A read-only view of environment variables.
pub trait EnvSource {
    fn var_os(&self, key: &str) -> Option<OsString>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

impl<K, V> EnvSource for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<OsStr>,
{
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.get(key).map(|v| v.as_ref().to_os_string())
    }
}

impl<K, V> EnvSource for HashMap<K, V>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<OsStr>,
{
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.get(key).map(|v| v.as_ref().to_os_string())
    }
}

/// Endpoint and anon key, both non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct SupabaseCredentials {
    pub endpoint: String,
    pub token: String,
}

impl fmt::Debug for SupabaseCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseCredentials")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Reads [`URL_VAR`] and [`ANON_KEY_VAR`] from `env`.
///
/// Returns `None` when either value is missing, empty or not valid UTF-8.
/// Present values are otherwise accepted as they are.
pub fn resolve<E>(env: &E) -> Option<SupabaseCredentials>
where
    E: EnvSource + ?Sized,
{
    let mut endpoint = env.var_os(URL_VAR);
    let mut token = env.var_os(ANON_KEY_VAR);

    let endpoint_is_token = as_str(endpoint.as_deref()).is_some_and(looks_like_token);
    let token_is_url = as_str(token.as_deref()).is_some_and(looks_like_url);
    if endpoint_is_token && token_is_url {
        warn!(
            "[supabase] Detected swapped environment variables: {URL_VAR} looks like an anon key \
             and {ANON_KEY_VAR} looks like a URL. Swapping them for this session."
        );
        std::mem::swap(&mut endpoint, &mut token);
    }

    let endpoint = endpoint.as_deref();
    let token = token.as_deref();

    info!(
        "[supabase] {URL_VAR}={}, {ANON_KEY_VAR}={}",
        mask_os(endpoint),
        presence(usable(token))
    );
    info!(
        "[supabase] raw {URL_VAR} length={}",
        as_str(endpoint).map_or(0, |s| s.chars().count())
    );

    match (usable(endpoint), usable(token)) {
        (Some(endpoint), Some(token)) => Some(SupabaseCredentials {
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        }),
        (endpoint, token) => {
            let missing: Vec<&str> = [(URL_VAR, endpoint), (ANON_KEY_VAR, token)]
                .into_iter()
                .filter_map(|(name, value)| value.is_none().then_some(name))
                .collect();
            warn!(
                missing = ?missing,
                "[supabase] Supabase credentials are missing; data features will not work. \
                 Set them in a local `.env` (development) or in the hosting project's \
                 environment variable settings (production)."
            );
            None
        }
    }
}

fn as_str(value: Option<&OsStr>) -> Option<&str> {
    value.and_then(OsStr::to_str)
}

fn usable(value: Option<&OsStr>) -> Option<&str> {
    as_str(value).filter(|s| !s.is_empty())
}
