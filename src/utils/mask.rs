//! Rendering of configuration values for log lines.

use std::ffi::OsStr;

const VISIBLE_PREFIX: usize = 8;
const VISIBLE_SUFFIX: usize = 4;
const SHORT_VALUE_MAX: usize = 12;

/// Partially obscures `value` for logging.
///
/// Missing or empty values render as `<missing>`. The value is trimmed first;
/// up to 12 characters are shown as-is, anything longer keeps the first 8 and
/// the last 4 characters around an ellipsis.
pub fn mask(value: Option<&str>) -> String {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return "<missing>".to_string();
    };

    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len <= SHORT_VALUE_MAX {
        return trimmed.to_string();
    }

    let prefix: String = trimmed.chars().take(VISIBLE_PREFIX).collect();
    let suffix: String = trimmed.chars().skip(len - VISIBLE_SUFFIX).collect();
    format!("{prefix}…{suffix}")
}

/// Like [`mask`], but for raw environment values; non-UTF-8 input renders as `<invalid>`.
pub fn mask_os(value: Option<&OsStr>) -> String {
    match value {
        None => mask(None),
        Some(raw) => match raw.to_str() {
            Some(s) => mask(Some(s)),
            None => "<invalid>".to_string(),
        },
    }
}

/// `<present>` or `<missing>`; never the value itself.
pub fn presence(value: Option<&str>) -> &'static str {
    if value.is_some_and(|v| !v.is_empty()) {
        "<present>"
    } else {
        "<missing>"
    }
}
