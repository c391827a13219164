//! Environment-sourced settings: `.env` loading, API key, overrides.

use std::path::Path;

use stylist_common::ConfigError;

use crate::schema::StylistConfig;

/// Environment variable holding the hosted model API key.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";
/// Optional override for `model.base_url`.
pub const BASE_URL_VAR: &str = "STYLIST_GROQ_BASE_URL";

/// Load `KEY=VALUE` lines from a `.env` file into the process environment.
///
/// Variables that are already set are left alone. Returns the number of
/// variables applied; a missing file applies nothing.
pub fn load_dotenv(path: &Path) -> usize {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return 0;
    };

    let mut applied = 0;
    for (key, value) in parse_dotenv(&contents) {
        if std::env::var(&key).is_err() {
            std::env::set_var(&key, value);
            applied += 1;
        }
    }
    applied
}

/// Parse `.env` content. Blank lines, comments and lines without `=` are skipped.
pub fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            let value = value.trim().trim_matches('"').trim_matches('\'');
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Read the required API key from the environment.
pub fn api_key() -> Result<String, ConfigError> {
    match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ConfigError::MissingEnv(API_KEY_VAR.into())),
    }
}

/// Apply environment overrides on top of the file config.
pub fn apply_env_overrides(config: &mut StylistConfig) {
    if let Ok(url) = std::env::var(BASE_URL_VAR) {
        if !url.trim().is_empty() {
            tracing::debug!(base_url = %url, "model.base_url overridden from environment");
            config.model.base_url = url.trim().trim_end_matches('/').to_string();
        }
    }
}
