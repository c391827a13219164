//! TOML config file loading and creation.

use crate::schema::StylistConfig;
use crate::validation;
use std::path::{Path, PathBuf};
use stylist_common::ConfigError;
use tracing::info;

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields,
/// then validates the result. Unlike a missing default file, an explicit
/// path that does not exist is an error.
pub fn load_from_path(path: &Path) -> Result<StylistConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
    })?;

    let config: StylistConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    validation::validate(&config)?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/stylist/config.toml`
/// On Linux: `~/.config/stylist/config.toml`
///
/// If the file does not exist, writes a commented default and returns defaults.
pub fn load_default() -> Result<StylistConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(StylistConfig::default());
    }

    load_from_path(&path)
}

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        ConfigError::ParseError("could not determine config directory".into())
    })?;
    Ok(config_dir.join("stylist").join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TOML).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

/// Commented default config written on first run.
pub const DEFAULT_CONFIG_TOML: &str = r##"# Stylist Configuration
# Only override what you want to change -- missing fields use defaults.
# The API key is read from the GROQ_API_KEY environment variable (or .env).

[server]
# host = "0.0.0.0"
# port = 8000
# cors_allow_any_origin = true

[model]
# base_url = "https://api.groq.com/openai/v1"
# chat_model = "llama-3.1-8b-instant"
# chat_temperature = 0.7        # 0.0-2.0
# extraction_model = "llama-3.1-8b-instant"
# extraction_temperature = 0.3  # 0.0-2.0
# max_tokens = 1024             # 16-32768
# connect_timeout_secs = 10     # 1-120
# request_timeout_secs = 60     # 1-600

[profile]
# extraction_window = 3         # 1-20 trailing messages
# reply_timeout_secs = 60       # 1-600
# extraction_timeout_secs = 30  # 1-600

[logging]
# filter = "stylist=info,tower_http=info"
"##;
