//! Full configuration validation.
//!
//! Validates numeric ranges and required strings, collecting every
//! problem into one error.

use crate::schema::StylistConfig;
use stylist_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &StylistConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    // Server
    validate_non_empty(&mut errors, "server.host", &config.server.host);
    if config.server.port == 0 {
        errors.push("server.port = 0 is out of range [1, 65535]".into());
    }

    // Model
    validate_non_empty(&mut errors, "model.base_url", &config.model.base_url);
    if !config.model.base_url.starts_with("http://")
        && !config.model.base_url.starts_with("https://")
    {
        errors.push(format!(
            "model.base_url = \"{}\" must start with http:// or https://",
            config.model.base_url
        ));
    }
    validate_non_empty(&mut errors, "model.chat_model", &config.model.chat_model);
    validate_non_empty(
        &mut errors,
        "model.extraction_model",
        &config.model.extraction_model,
    );
    validate_range_f64(
        &mut errors,
        "model.chat_temperature",
        config.model.chat_temperature,
        0.0,
        2.0,
    );
    validate_range_f64(
        &mut errors,
        "model.extraction_temperature",
        config.model.extraction_temperature,
        0.0,
        2.0,
    );
    validate_range(&mut errors, "model.max_tokens", config.model.max_tokens as u64, 16, 32768);
    validate_range(
        &mut errors,
        "model.connect_timeout_secs",
        config.model.connect_timeout_secs,
        1,
        120,
    );
    validate_range(
        &mut errors,
        "model.request_timeout_secs",
        config.model.request_timeout_secs,
        1,
        600,
    );

    // Profile pipeline
    validate_range(
        &mut errors,
        "profile.extraction_window",
        config.profile.extraction_window as u64,
        1,
        20,
    );
    validate_range(
        &mut errors,
        "profile.reply_timeout_secs",
        config.profile.reply_timeout_secs,
        1,
        600,
    );
    validate_range(
        &mut errors,
        "profile.extraction_timeout_secs",
        config.profile.extraction_timeout_secs,
        1,
        600,
    );

    validate_non_empty(&mut errors, "logging.filter", &config.logging.filter);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_non_empty(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

fn validate_range_f64(errors: &mut Vec<String>, name: &str, value: f64, min: f64, max: f64) {
    if value.is_nan() || value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
