//! Stylist configuration system.
//!
//! TOML-based configuration with full validation. All config sections use
//! defaults so partial configs work out of the box. Secrets never live in
//! the file: the model API key comes from the environment (see [`env`]).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stylist_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("listening on {}", config.server.bind_addr());
//! ```

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{LoggingConfig, ModelSettings, ProfileSettings, ServerConfig, StylistConfig};

use std::path::Path;

use stylist_common::ConfigError;

/// Load config from `path`, or from the platform default path when `None`.
///
/// Environment overrides are applied after the file and the result is
/// validated again.
pub fn load_config(path: Option<&Path>) -> Result<StylistConfig, ConfigError> {
    let mut config = match path {
        Some(p) => toml_loader::load_from_path(p)?,
        None => toml_loader::load_default()?,
    };

    env::apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}
