//! Configuration schema types for the stylist server.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the service ships with.

mod logging;
mod model;
mod profile;
mod server;

pub use logging::*;
pub use model::*;
pub use profile::*;
pub use server::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StylistConfig {
    pub server: ServerConfig,
    pub model: ModelSettings,
    pub profile: ProfileSettings,
    pub logging: LoggingConfig,
}
