//! Application settings loaded from config.toml
//!
//! The file carries the booking policy and the billboards used to seed an empty
//! catalog on first run. Every section is optional; missing values fall back to
//! the defaults below.

use crate::{
    core::billboard::NewBillboard,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::{path::Path, time::Duration};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Booking policy
    #[serde(default)]
    pub booking: BookingConfig,
    /// Billboards to seed into an empty catalog
    #[serde(default)]
    pub billboards: Vec<NewBillboard>,
}

/// Booking policy applied by the cart and checkout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Reject cart entries whose start month is before the current month
    pub reject_past_starts: bool,
    /// Upper bound on a single checkout transaction
    pub checkout_timeout_secs: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            reject_past_starts: true,
            checkout_timeout_secs: 10,
        }
    }
}

impl BookingConfig {
    #[must_use]
    pub const fn checkout_timeout(&self) -> Duration {
        Duration::from_secs(self.checkout_timeout_secs)
    }
}

/// Loads application configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading configuration from {:?}", path_ref);

    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from the default location (./config.toml), falling back to
/// defaults when the file does not exist.
pub fn load_default_config() -> Result<AppConfig> {
    let path = Path::new("config.toml");
    if path.exists() {
        load_config(path)
    } else {
        tracing::info!("No config.toml found, using default settings");
        Ok(AppConfig::default())
    }
}
