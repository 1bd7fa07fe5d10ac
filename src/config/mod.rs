/// Database configuration and connection management
pub mod database;

/// Booking policy and catalog seeds from config.toml
pub mod settings;

pub use settings::{AppConfig, BookingConfig, load_config, load_default_config};
