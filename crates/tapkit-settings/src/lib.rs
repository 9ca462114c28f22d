//! TapKit Settings Crate
//!
//! Handles application configuration: material profiles, the header/footer
//! template and output preferences, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, ConfigFormat, OutputSettings, APP_DIR_NAME, CONFIG_FILE_NAME};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
