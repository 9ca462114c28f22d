//! Configuration file errors

use std::io;
use tapkit_core::MaterialError;
use thiserror::Error;

/// Failure reading, writing or validating a configuration file
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Reading the file failed
    #[error("Failed to load settings from '{path}': {reason}")]
    LoadError { path: String, reason: String },

    /// Writing the file or creating its directory failed
    #[error("Failed to save settings to '{path}': {reason}")]
    SaveError { path: String, reason: String },

    /// No platform configuration directory
    #[error("Configuration directory unavailable: {0}")]
    ConfigDirectory(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Malformed TOML
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// The file parsed but its content is inconsistent
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A material profile failed validation
    #[error("Material error: {0}")]
    Material(#[from] MaterialError),
}

/// Configuration content errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// File extension other than `.json` or `.toml`
    #[error("Unsupported configuration file extension: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration must define at least one material")]
    NoMaterials,

    /// `default_material` names no configured or built-in profile
    #[error("Default material '{0}' is not defined")]
    UnknownDefaultMaterial(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

pub type ConfigResult<T> = Result<T, ConfigError>;
