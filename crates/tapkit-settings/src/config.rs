//! Configuration and settings management for TapKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Material profiles and the default material
//! - Header/footer template
//! - Output preferences (directory, overwrite policy)

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tapkit_core::{MaterialLibrary, MaterialProfile, Template, DEFAULT_MATERIAL_ID};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Application directory name under the platform config directory
pub const APP_DIR_NAME: &str = "tapkit";
/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Where processed files are written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Output directory; next to the input file when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// Replace existing output files
    #[serde(default)]
    pub overwrite: bool,
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Material used when none is requested
    pub default_material: String,
    /// Output preferences
    pub output: OutputSettings,
    /// Header/footer template
    pub template: Template,
    /// Material profiles
    pub materials: Vec<MaterialProfile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_material: DEFAULT_MATERIAL_ID.to_string(),
            output: OutputSettings::default(),
            template: Template::default(),
            materials: vec![MaterialProfile::eps_t1(), MaterialProfile::eps_t2()],
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration file location
    ///
    /// `<platform config dir>/tapkit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("platform config directory not found".to_string())
        })?;
        Ok(base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), materials = config.materials.len(), "loaded configuration");
        Ok(config)
    }

    /// Load config from file, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::SaveError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        std::fs::write(path, content).map_err(|e| SettingsError::SaveError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Validate configuration
    ///
    /// Inverted tier thresholds and a template without sentinels are
    /// accepted and only logged.
    pub fn validate(&self) -> SettingsResult<()> {
        if self.materials.is_empty() {
            return Err(ConfigError::NoMaterials.into());
        }

        let mut seen = HashSet::new();
        for material in &self.materials {
            material.validate()?;
            if !seen.insert(material.id.as_str()) {
                return Err(tapkit_core::MaterialError::DuplicateId {
                    id: material.id.0.clone(),
                }
                .into());
            }
            if !material.tiers.is_consistent() {
                tracing::warn!(
                    material = %material.id,
                    "pause tier thresholds are not ordered short < medium <= long"
                );
            }
        }

        if !self.template.has_sentinels() {
            tracing::warn!("template lacks the cut/statistics sentinels; output will not be recognised when resubmitted");
        }

        if self.library()?.get_material(&self.default_material).is_none() {
            return Err(ConfigError::UnknownDefaultMaterial(self.default_material.clone()).into());
        }

        Ok(())
    }

    /// Material library built from this configuration plus the built-ins
    pub fn library(&self) -> SettingsResult<MaterialLibrary> {
        let mut library = MaterialLibrary::from_profiles(self.materials.clone())?;
        library.ensure_builtin();
        Ok(library)
    }

    /// Resolve a material by id, or the configured default when `id` is `None`
    pub fn material(&self, id: Option<&str>) -> SettingsResult<MaterialProfile> {
        let library = self.library()?;
        let id = id.unwrap_or(self.default_material.as_str());
        Ok(library.require(id)?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_material, "T1");
        assert_eq!(config.materials.len(), 2);
        assert!(config.output.directory.is_none());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("a/config.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.JSON")).unwrap(),
            ConfigFormat::Json
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.yaml")).unwrap_err(),
            ConfigError::UnsupportedFormat("yaml".to_string())
        );
        assert!(ConfigFormat::from_path(Path::new("config")).is_err());
    }

    #[test]
    fn test_validate_empty_materials() {
        let config = Config {
            materials: Vec::new(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Config(ConfigError::NoMaterials))
        ));
    }

    #[test]
    fn test_validate_duplicate_ids() {
        let config = Config {
            materials: vec![MaterialProfile::eps_t1(), MaterialProfile::eps_t1()],
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(SettingsError::Material(_))));
    }

    #[test]
    fn test_validate_unknown_default() {
        let config = Config {
            default_material: "XPS".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Config(ConfigError::UnknownDefaultMaterial(_)))
        ));
    }

    #[test]
    fn test_validate_bad_feed_rate() {
        let mut config = Config::default();
        config.materials[1].feed_rate = -5.0;
        assert!(matches!(config.validate(), Err(SettingsError::Material(_))));
    }

    #[test]
    fn test_builtins_always_available() {
        let mut custom = MaterialProfile::eps_t1();
        custom.id = tapkit_core::MaterialId::new("XPS");
        custom.name = "XPS".to_string();
        let config = Config {
            materials: vec![custom],
            default_material: "T2".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.library().unwrap().len(), 3);
        assert_eq!(config.material(None).unwrap().id.as_str(), "T2");
        assert_eq!(config.material(Some("XPS")).unwrap().name, "XPS");
        assert!(config.material(Some("nope")).is_err());
    }
}
