//! Material profiles
//!
//! This module provides:
//! - Distance tiers and their dwell durations
//! - Material profiles (feed rate + tiers)
//! - Material library management
//! - The built-in `T1` and `T2` foam profiles

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::MaterialError;

/// Identifier of the built-in default material
pub const DEFAULT_MATERIAL_ID: &str = "T1";

/// Upper-bounded tier (short and medium)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundedTier {
    /// Segments strictly shorter than this distance (mm) fall in the tier
    pub max_distance: f64,
    /// Dwell duration in seconds
    pub seconds: f64,
}

/// Lower-bounded tier (long)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpenTier {
    /// Segments at least this long (mm) fall in the tier
    pub min_distance: f64,
    /// Dwell duration in seconds
    pub seconds: f64,
}

/// The three distance tiers of a material
///
/// `long.min_distance` is expected to equal or exceed `medium.max_distance`.
/// Classification does not rely on it: anything not short or medium is long.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PauseTiers {
    pub short: BoundedTier,
    pub medium: BoundedTier,
    pub long: OpenTier,
}

impl PauseTiers {
    /// Build tiers from `(max, seconds)`, `(max, seconds)`, `(min, seconds)`
    pub fn new(short: (f64, f64), medium: (f64, f64), long: (f64, f64)) -> Self {
        Self {
            short: BoundedTier {
                max_distance: short.0,
                seconds: short.1,
            },
            medium: BoundedTier {
                max_distance: medium.0,
                seconds: medium.1,
            },
            long: OpenTier {
                min_distance: long.0,
                seconds: long.1,
            },
        }
    }

    /// Whether the thresholds are ordered short < medium <= long
    pub fn is_consistent(&self) -> bool {
        self.short.max_distance <= self.medium.max_distance
            && self.long.min_distance >= self.medium.max_distance
    }
}

impl std::fmt::Display for PauseTiers {
    /// Thresholds with the comparisons classification uses
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<{}mm: {}s | <{}mm: {}s | >={}mm: {}s",
            self.short.max_distance,
            self.short.seconds,
            self.medium.max_distance,
            self.medium.seconds,
            self.long.min_distance,
            self.long.seconds
        )
    }
}

/// Material identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct MaterialId(pub String);

impl MaterialId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MaterialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cutting profile for one foam grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProfile {
    /// Unique material identifier (e.g. "T1")
    pub id: MaterialId,
    /// Display name
    pub name: String,
    /// Badge color as a hex string
    #[serde(default)]
    pub color: String,
    /// Nominal feed rate in mm/min
    pub feed_rate: f64,
    /// Brief description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Human readable summary of the processing rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    /// Distance tiers
    pub tiers: PauseTiers,
}

impl MaterialProfile {
    /// Create a new profile with no description
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        feed_rate: f64,
        tiers: PauseTiers,
    ) -> Self {
        Self {
            id: MaterialId::new(id),
            name: name.into(),
            color: String::new(),
            feed_rate,
            description: None,
            algorithm: None,
            tiers,
        }
    }

    /// Built-in low density EPS profile
    pub fn eps_t1() -> Self {
        let mut profile = Self::new(
            "T1",
            "EPS T1",
            600.0,
            PauseTiers::new((5.0, 0.0), (50.0, 0.3), (50.0, 0.5)),
        );
        profile.color = "#7AA2F7".to_string();
        profile.description = Some("Isopor padrão, densidade baixa".to_string());
        profile.algorithm = Some(
            "• Distância: D = max(|ΔX|, |ΔY|)\n\
             • D < 5mm: G04 P0.0 (sempre insere, mantém acumulador)\n\
             • 5 ≤ D < 50mm: G04 P0.3 (zera acumulador)\n\
             • D ≥ 50mm: G04 P0.5 (zera acumulador)\n\
             • Remove: Comandos G00 e G04 existentes\n\
             • Tempo: Baseado em 300 mm/min"
                .to_string(),
        );
        profile
    }

    /// Built-in medium density EPS profile
    pub fn eps_t2() -> Self {
        let mut profile = Self::new(
            "T2",
            "EPS T2",
            500.0,
            PauseTiers::new((8.0, 0.1), (40.0, 0.4), (40.0, 0.7)),
        );
        profile.color = "#E0AF68".to_string();
        profile.description = Some("Isopor densidade média".to_string());
        profile.algorithm = Some("• Material T2 com diferentes parâmetros de corte".to_string());
        profile
    }

    /// Feed rate actually achieved while cutting (half the nominal rate)
    pub fn effective_feed_rate(&self) -> f64 {
        self.feed_rate * 0.5
    }

    /// Check the values a configuration file could get wrong
    ///
    /// Inverted tier thresholds are accepted; classification order decides
    /// the outcome for those.
    pub fn validate(&self) -> Result<(), MaterialError> {
        if self.id.0.trim().is_empty() {
            return Err(MaterialError::EmptyId);
        }

        if !(self.feed_rate.is_finite() && self.feed_rate > 0.0) {
            return Err(MaterialError::InvalidFeedRate {
                id: self.id.0.clone(),
                feed_rate: self.feed_rate,
            });
        }

        for (tier, seconds) in [
            ("short", self.tiers.short.seconds),
            ("medium", self.tiers.medium.seconds),
            ("long", self.tiers.long.seconds),
        ] {
            if !(seconds.is_finite() && seconds >= 0.0) {
                return Err(MaterialError::InvalidPause {
                    id: self.id.0.clone(),
                    tier: tier.to_string(),
                    seconds,
                });
            }
        }

        Ok(())
    }
}

impl Default for MaterialProfile {
    fn default() -> Self {
        Self::eps_t1()
    }
}

/// Materials library - manages collection of material profiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialLibrary {
    materials: HashMap<MaterialId, MaterialProfile>,
}

impl MaterialLibrary {
    /// Create a new empty library
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
        }
    }

    /// Build a library from a list, rejecting duplicate identifiers
    pub fn from_profiles(profiles: Vec<MaterialProfile>) -> Result<Self, MaterialError> {
        let mut library = Self::new();
        for profile in profiles {
            if library.materials.contains_key(&profile.id) {
                return Err(MaterialError::DuplicateId {
                    id: profile.id.0.clone(),
                });
            }
            library.add_material(profile);
        }
        Ok(library)
    }

    /// Add or replace a material
    pub fn add_material(&mut self, material: MaterialProfile) {
        self.materials.insert(material.id.clone(), material);
    }

    /// Get a material by ID
    pub fn get_material(&self, id: &str) -> Option<&MaterialProfile> {
        self.materials.get(&MaterialId::new(id))
    }

    /// Get a material by ID or fail with `MaterialError::NotFound`
    pub fn require(&self, id: &str) -> Result<&MaterialProfile, MaterialError> {
        self.get_material(id).ok_or_else(|| MaterialError::NotFound { id: id.to_string() })
    }

    /// Make sure the built-in `T1` and `T2` profiles are present
    pub fn ensure_builtin(&mut self) {
        for builtin in [MaterialProfile::eps_t1(), MaterialProfile::eps_t2()] {
            if !self.materials.contains_key(&builtin.id) {
                tracing::debug!(id = %builtin.id, "adding built-in material");
                self.materials.insert(builtin.id.clone(), builtin);
            }
        }
    }

    /// All materials sorted by identifier
    pub fn get_all_materials(&self) -> Vec<&MaterialProfile> {
        let mut all: Vec<_> = self.materials.values().collect();
        all.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        all
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the standard library with the built-in profiles
pub fn init_standard_library() -> MaterialLibrary {
    let mut library = MaterialLibrary::new();
    library.ensure_builtin();
    library
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t1_values() {
        let t1 = MaterialProfile::eps_t1();
        assert_eq!(t1.feed_rate, 600.0);
        assert_eq!(t1.tiers.short.max_distance, 5.0);
        assert_eq!(t1.tiers.medium.seconds, 0.3);
        assert_eq!(t1.tiers.long.min_distance, 50.0);
        assert_eq!(t1.effective_feed_rate(), 300.0);
        assert!(t1.tiers.is_consistent());
    }

    #[test]
    fn test_validate_rejects_bad_feed_rate() {
        let mut profile = MaterialProfile::eps_t2();
        profile.feed_rate = 0.0;
        assert!(matches!(
            profile.validate(),
            Err(MaterialError::InvalidFeedRate { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_pause() {
        let mut profile = MaterialProfile::eps_t1();
        profile.tiers.long.seconds = -1.0;
        assert!(matches!(
            profile.validate(),
            Err(MaterialError::InvalidPause { ref tier, .. }) if tier == "long"
        ));
    }

    #[test]
    fn test_validate_accepts_inverted_tiers() {
        let mut profile = MaterialProfile::eps_t1();
        profile.tiers.long.min_distance = 10.0;
        assert!(!profile.tiers.is_consistent());
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_from_profiles_rejects_duplicates() {
        let result =
            MaterialLibrary::from_profiles(vec![MaterialProfile::eps_t1(), MaterialProfile::eps_t1()]);
        assert_eq!(
            result.unwrap_err(),
            MaterialError::DuplicateId {
                id: "T1".to_string()
            }
        );
    }
}
