//! Data models for TapKit
//!
//! Material profiles and scale requests supplied by the caller to the
//! processing pipeline.

pub mod materials;
pub mod scale;

pub use materials::{
    init_standard_library, BoundedTier, MaterialId, MaterialLibrary, MaterialProfile, OpenTier,
    PauseTiers, DEFAULT_MATERIAL_ID,
};
pub use scale::ScaleRequest;
