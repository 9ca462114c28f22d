//! # TapKit Core
//!
//! Core types for TapKit.
//! Provides the values callers hand to the processing pipeline: material
//! profiles, header/footer templates, scale requests, and the error types
//! shared by the surrounding layers.

pub mod data;
pub mod error;
pub mod template;

pub use data::{
    init_standard_library, BoundedTier, MaterialId, MaterialLibrary, MaterialProfile, OpenTier,
    PauseTiers, ScaleRequest, DEFAULT_MATERIAL_ID,
};

pub use error::{Error, InputError, MaterialError, Result};

pub use template::Template;
