//! Uniform trajectory rescaling request

use serde::{Deserialize, Serialize};

/// Request to rescale a cut trajectory from one total length to another
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRequest {
    /// Measured path length of the input (mm)
    pub current_length: f64,
    /// Path length the caller wants (mm)
    pub desired_length: f64,
    /// `desired_length / current_length`
    pub factor: f64,
    /// Whether the pipeline should rescale at all
    pub apply: bool,
}

impl ScaleRequest {
    /// Build a request; `apply` is only set when both lengths are positive
    pub fn new(current_length: f64, desired_length: f64) -> Self {
        let valid = current_length.is_finite()
            && desired_length.is_finite()
            && current_length > 0.0
            && desired_length > 0.0;

        Self {
            current_length,
            desired_length,
            factor: if valid {
                desired_length / current_length
            } else {
                1.0
            },
            apply: valid,
        }
    }

    /// A request that leaves the trajectory untouched
    pub fn none() -> Self {
        Self {
            current_length: 0.0,
            desired_length: 0.0,
            factor: 1.0,
            apply: false,
        }
    }
}

impl Default for ScaleRequest {
    fn default() -> Self {
        Self::none()
    }
}
