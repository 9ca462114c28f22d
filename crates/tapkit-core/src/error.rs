//! Error handling for TapKit
//!
//! The processing pipeline itself never fails once it has a string in hand.
//! The error types here cover the layers around it:
//! - Material errors (profile validation, library lookups)
//! - Input errors (reading a file as text)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Material profile error type
///
/// Raised by profile validation and library lookups. The pipeline never
/// validates the profile it is given; these checks belong to callers that
/// load profiles from configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterialError {
    /// No material with this identifier exists in the library
    #[error("Material '{id}' not found")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// Two materials share the same identifier
    #[error("Duplicate material id '{id}'")]
    DuplicateId {
        /// The duplicated identifier.
        id: String,
    },

    /// Feed rate must be strictly positive
    #[error("Material '{id}' has non-positive feed rate {feed_rate}")]
    InvalidFeedRate {
        /// The material identifier.
        id: String,
        /// The offending feed rate in mm/min.
        feed_rate: f64,
    },

    /// A tier carries a negative or non-finite dwell duration
    #[error("Material '{id}' has invalid {tier} pause duration {seconds}")]
    InvalidPause {
        /// The material identifier.
        id: String,
        /// Tier name (short, medium, long).
        tier: String,
        /// The offending duration in seconds.
        seconds: f64,
    },

    /// The material identifier is empty
    #[error("Material identifier must not be empty")]
    EmptyId,
}

/// Input error type
///
/// Represents failures turning a caller-supplied file into the text the
/// pipeline consumes.
#[derive(Error, Debug)]
pub enum InputError {
    /// The file is not valid UTF-8 text
    #[error("File '{name}' is not valid UTF-8 text")]
    NotText {
        /// The file name.
        name: String,
    },

    /// The file could not be read
    #[error("Failed to read '{name}': {source}")]
    Read {
        /// The file name.
        name: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Any failure a caller of the processing layers can hit
#[derive(Error, Debug)]
pub enum Error {
    /// Material error
    #[error(transparent)]
    Material(#[from] MaterialError),

    /// Input error
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
