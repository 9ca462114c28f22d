//! # TapKit
//!
//! Thermal dwell insertion for hot-wire foam cutter programs:
//! - Removes rapid traverses, stale dwells and feed overrides
//! - Measures every cut segment with the Chebyshev metric
//! - Inserts a `G04` dwell per segment according to the material's tiers
//! - Optionally rescales the whole trajectory to a target path length
//! - Wraps the result in a templated header and statistics footer
//!
//! ## Architecture
//!
//! TapKit is organized as a workspace with multiple crates:
//!
//! 1. **tapkit-core** - Material profiles, templates, scale requests, errors
//! 2. **tapkit-processor** - The processing pipeline
//! 3. **tapkit-settings** - Configuration files
//! 4. **tapkit** - Batch runner and the command line binary

pub mod batch;

pub use tapkit_core::{
    Error, InputError, MaterialError, MaterialId, MaterialLibrary, MaterialProfile, PauseTiers,
    Result, ScaleRequest, Template,
};

pub use tapkit_processor::{
    measure_path_length, process, process_many, ProcessedResult, ProcessingStatistics,
    SourceFile, TapProcessor,
};

pub use tapkit_settings::{Config, OutputSettings, SettingsError};

pub use batch::{BatchRunner, FileJob, InputFile, JobStatus};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout for program output
/// - RUST_LOG environment variable support
/// - INFO by default, DEBUG when `verbose` is set
/// - JSON lines instead of human readable text when `json` is set
pub fn init_logging(verbose: bool, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(verbose)
            .with_level(true)
            .with_line_number(verbose);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
