//! # TapKit Processor
//!
//! Dwell insertion pipeline for hot-wire foam cutter programs.
//! Includes the line tokenizer, input sanitizer, geometry extraction,
//! trajectory scaling, pause classification, output assembly, statistics
//! and output file naming.

pub mod assembler;
pub mod classifier;
pub mod detector;
pub mod filename;
pub mod geometry;
pub mod pipeline;
pub mod sanitizer;
pub mod scale;
pub mod stats;
pub mod tokenizer;

pub use assembler::{assemble, AssemblyContext, DATE_FORMAT};
pub use classifier::{classify, Classification, Dwell, PauseCounts, PausePlan, PauseTier};
pub use detector::{is_already_processed, ProcessedMarkers};
pub use filename::sanitize_filename;
pub use geometry::{extract_moves, segments, total_distance, CutMove, Segment};
pub use pipeline::{
    measure_path_length, process, process_at, process_many, ProcessedResult, SourceFile,
    TapProcessor,
};
pub use sanitizer::{sanitize, sanitize_commands, strip_legacy_output, LinePipeline, LineProcessor};
pub use scale::apply_scale;
pub use stats::{CutTime, ProcessingStatistics, RemovedCommands};
