//! Input cleanup
//!
//! This module provides:
//! - Legacy output stripping (old header/footer, line labels)
//! - The line processor framework
//! - The command sanitizer built from it (rapid traverse, dwell and feed
//!   rate removal)

pub mod legacy;
pub mod pipeline;
pub mod processors;

use std::sync::Arc;

pub use legacy::strip_legacy_output;
pub use pipeline::{LinePipeline, LineProcessor, LineProcessorHandle};
pub use processors::{
    DwellFilter, EmptyLineRemover, FeedRateStripper, RapidTraverseFilter, WhitespaceProcessor,
};

impl LinePipeline {
    /// The processors run by [`sanitize_commands`], in order
    pub fn command_sanitizer() -> Self {
        let mut pipeline = Self::new();
        pipeline.register_all(vec![
            Arc::new(RapidTraverseFilter::new()),
            Arc::new(DwellFilter::new()),
            Arc::new(FeedRateStripper::new()),
            Arc::new(EmptyLineRemover::new()),
            Arc::new(WhitespaceProcessor::new()),
        ]);
        pipeline
    }
}

/// Remove rapid traverses and dwells, strip feed words, drop emptied lines
pub fn sanitize_commands(content: &str) -> String {
    LinePipeline::command_sanitizer().process_text(content)
}

/// Full cleanup: legacy scaffolding first, then the command sanitizer
pub fn sanitize(content: &str) -> String {
    let stripped = strip_legacy_output(content);
    let sanitized = sanitize_commands(&stripped);
    tracing::debug!(
        input_lines = content.split('\n').count(),
        output_lines = if sanitized.is_empty() {
            0
        } else {
            sanitized.split('\n').count()
        },
        "sanitized input"
    );
    sanitized
}
