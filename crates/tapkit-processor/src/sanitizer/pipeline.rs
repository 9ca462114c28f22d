//! Line processor pipeline

use std::sync::Arc;

/// Trait for line processors
///
/// Processors transform or drop single lines of machine code. They are
/// applied in a pipeline to clean input before geometry extraction.
///
/// # Examples
/// - Rapid traverse removal
/// - Dwell removal
/// - Feed rate stripping
/// - Whitespace normalization
pub trait LineProcessor: Send + Sync {
    /// Short identifier, unique within a pipeline
    fn name(&self) -> &str;

    /// One-line summary for listings
    fn description(&self) -> &str;

    /// Process a single line
    ///
    /// Returns the rewritten line, or `None` to drop it. Processors never
    /// fail: a line they do not understand is returned unchanged.
    fn process(&self, line: &str) -> Option<String>;

    /// Disabled processors are skipped
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Shared processor handle
pub type LineProcessorHandle = Arc<dyn LineProcessor>;

/// Ordered chain of line processors
///
/// A processor that drops a line ends the chain for that line.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use tapkit_processor::sanitizer::{LinePipeline, RapidTraverseFilter, WhitespaceProcessor};
///
/// let mut pipeline = LinePipeline::new();
/// pipeline.register(Arc::new(RapidTraverseFilter::new()));
/// pipeline.register(Arc::new(WhitespaceProcessor::new()));
///
/// assert_eq!(pipeline.process_text("G00 X1\nG01   X2"), "G01 X2");
/// ```
#[derive(Clone, Default)]
pub struct LinePipeline {
    processors: Vec<LineProcessorHandle>,
}

impl LinePipeline {
    /// Empty chain; every line passes through
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
        }
    }

    /// Append a processor; it runs after those already registered
    pub fn register(&mut self, processor: LineProcessorHandle) -> &mut Self {
        self.processors.push(processor);
        self
    }

    /// Append several processors in order
    pub fn register_all(&mut self, processors: Vec<LineProcessorHandle>) -> &mut Self {
        self.processors.extend(processors);
        self
    }

    pub fn processor_count(&self) -> usize {
        self.processors.len()
    }

    /// `(name, description, enabled)` for each processor, in order
    pub fn list_processors(&self) -> Vec<(&str, &str, bool)> {
        self.processors
            .iter()
            .map(|p| (p.name(), p.description(), p.is_enabled()))
            .collect()
    }

    /// Run one line through every enabled processor
    pub fn process_line(&self, line: &str) -> Option<String> {
        let mut current = line.to_string();

        for processor in self.processors.iter().filter(|p| p.is_enabled()) {
            match processor.process(&current) {
                Some(next) => current = next,
                None => {
                    tracing::trace!(processor = processor.name(), line, "line dropped");
                    return None;
                }
            }
        }

        Some(current)
    }

    /// Run every line of a text and join the survivors with `\n`
    pub fn process_text(&self, text: &str) -> String {
        text.split('\n')
            .filter_map(|line| self.process_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Debug for LinePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinePipeline")
            .field(
                "processors",
                &self.processors.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl LineProcessor for Upper {
        fn name(&self) -> &str {
            "upper"
        }
        fn description(&self) -> &str {
            "uppercases"
        }
        fn process(&self, line: &str) -> Option<String> {
            Some(line.to_uppercase())
        }
    }

    struct DropAll;

    impl LineProcessor for DropAll {
        fn name(&self) -> &str {
            "drop_all"
        }
        fn description(&self) -> &str {
            "drops everything"
        }
        fn process(&self, _line: &str) -> Option<String> {
            None
        }
        fn is_enabled(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_pipeline_order_and_disabled_processors() {
        let mut pipeline = LinePipeline::new();
        pipeline.register(Arc::new(DropAll)).register(Arc::new(Upper));

        assert_eq!(pipeline.processor_count(), 2);
        assert_eq!(pipeline.process_line("g1 x1"), Some("G1 X1".to_string()));

        let listed = pipeline.list_processors();
        assert_eq!(listed[0], ("drop_all", "drops everything", false));
        assert_eq!(listed[1].0, "upper");
    }

    #[test]
    fn test_empty_pipeline_passes_through() {
        let pipeline = LinePipeline::new();
        assert_eq!(pipeline.process_text("a\nb"), "a\nb");
    }

    #[test]
    fn test_register_all_keeps_order() {
        let mut pipeline = LinePipeline::new();
        pipeline.register_all(vec![Arc::new(Upper), Arc::new(DropAll)]);
        assert_eq!(pipeline.processor_count(), 2);
        assert_eq!(pipeline.process_text("a\nb"), "A\nB");
    }
}
