//! Line processor implementations used by the command sanitizer

use super::LineProcessor;
use crate::tokenizer::{is_label_only, LineTokens};

/// Drops rapid traverse commands
///
/// Rapid moves only reposition the wire; every cut in the output is a
/// linear move.
#[derive(Debug, Clone, Default)]
pub struct RapidTraverseFilter;

impl RapidTraverseFilter {
    pub fn new() -> Self {
        Self
    }
}

impl LineProcessor for RapidTraverseFilter {
    fn name(&self) -> &str {
        "rapid_traverse_filter"
    }

    fn description(&self) -> &str {
        "Removes rapid traverse (G0/G00) commands"
    }

    fn process(&self, line: &str) -> Option<String> {
        if LineTokens::scan(line).is_rapid() {
            None
        } else {
            Some(line.to_string())
        }
    }
}

/// Drops existing dwell commands so they can be regenerated
#[derive(Debug, Clone, Default)]
pub struct DwellFilter;

impl DwellFilter {
    pub fn new() -> Self {
        Self
    }
}

impl LineProcessor for DwellFilter {
    fn name(&self) -> &str {
        "dwell_filter"
    }

    fn description(&self) -> &str {
        "Removes existing dwell (G4/G04) commands"
    }

    fn process(&self, line: &str) -> Option<String> {
        if LineTokens::scan(line).is_dwell() {
            None
        } else {
            Some(line.to_string())
        }
    }
}

/// Removes every `F<number>` word from the code part of a line
///
/// The feed rate in the output comes from the material profile only.
#[derive(Debug, Clone, Default)]
pub struct FeedRateStripper;

impl FeedRateStripper {
    pub fn new() -> Self {
        Self
    }
}

impl LineProcessor for FeedRateStripper {
    fn name(&self) -> &str {
        "feed_rate_stripper"
    }

    fn description(&self) -> &str {
        "Strips feed rate words; feed rate is taken from the material"
    }

    fn process(&self, line: &str) -> Option<String> {
        let tokens = LineTokens::scan(line);
        let spans: Vec<_> = tokens
            .words()
            .iter()
            .filter(|w| w.letter == 'F' && w.number().is_some())
            .map(|w| w.span.clone())
            .collect();

        if spans.is_empty() {
            return Some(line.to_string());
        }

        let mut out = line.to_string();
        for span in spans.into_iter().rev() {
            out.replace_range(span, " ");
        }
        Some(out)
    }
}

/// Drops lines left empty or holding only a line label
#[derive(Debug, Clone, Default)]
pub struct EmptyLineRemover;

impl EmptyLineRemover {
    pub fn new() -> Self {
        Self
    }
}

impl LineProcessor for EmptyLineRemover {
    fn name(&self) -> &str {
        "empty_line_remover"
    }

    fn description(&self) -> &str {
        "Removes empty lines and lines holding only a line label"
    }

    fn process(&self, line: &str) -> Option<String> {
        if line.trim().is_empty() || is_label_only(line) {
            None
        } else {
            Some(line.to_string())
        }
    }
}

/// Collapses runs of whitespace and trims the line
#[derive(Debug, Clone, Default)]
pub struct WhitespaceProcessor;

impl WhitespaceProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl LineProcessor for WhitespaceProcessor {
    fn name(&self) -> &str {
        "whitespace"
    }

    fn description(&self) -> &str {
        "Collapses repeated whitespace and trims each line"
    }

    fn process(&self, line: &str) -> Option<String> {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            None
        } else {
            Some(collapsed)
        }
    }
}
