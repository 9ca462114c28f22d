//! Detection of input that is already pipeline output

use tapkit_core::template::{START_OF_CUT_MARKER, STATISTICS_MARKER};

use crate::tokenizer::LineTokens;

/// Markers and command counts found while scanning a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessedMarkers {
    pub has_start_marker: bool,
    pub has_statistics_marker: bool,
    pub cut_moves: usize,
    pub dwells: usize,
}

impl ProcessedMarkers {
    /// Scan content for the sentinels and count move/dwell lines
    pub fn scan(content: &str) -> Self {
        let start = START_OF_CUT_MARKER.to_lowercase();
        let stats = STATISTICS_MARKER.to_lowercase();
        let mut markers = Self::default();

        for line in content.split('\n') {
            let lower = line.trim().to_lowercase();
            markers.has_start_marker |= lower.contains(&start);
            markers.has_statistics_marker |= lower.contains(&stats);

            let tokens = LineTokens::scan(line);
            if tokens.is_cut_move() {
                markers.cut_moves += 1;
            } else if tokens.is_dwell() {
                markers.dwells += 1;
            }
        }

        markers
    }

    /// Both sentinels present and one dwell per segment (within one)
    pub fn is_processed(&self) -> bool {
        self.has_start_marker
            && self.has_statistics_marker
            && self.cut_moves.abs_diff(self.dwells) <= 1
    }
}

/// Whether `content` looks like the output of a previous run
pub fn is_already_processed(content: &str) -> bool {
    let markers = ProcessedMarkers::scan(content);
    tracing::debug!(?markers, "checked for previous processing");
    markers.is_processed()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROCESSED: &str = "; === INICIO DO CORTE ===\nG90\nN1 G01 X0 Y0\nN2 G04 P0.0\nN3 G01 X10 Y0\nN4 G04 P0.3\n; === ESTATISTICAS ===";

    #[test]
    fn test_detects_processed_output() {
        assert!(is_already_processed(PROCESSED));
        let markers = ProcessedMarkers::scan(PROCESSED);
        assert_eq!(markers.cut_moves, 2);
        assert_eq!(markers.dwells, 2);
    }

    #[test]
    fn test_requires_both_markers() {
        let without_stats = PROCESSED.replace("=== ESTATISTICAS ===", "");
        assert!(!is_already_processed(&without_stats));
        let without_start = PROCESSED.replace("=== INICIO DO CORTE ===", "");
        assert!(!is_already_processed(&without_start));
    }

    #[test]
    fn test_requires_dwell_per_move() {
        let input = "; === INICIO DO CORTE ===\nG01 X1\nG01 X2\nG01 X3\nG04 P1\n; === ESTATISTICAS ===";
        assert!(!is_already_processed(input));
    }

    #[test]
    fn test_counts_moves_behind_modal_words() {
        let input = "; === INICIO DO CORTE ===\nN1 G90 G01 X0 Y0\nN2 G04 P0.0\nN3 G90 G01 X10 Y0\nN4 G04 P0.3\n; === ESTATISTICAS ===";
        let markers = ProcessedMarkers::scan(input);
        assert_eq!(markers.cut_moves, 2);
        assert_eq!(markers.dwells, 2);
        assert!(markers.is_processed());
    }

    #[test]
    fn test_plain_program_is_not_processed() {
        assert!(!is_already_processed("G01 X1\nG04 P1\nG01 X2"));
    }
}
