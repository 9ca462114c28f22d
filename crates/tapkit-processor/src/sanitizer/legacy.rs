//! Removal of header/footer scaffolding left by an earlier run
//!
//! A file that went through the pipeline, was hand-edited and then
//! resubmitted still carries the old header, statistics block and line
//! labels. Those are dropped here so that only the cut program is parsed
//! again.

use std::collections::HashSet;

use crate::tokenizer::{strip_line_label, LineTokens, CUT_MOTION};

/// Lowercase prefixes of header comment lines
const HEADER_PREFIXES: &[&str] = &["; projeto:", "; data:", "; tipo de eps:", "; feed rate:"];

/// Lowercase substrings that mark a header line
const HEADER_MARKERS: &[&str] = &[
    "=== inicio do corte ===",
    "modo absoluto",
    "zera a origem",
    "velocidade base",
];

/// Lowercase substrings that open the footer; everything after is dropped
const FOOTER_MARKERS: &[&str] = &[
    "=== fim do corte ===",
    "=== finalizacao ===",
    "=== estatisticas ===",
    "=== creditos ===",
    "g-code gerado por",
    "eleva digital midia",
    "danilo pellens",
    "whatsapp",
    "distancia total",
    "tempo estimado",
    "pausas inseridas",
];

/// Program end word; a line holding only this opens the footer
const PROGRAM_END: &str = "M30";

fn is_header_marker(lower: &str) -> bool {
    HEADER_PREFIXES.iter().any(|p| lower.starts_with(p))
        || HEADER_MARKERS.iter().any(|m| lower.contains(m))
}

fn is_footer_marker(lower: &str, trimmed: &str) -> bool {
    FOOTER_MARKERS.iter().any(|m| lower.contains(m)) || trimmed.eq_ignore_ascii_case(PROGRAM_END)
}

/// Whether a line inside a detected header is still setup code
///
/// The header ends at the first cut move carrying an X or Y target, or at
/// the first line that is not recognisable setup.
fn is_header_setup(trimmed: &str) -> bool {
    if trimmed.is_empty() || trimmed.starts_with(';') {
        return true;
    }

    let tokens = LineTokens::scan(trimmed);
    if tokens.is_cut_move() && (tokens.find('X').is_some() || tokens.find('Y').is_some()) {
        return false;
    }
    if tokens.has_g(90) || tokens.has_g(92) {
        return true;
    }

    match tokens.words().first() {
        Some(w) if w.letter == 'F' && w.number().is_some() => true,
        Some(w) if matches!(w.letter, 'N' | 'M') && w.code().is_some() => true,
        Some(w) if w.letter == 'G' && w.code() != Some(CUT_MOTION) => true,
        _ => false,
    }
}

/// Whether a line is a bare feed-rate declaration such as `F600`
fn is_feed_declaration(trimmed: &str) -> bool {
    let tokens = LineTokens::scan(trimmed);
    matches!(tokens.words(), [w] if w.letter == 'F' && w.number().is_some())
        && tokens.code().trim() == trimmed
}

/// Strip header, footer and line labels produced by a previous run
///
/// Never fails; lines it does not recognise are kept as they are.
pub fn strip_legacy_output(content: &str) -> String {
    let mut cleaned: Vec<&str> = Vec::new();
    let mut seen_feed: HashSet<String> = HashSet::new();

    let mut inside_header = false;
    let mut inside_footer = false;
    let mut header_end_found = false;

    for line in content.split('\n') {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();

        if !header_end_found && is_header_marker(&lower) {
            inside_header = true;
            continue;
        }

        if inside_header {
            if is_header_setup(trimmed) {
                continue;
            }
            inside_header = false;
            header_end_found = true;
        }

        if is_footer_marker(&lower, trimmed) {
            inside_footer = true;
        }
        if inside_footer {
            continue;
        }

        let clean = strip_line_label(line);

        if clean.trim().is_empty() && cleaned.last().is_some_and(|l| l.trim().is_empty()) {
            continue;
        }

        if is_feed_declaration(clean.trim()) && !seen_feed.insert(clean.trim().to_uppercase()) {
            continue;
        }

        cleaned.push(clean);
    }

    while cleaned.last().is_some_and(|l| l.trim().is_empty()) {
        cleaned.pop();
    }

    cleaned.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_program_passes_through() {
        let input = "G01 X10 Y0\nG01 X20 Y5";
        assert_eq!(strip_legacy_output(input), input);
    }

    #[test]
    fn test_header_and_footer_removed() {
        let input = "; Projeto: peca\n; Data: 01/01/2024 10:00:00\n\n; === INICIO DO CORTE ===\nG90             ; Modo absoluto\nG92 X0 Y0       ; Zera a origem\nF600            ; Velocidade base\n\nN1 G01 X10 Y0\nN2 G04 P0.3\nN3 G01 X20 Y0\n\n; === FINALIZACAO ===\n; Fim do programa\n; Distancia total: 20.00 mm\n;FIM";
        assert_eq!(
            strip_legacy_output(input),
            "G01 X10 Y0\nG04 P0.3\nG01 X20 Y0"
        );
    }

    #[test]
    fn test_modal_prefixed_moves_end_header() {
        let input = "; === INICIO DO CORTE ===\nG90\nF600\n\nN1 G90 G01 X0 Y0\nN2 G04 P0.0\nN3 G90 G01 X10 Y0\n; === ESTATISTICAS ===";
        assert_eq!(
            strip_legacy_output(input),
            "G90 G01 X0 Y0\nG04 P0.0\nG90 G01 X10 Y0"
        );
    }

    #[test]
    fn test_header_ends_at_unknown_line() {
        let input = "; Projeto: x\nG91\nT1\nG01 X5";
        assert_eq!(strip_legacy_output(input), "T1\nG01 X5");
    }

    #[test]
    fn test_program_end_opens_footer() {
        let input = "G01 X1\nm30\nG01 X2";
        assert_eq!(strip_legacy_output(input), "G01 X1");
    }

    #[test]
    fn test_duplicate_blank_lines_collapse() {
        let input = "G01 X1\n\n\n\nG01 X2\n\n";
        assert_eq!(strip_legacy_output(input), "G01 X1\n\nG01 X2");
    }

    #[test]
    fn test_duplicate_feed_declaration_dropped() {
        let input = "F600\nG01 X1\nF600\nF500\nG01 X2";
        assert_eq!(strip_legacy_output(input), "F600\nG01 X1\nF500\nG01 X2");
    }

    #[test]
    fn test_line_labels_stripped() {
        let input = "N10 G01 X1\nn20 G01 X2\nN30";
        assert_eq!(strip_legacy_output(input), "G01 X1\nG01 X2\nN30");
    }
}
