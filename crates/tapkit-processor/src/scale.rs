//! Cascading trajectory rescaling
//!
//! Each cut move's X/Y displacement from the previous move is multiplied by
//! the factor and added to the previous *scaled* position, so the whole path
//! grows by the same ratio even when it does not start at the origin. Z is
//! never scaled. The result is text; geometry is re-extracted from it.

use crate::tokenizer::LineTokens;

/// Decimal places written for rescaled coordinates
const COORDINATE_PRECISION: usize = 4;

/// Running position of one axis before and after scaling
#[derive(Debug, Clone, Copy, Default)]
struct AxisCursor {
    original: f64,
    scaled: f64,
}

impl AxisCursor {
    /// Advance to `target` and return the rescaled coordinate
    fn advance(&mut self, target: f64, factor: f64) -> f64 {
        let delta = target - self.original;
        self.original = target;
        self.scaled += delta * factor;
        self.scaled
    }
}

fn format_coordinate(value: f64) -> String {
    let rounded = format!("{:.*}", COORDINATE_PRECISION, value);
    // Never emit negative zero
    if rounded.trim_start_matches('-').bytes().all(|b| b == b'0' || b == b'.') {
        format!("{:.*}", COORDINATE_PRECISION, 0.0)
    } else {
        rounded
    }
}

/// Rescale every cut move in `content` by `factor`
///
/// Lines that are not cut moves are returned untouched. A factor of exactly
/// 1.0 still rewrites coordinates with fixed precision.
pub fn apply_scale(content: &str, factor: f64) -> String {
    let mut x = AxisCursor::default();
    let mut y = AxisCursor::default();
    let mut rescaled_lines = 0usize;

    let lines: Vec<String> = content
        .split('\n')
        .map(|line| {
            let tokens = LineTokens::scan(line);
            if !tokens.is_cut_move() {
                return line.to_string();
            }

            // Replacements are applied right to left so earlier spans stay valid
            let mut edits = Vec::with_capacity(2);
            for (letter, cursor) in [('X', &mut x), ('Y', &mut y)] {
                if let Some(word) = tokens.find(letter) {
                    if let Some(target) = word.number() {
                        let value = cursor.advance(target, factor);
                        edits.push((word.value_span.clone(), format_coordinate(value)));
                    }
                }
            }

            if edits.is_empty() {
                return line.to_string();
            }

            rescaled_lines += 1;
            edits.sort_by_key(|(span, _)| std::cmp::Reverse(span.start));
            let mut out = line.to_string();
            for (span, text) in edits {
                out.replace_range(span, &text);
            }
            out
        })
        .collect();

    tracing::debug!(factor, rescaled_lines, "applied trajectory scale");
    lines.join("\n")
}
