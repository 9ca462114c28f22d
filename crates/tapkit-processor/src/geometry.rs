//! Cut move extraction and segment distances
//!
//! Positions are absolute; an axis missing from a line keeps the value of
//! the previous move, starting from the origin.

use serde::{Deserialize, Serialize};

use crate::tokenizer::LineTokens;

/// One cutting move with its absolute target position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutMove {
    /// Zero-based line index in the text the move was parsed from
    pub source_line_index: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// The line as it appears in that text
    pub raw_line: String,
}

/// Path between two consecutive cut moves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    pub from: &'a CutMove,
    pub to: &'a CutMove,
    /// Chebyshev distance on the XY plane
    pub distance: f64,
}

/// `max(|dx|, |dy|)`; Z is ignored
pub fn chebyshev_xy(from: &CutMove, to: &CutMove) -> f64 {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    dx.max(dy)
}

/// Parse every cut move of `content`, carrying unspecified axes forward
pub fn extract_moves(content: &str) -> Vec<CutMove> {
    let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
    let mut moves = Vec::new();

    for (index, line) in content.split('\n').enumerate() {
        let tokens = LineTokens::scan(line);
        if !tokens.is_cut_move() {
            continue;
        }

        if let Some(v) = tokens.axis('X') {
            x = v;
        }
        if let Some(v) = tokens.axis('Y') {
            y = v;
        }
        if let Some(v) = tokens.axis('Z') {
            z = v;
        }

        moves.push(CutMove {
            source_line_index: index,
            x,
            y,
            z,
            raw_line: line.to_string(),
        });
    }

    tracing::debug!(moves = moves.len(), "extracted cut moves");
    moves
}

/// One segment per consecutive pair of moves
pub fn segments(moves: &[CutMove]) -> Vec<Segment<'_>> {
    moves
        .windows(2)
        .map(|pair| Segment {
            from: &pair[0],
            to: &pair[1],
            distance: chebyshev_xy(&pair[0], &pair[1]),
        })
        .collect()
}

/// Sum of all segment distances
pub fn total_distance(moves: &[CutMove]) -> f64 {
    // Summing from +0.0 keeps an empty path from reporting -0.0
    segments(moves).iter().fold(0.0, |acc, s| acc + s.distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_carry_forward() {
        let moves = extract_moves("G01 X10 Y5 Z-2\nG01 Y8\nG01 X3");
        let positions: Vec<_> = moves.iter().map(|m| (m.x, m.y, m.z)).collect();
        assert_eq!(
            positions,
            vec![(10.0, 5.0, -2.0), (10.0, 8.0, -2.0), (3.0, 8.0, -2.0)]
        );
    }

    #[test]
    fn test_non_cut_lines_are_skipped_but_indexed() {
        let moves = extract_moves("; start\nG90\nG01 X1\nM3\nG1 X2");
        let indices: Vec<_> = moves.iter().map(|m| m.source_line_index).collect();
        assert_eq!(indices, vec![2, 4]);
        assert_eq!(moves[1].raw_line, "G1 X2");
    }

    #[test]
    fn test_chebyshev_distance() {
        let moves = extract_moves("G01 X0 Y0\nG01 X3 Y4");
        let segs = segments(&moves);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].distance, 4.0);
    }

    #[test]
    fn test_z_is_ignored() {
        let moves = extract_moves("G01 X0 Y0 Z0\nG01 Z50");
        assert_eq!(segments(&moves)[0].distance, 0.0);
    }

    #[test]
    fn test_fewer_than_two_moves() {
        assert!(segments(&extract_moves("")).is_empty());
        assert!(segments(&extract_moves("G01 X5")).is_empty());
        assert_eq!(total_distance(&extract_moves("G01 X5")), 0.0);
        assert!(total_distance(&extract_moves("G01 X5")).is_sign_positive());
    }

    #[test]
    fn test_total_distance() {
        let moves = extract_moves("G01 X0 Y0\nG01 X10 Y0\nG01 X10 Y-5");
        assert_eq!(total_distance(&moves), 15.0);
    }
}
