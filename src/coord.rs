//! GTP vertex notation ("D4", "pass") for boards of any supported size.
//!
//! Columns use letters A-Z skipping I; rows count from 1 at the bottom edge.
//! Internally `(x, y)` has `y = 0` at the top, so row `r` maps to
//! `y = size - r`.

use crate::board::Move;
use crate::grid::Point;

/// Parse a vertex string into a move on a board of `size`.
///
/// Returns `None` for malformed text or points off the board.
pub fn parse_vertex(s: &str, size: usize) -> Option<Move> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("pass") {
        return Some(Move::Pass);
    }

    let bytes = s.as_bytes();
    if bytes.len() < 2 {
        return None;
    }

    let col_char = bytes[0].to_ascii_uppercase();
    if !col_char.is_ascii_uppercase() || col_char == b'I' {
        return None;
    }
    let mut col = (col_char - b'A') as usize;
    // Skip 'I' column (Go convention to avoid confusion with 'J')
    if col_char > b'I' {
        col -= 1;
    }

    let row: usize = s[1..].parse().ok()?;
    if col >= size || row == 0 || row > size {
        return None;
    }
    Some(Move::Play((col, size - row)))
}

/// Format a point as a vertex string.
pub fn point_to_vertex((x, y): Point, size: usize) -> String {
    let mut c = b'A' + x as u8;
    if c >= b'I' {
        c += 1;
    }
    format!("{}{}", c as char, size - y)
}

/// Format a move as a vertex string ("pass" for passes).
pub fn move_to_vertex(mv: Move, size: usize) -> String {
    match mv {
        Move::Play(pt) => point_to_vertex(pt, size),
        Move::Pass => "pass".into(),
    }
}
