//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and grid squares
//! for the notation codec and long-algebraic move text.

use crate::game_state::chess_types::Square;

/// Convert an algebraic coordinate (for example: "e4") to a grid square.
#[inline]
pub fn algebraic_to_square(square: &str) -> Option<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return None;
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }

    // Grid row 0 is notation rank 8.
    Square::new(file - b'a', b'8' - rank)
}

/// Convert a grid square to its algebraic coordinate (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}
