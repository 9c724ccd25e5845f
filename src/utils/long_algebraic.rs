use crate::errors::{MoveError, MoveResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

/// Render a move as `<from><to>[promotion]`, e.g. `e7e8q`.
pub fn move_to_long_algebraic(chess_move: ChessMove) -> String {
    chess_move.to_string()
}

/// Parse `<from><to>[promotion]`. An unrecognised promotion letter is
/// dropped, leaving the queen default to apply.
pub fn long_algebraic_to_move(long_algebraic: &str) -> MoveResult<ChessMove> {
    let invalid = || MoveError::InvalidNotation(long_algebraic.to_owned());

    let text = long_algebraic.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(invalid());
    }

    let from = algebraic_to_square(&text[0..2]).ok_or_else(invalid)?;
    let to = algebraic_to_square(&text[2..4]).ok_or_else(invalid)?;
    let promotion = text[4..].chars().next().and_then(PieceKind::from_promotion_char);

    Ok(ChessMove { from, to, promotion })
}
