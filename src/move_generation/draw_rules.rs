//! Draw detection: stalemate, insufficient material, the fifty-move rule and
//! repetition inside the retained history window.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, REPETITION_COUNT};
use crate::game_state::chess_types::*;
use crate::move_generation::check::is_stalemate;

/// What one side has left, as far as mating material goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SideMaterial {
    KingAlone,
    KingKnight,
    KingBishop(Square),
    Sufficient,
}

pub fn is_draw(board: &Board, color: Color) -> bool {
    is_stalemate(board, color)
        || is_insufficient_material(board)
        || is_fifty_move_draw(board)
        || is_repetition(board)
}

/// Neither side can force mate. Two lone bishops only count when they
/// share a square color.
pub fn is_insufficient_material(board: &Board) -> bool {
    match (
        side_material(board, Color::Light),
        side_material(board, Color::Dark),
    ) {
        (SideMaterial::Sufficient, _) | (_, SideMaterial::Sufficient) => false,
        (SideMaterial::KingBishop(light), SideMaterial::KingBishop(dark)) => {
            light.is_light() == dark.is_light()
        }
        _ => true,
    }
}

#[inline]
pub fn is_fifty_move_draw(board: &Board) -> bool {
    board.halfmove_clock() >= FIFTY_MOVE_HALFMOVES
}

/// The current position appears `REPETITION_COUNT` times among the retained
/// fingerprints. The window is short, so this under-detects over long games.
pub fn is_repetition(board: &Board) -> bool {
    board.position_history().count(board.fingerprint()) >= REPETITION_COUNT
}

fn side_material(board: &Board, color: Color) -> SideMaterial {
    let mut summary = SideMaterial::KingAlone;
    for (square, piece) in board.pieces(color) {
        summary = match (summary, piece.kind) {
            (_, PieceKind::King) => summary,
            (SideMaterial::KingAlone, PieceKind::Knight) => SideMaterial::KingKnight,
            (SideMaterial::KingAlone, PieceKind::Bishop) => SideMaterial::KingBishop(square),
            _ => return SideMaterial::Sufficient,
        };
    }
    summary
}
