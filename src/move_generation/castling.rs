//! Castling validation, execution and rights bookkeeping.
//!
//! Castling is requested as a two-file king step. Validation re-checks the
//! right, king and rook identity, empty squares between them and that none
//! of the king's start, transit or destination squares is attacked.

use crate::errors::{MoveError, MoveResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{KING_START_FILE, KINGSIDE_ROOK_FILE, QUEENSIDE_ROOK_FILE};
use crate::game_state::chess_types::*;
use crate::move_generation::check::is_attacked;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    #[inline]
    const fn rook_file(self) -> u8 {
        match self {
            CastleSide::Kingside => KINGSIDE_ROOK_FILE,
            CastleSide::Queenside => QUEENSIDE_ROOK_FILE,
        }
    }

    /// File the king lands on.
    #[inline]
    pub const fn king_target_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// File the rook lands on.
    #[inline]
    const fn rook_target_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }

    // Squares between king and rook that must be empty.
    #[inline]
    const fn between_files(self) -> &'static [u8] {
        match self {
            CastleSide::Kingside => &[5, 6],
            CastleSide::Queenside => &[1, 2, 3],
        }
    }

    // King start, transit and destination.
    #[inline]
    const fn king_path_files(self) -> &'static [u8] {
        match self {
            CastleSide::Kingside => &[4, 5, 6],
            CastleSide::Queenside => &[4, 3, 2],
        }
    }

    fn from_king_step(from: Square, to: Square) -> Option<Self> {
        if from.rank() != to.rank() || from.file() != KING_START_FILE {
            return None;
        }
        match to.file() {
            6 => Some(CastleSide::Kingside),
            2 => Some(CastleSide::Queenside),
            _ => None,
        }
    }
}

#[inline]
pub fn can_castle_kingside(board: &Board, color: Color) -> bool {
    can_castle(board, color, CastleSide::Kingside)
}

#[inline]
pub fn can_castle_queenside(board: &Board, color: Color) -> bool {
    can_castle(board, color, CastleSide::Queenside)
}

pub fn can_castle(board: &Board, color: Color, side: CastleSide) -> bool {
    let has_right = match side {
        CastleSide::Kingside => board.castling_rights().kingside(color),
        CastleSide::Queenside => board.castling_rights().queenside(color),
    };
    if !has_right {
        return false;
    }

    let row = color.home_row();
    let on_home_row = |file: u8| Square::new(file, row);

    let king_in_place = on_home_row(KING_START_FILE)
        .and_then(|square| board.occupant(square))
        == Some(Piece::new(PieceKind::King, color));
    let rook_in_place = on_home_row(side.rook_file())
        .and_then(|square| board.occupant(square))
        == Some(Piece::new(PieceKind::Rook, color));
    if !king_in_place || !rook_in_place {
        return false;
    }

    let path_clear = side
        .between_files()
        .iter()
        .filter_map(|&file| on_home_row(file))
        .all(|square| board.is_empty(square));
    if !path_clear {
        return false;
    }

    !side
        .king_path_files()
        .iter()
        .filter_map(|&file| on_home_row(file))
        .any(|square| is_attacked(board, square, color.opposite()))
}

/// Validate and play a castle for the king on `from`. Rights, clocks and
/// side to move are left to the caller; on error the board is untouched.
pub fn try_perform_castle(board: &mut Board, from: Square, to: Square) -> MoveResult<()> {
    let rejected = MoveError::CastlingRejected { from, to };

    let Some(king) = board.occupant(from) else {
        return Err(rejected);
    };
    if king.kind != PieceKind::King || from.rank() != king.color.home_row() {
        return Err(rejected);
    }
    let Some(side) = CastleSide::from_king_step(from, to) else {
        return Err(rejected);
    };
    if !can_castle(board, king.color, side) {
        return Err(rejected);
    }

    relocate_castling_pieces(board, from, to);
    Ok(())
}

/// Move king and rook into their castled squares and drop both of the
/// side's rights. Assumes the castle has been validated.
pub fn relocate_castling_pieces(board: &mut Board, from: Square, to: Square) {
    let Some(king) = board.occupant(from) else {
        return;
    };
    let Some(side) = CastleSide::from_king_step(from, to) else {
        return;
    };
    let row = from.rank();

    if let (Some(rook_from), Some(rook_to)) = (
        Square::new(side.rook_file(), row),
        Square::new(side.rook_target_file(), row),
    ) {
        let rook = board.occupant(rook_from);
        board.set_piece(rook_from, None);
        board.set_piece(rook_to, rook);
    }

    board.set_piece(from, None);
    board.set_piece(to, Some(king));
    board.castling_rights.clear_both(king.color);
}

/// Clear rights after `piece` leaves `from`: any king move drops both, a
/// rook leaving its corner drops that side.
pub fn update_castling_rights(board: &mut Board, from: Square, piece: Piece) {
    match piece.kind {
        PieceKind::King => board.castling_rights.clear_both(piece.color),
        PieceKind::Rook => clear_corner_right(board, from, piece.color),
        _ => {}
    }
}

/// A rook captured on its original corner takes its right with it.
pub fn clear_rights_for_captured_rook(board: &mut Board, square: Square, victim: Piece) {
    if victim.kind == PieceKind::Rook {
        clear_corner_right(board, square, victim.color);
    }
}

fn clear_corner_right(board: &mut Board, square: Square, color: Color) {
    if square.rank() != color.home_row() {
        return;
    }
    match square.file() {
        KINGSIDE_ROOK_FILE => board.castling_rights.clear_kingside(color),
        QUEENSIDE_ROOK_FILE => board.castling_rights.clear_queenside(color),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::{can_castle_kingside, can_castle_queenside, try_perform_castle};
    use crate::errors::MoveError;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    #[test]
    fn open_back_rank_allows_both_sides() {
        let board =
            Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        assert!(can_castle_kingside(&board, Color::Light));
        assert!(can_castle_queenside(&board, Color::Light));
        assert!(can_castle_kingside(&board, Color::Dark));
        assert!(can_castle_queenside(&board, Color::Dark));
    }

    #[test]
    fn missing_right_or_blocked_path_forbids_castling() {
        let no_rights =
            Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1").expect("FEN should parse");
        assert!(!can_castle_kingside(&no_rights, Color::Light));

        let blocked =
            Board::from_fen("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1").expect("FEN should parse");
        assert!(!can_castle_queenside(&blocked, Color::Light));
        assert!(can_castle_kingside(&blocked, Color::Light));
    }

    #[test]
    fn attacked_transit_or_destination_forbids_castling() {
        // Black rook on f8 covers f1.
        let transit =
            Board::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        assert!(!can_castle_kingside(&transit, Color::Light));
        assert!(can_castle_queenside(&transit, Color::Light));

        // Black rook on g8 covers only the destination g1.
        let destination =
            Board::from_fen("4k1r1/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        assert!(!can_castle_kingside(&destination, Color::Light));

        // b1 may be attacked on the queenside; the king never crosses it.
        let b_file =
            Board::from_fen("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        assert!(can_castle_queenside(&b_file, Color::Light));
    }

    #[test]
    fn king_in_check_cannot_castle() {
        let board =
            Board::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        assert!(!can_castle_kingside(&board, Color::Light));
        assert!(!can_castle_queenside(&board, Color::Light));
    }

    #[test]
    fn failed_castle_leaves_board_untouched() {
        let mut board =
            Board::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let before = board.clone();
        assert_eq!(
            try_perform_castle(&mut board, sq("e1"), sq("g1")),
            Err(MoveError::CastlingRejected {
                from: sq("e1"),
                to: sq("g1")
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn queenside_castle_relocates_rook_to_d_file() {
        let mut board =
            Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        try_perform_castle(&mut board, sq("e1"), sq("c1")).expect("castle should succeed");

        assert_eq!(
            board.occupant(sq("c1")),
            Some(Piece::new(PieceKind::King, Color::Light))
        );
        assert_eq!(
            board.occupant(sq("d1")),
            Some(Piece::new(PieceKind::Rook, Color::Light))
        );
        assert!(board.is_empty(sq("a1")));
        assert!(board.is_empty(sq("e1")));
        assert!(!board.castling_rights().light_kingside);
    }
}
