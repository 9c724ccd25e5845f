//! Legal move generation.
//!
//! Pseudo-legal destinations are played on a scratch copy of the board and
//! kept only when the mover's king is not attacked afterwards. Castling
//! destinations are appended separately.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::KING_START_FILE;
use crate::game_state::chess_types::*;
use crate::move_generation::castling::{can_castle, CastleSide};
use crate::move_generation::check::is_check;
use crate::move_generation::pseudo_legal::pseudo_legal_moves;

/// Legal destinations for the piece on `from`, whichever side it belongs to.
pub fn legal_moves(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.occupant(from) else {
        return Vec::new();
    };

    let mut legal: Vec<Square> = pseudo_legal_moves(board, from)
        .into_iter()
        .filter(|&to| !leaves_king_attacked(board, from, to, piece.color))
        .collect();

    if piece.kind == PieceKind::King
        && from.file() == KING_START_FILE
        && from.rank() == piece.color.home_row()
        && !is_check(board, piece.color)
    {
        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            if can_castle(board, piece.color, side) {
                if let Some(to) = Square::new(side.king_target_file(), from.rank()) {
                    legal.push(to);
                }
            }
        }
    }

    legal
}

/// Every legal move of `color`. Promotions are listed once, as a queen.
pub fn all_legal_moves(board: &Board, color: Color) -> Vec<ChessMove> {
    let mut moves = Vec::with_capacity(48);
    for (from, piece) in board.pieces(color) {
        for to in legal_moves(board, from) {
            if piece.kind == PieceKind::Pawn && (to.rank() == 0 || to.rank() == 7) {
                moves.push(ChessMove::with_promotion(from, to, PieceKind::Queen));
            } else {
                moves.push(ChessMove::new(from, to));
            }
        }
    }
    moves
}

/// Cheaper than `all_legal_moves(..).is_empty()`: stops at the first move.
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    board.pieces(color).any(|(from, piece)| {
        pseudo_legal_moves(board, from)
            .into_iter()
            .any(|to| !leaves_king_attacked(board, from, to, piece.color))
    })
}

fn leaves_king_attacked(board: &Board, from: Square, to: Square, color: Color) -> bool {
    let mut scratch = board.clone();
    scratch.apply_piece_move(from, to, None);
    is_check(&scratch, color)
}

#[cfg(test)]
mod tests {
    use super::{all_legal_moves, has_legal_move, legal_moves};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;
    use crate::move_generation::check::is_check;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let board = Board::new_game();
        assert_eq!(all_legal_moves(&board, Color::Light).len(), 20);
        assert_eq!(all_legal_moves(&board, Color::Dark).len(), 20);
    }

    #[test]
    fn every_legal_move_keeps_the_king_safe() {
        let board = Board::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");

        for mv in all_legal_moves(&board, Color::Light) {
            let mut next = board.clone();
            next.play_unchecked(mv);
            assert!(!is_check(&next, Color::Light), "{mv} exposes the king");
        }
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let board = Board::from_fen("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1").expect("FEN should parse");
        let mut moves = legal_moves(&board, sq("e1"));
        moves.sort();
        // The rook covers d1, e2 and f2; taking it on d2 is fine.
        assert_eq!(moves, vec![sq("d2"), sq("f1")]);
    }

    #[test]
    fn castling_destinations_are_appended() {
        let board =
            Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let moves = legal_moves(&board, sq("e1"));
        assert!(moves.contains(&sq("g1")));
        assert!(moves.contains(&sq("c1")));
        assert_eq!(moves.len(), 7);
    }

    #[test]
    fn promotions_are_listed_as_queen_moves() {
        let board = Board::from_fen("8/4P2k/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let promotions: Vec<_> = all_legal_moves(&board, Color::Light)
            .into_iter()
            .filter(|mv| mv.from == sq("e7"))
            .collect();
        assert_eq!(
            promotions,
            vec![ChessMove::with_promotion(sq("e7"), sq("e8"), PieceKind::Queen)]
        );
    }

    #[test]
    fn has_legal_move_agrees_with_full_generation() {
        let stalemate = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert!(!has_legal_move(&stalemate, Color::Dark));
        assert!(all_legal_moves(&stalemate, Color::Dark).is_empty());
        assert!(has_legal_move(&Board::new_game(), Color::Light));
    }
}
