use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves::has_legal_move;
use crate::move_generation::pseudo_legal::{attacks_square, pseudo_legal_moves};

/// True when any piece of `by_color` attacks `square`. Built on pseudo-legal
/// generation only.
pub fn is_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    board
        .pieces(by_color)
        .any(|(from, _)| attacks_square(board, from, square))
}

#[inline]
pub fn is_check(board: &Board, color: Color) -> bool {
    let Some(king_square) = board.find_king(color) else {
        return false;
    };
    is_attacked(board, king_square, color.opposite())
}

/// In check with no move that lifts it. Each candidate is tried through
/// `Board::make_move` on a scratch copy with `color` to move.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    if !is_check(board, color) {
        return false;
    }

    let mut probe = board.clone();
    probe.side_to_move = color;

    for (from, _) in board.pieces(color) {
        for to in pseudo_legal_moves(board, from) {
            let mut scratch = probe.clone();
            if scratch.make_move(from, to, None).is_ok() && !is_check(&scratch, color) {
                return false;
            }
        }
    }
    true
}

pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !is_check(board, color) && !has_legal_move(board, color)
}

#[cfg(test)]
mod tests {
    use super::{is_attacked, is_check, is_checkmate, is_stalemate};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    #[test]
    fn starting_position_is_quiet() {
        let board = Board::new_game();
        for color in [Color::Light, Color::Dark] {
            assert!(!is_check(&board, color));
            assert!(!is_checkmate(&board, color));
            assert!(!is_stalemate(&board, color));
        }
        assert!(is_attacked(&board, sq("f3"), Color::Light));
        assert!(!is_attacked(&board, sq("e4"), Color::Light));
    }

    #[test]
    fn fools_mate_is_checkmate_for_white_only() {
        let mut board = Board::new_game();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            board
                .make_move(sq(from), sq(to), None)
                .unwrap_or_else(|e| panic!("{from}{to} should be legal: {e}"));
        }

        assert!(is_check(&board, Color::Light));
        assert!(is_checkmate(&board, Color::Light));
        assert!(!is_checkmate(&board, Color::Dark));
        assert!(!is_stalemate(&board, Color::Light));
    }

    #[test]
    fn check_with_an_escape_is_not_mate() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").expect("FEN should parse");
        assert!(is_check(&board, Color::Light));
        assert!(!is_checkmate(&board, Color::Light));
    }

    #[test]
    fn cornered_king_without_moves_is_stalemated() {
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert!(is_stalemate(&board, Color::Dark));
        assert!(!is_checkmate(&board, Color::Dark));
    }

    #[test]
    fn checkmate_query_works_for_the_side_not_to_move() {
        // Back-rank mate delivered, but the FEN still says black to move.
        let board =
            Board::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        assert!(is_checkmate(&board, Color::Dark));

        let flipped =
            Board::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 w - - 0 1").expect("FEN should parse");
        assert!(is_checkmate(&flipped, Color::Dark));
    }
}
