//! Perft node counting for move-generation verification and benchmarks.
//!
//! Underpromotions are folded into the queen promotion, so counts match the
//! published tables only for positions and depths without promotions.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::check::{is_check, is_checkmate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(board: &Board, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in board.all_legal_moves(board.side_to_move()) {
        total.merge(perft_recurse(board, mv, depth));
    }
    total
}

/// Node count below each root move, in generation order.
pub fn perft_divide(board: &Board, depth: u8) -> Vec<(ChessMove, usize)> {
    if depth == 0 {
        return Vec::new();
    }

    board
        .all_legal_moves(board.side_to_move())
        .into_iter()
        .map(|mv| (mv, perft_recurse(board, mv, depth).nodes))
        .collect()
}

fn perft_recurse(board: &Board, mv: ChessMove, depth: u8) -> PerftCounts {
    let mut next = board.clone();
    next.play_unchecked(mv);

    if depth == 1 {
        return leaf_counts(board, mv, &next);
    }

    let mut counts = PerftCounts::default();
    for child in next.all_legal_moves(next.side_to_move()) {
        counts.merge(perft_recurse(&next, child, depth - 1));
    }
    counts
}

fn leaf_counts(before: &Board, mv: ChessMove, after: &Board) -> PerftCounts {
    let mut counts = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };

    let Some(mover) = before.occupant(mv.from) else {
        return counts;
    };

    let en_passant = mover.kind == PieceKind::Pawn
        && mv.from.file() != mv.to.file()
        && before.is_empty(mv.to);
    if before.occupant(mv.to).is_some() || en_passant {
        counts.captures = 1;
    }
    if en_passant {
        counts.en_passant = 1;
    }
    if mover.kind == PieceKind::King && mv.from.file().abs_diff(mv.to.file()) == 2 {
        counts.castles = 1;
    }
    if mover.kind == PieceKind::Pawn && (mv.to.rank() == 0 || mv.to.rank() == 7) {
        counts.promotions = 1;
    }

    let defender = after.side_to_move();
    if is_check(after, defender) {
        counts.checks = 1;
        if is_checkmate(after, defender) {
            counts.checkmates = 1;
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::{perft, perft_divide, PerftCounts};
    use crate::game_state::board::Board;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    #[test]
    fn perft_depth_zero_counts_single_node() {
        assert_eq!(
            perft(&Board::new_game(), 0),
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn starting_position_node_counts() {
        let board = Board::new_game();
        assert_eq!(perft(&board, 1).nodes, 20);
        assert_eq!(perft(&board, 2).nodes, 400);

        let depth_three = perft(&board, 3);
        assert_eq!(depth_three.nodes, 8902);
        assert_eq!(depth_three.captures, 34);
        assert_eq!(depth_three.checks, 12);
        assert_eq!(depth_three.checkmates, 0);
    }

    #[test]
    fn kiwipete_node_counts() {
        let board = Board::from_fen(KIWIPETE).expect("FEN should parse");

        let depth_one = perft(&board, 1);
        assert_eq!(depth_one.nodes, 48);
        assert_eq!(depth_one.captures, 8);
        assert_eq!(depth_one.castles, 2);

        let depth_two = perft(&board, 2);
        assert_eq!(depth_two.nodes, 2039);
        assert_eq!(depth_two.captures, 351);
        assert_eq!(depth_two.en_passant, 1);
        assert_eq!(depth_two.castles, 91);
        assert_eq!(depth_two.checks, 3);
    }

    #[test]
    fn divide_sums_to_perft() {
        let board = Board::new_game();
        let divided = perft_divide(&board, 2);
        assert_eq!(divided.len(), 20);
        assert!(divided.iter().all(|(_, nodes)| *nodes == 20));
        assert_eq!(divided.iter().map(|(_, nodes)| nodes).sum::<usize>(), 400);
    }
}
