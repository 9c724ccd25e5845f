//! Static evaluation behind the `BoardScorer` trait.
//!
//! Each side is scored from its own perspective; the two scores are not
//! negated copies of one another.

use crate::game_state::{board::Board, chess_types::*};
use crate::tables::piece_square_tables::piece_square_value;

pub const MATE_SCORE: i32 = 30000;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of `color`.
    fn score(&self, board: &Board, color: Color) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        piece.value()
    }

    /// Own material minus the opponent's.
    pub fn material_balance(board: &Board, color: Color) -> i32 {
        let total = |side: Color| -> i32 {
            board
                .pieces(side)
                .map(|(_, piece)| Self::piece_value(piece.kind))
                .sum()
        };
        total(color) - total(color.opposite())
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board, color: Color) -> i32 {
        Self::material_balance(board, color)
    }
}

/// Material, piece-square tables, centre control, check threat, pawn
/// structure, mobility and king shelter.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScorer;

impl StandardScorer {
    pub const CENTER_BONUS: i32 = 10;
    pub const CHECK_BONUS: i32 = 40;
    pub const PASSED_PAWN_BONUS: i32 = 50;
    pub const ISOLATED_PAWN_PENALTY: i32 = 30;
    pub const MOBILITY_WEIGHT: i32 = 1;
    pub const KING_SHIELD_BONUS: i32 = 20;

    /// No queens left, or a single queen with at most two minor pieces.
    pub fn is_endgame(board: &Board) -> bool {
        let mut queens = 0;
        let mut minors = 0;
        for color in [Color::Light, Color::Dark] {
            for (_, piece) in board.pieces(color) {
                if piece.kind == PieceKind::Queen {
                    queens += 1;
                } else if piece.kind.is_minor() {
                    minors += 1;
                }
            }
        }
        queens == 0 || (queens == 1 && minors <= 2)
    }

    pub fn positional_term(board: &Board, color: Color) -> i32 {
        let endgame = Self::is_endgame(board);

        let center = [(3u8, 3u8), (4, 3), (3, 4), (4, 4)]
            .into_iter()
            .filter_map(|(file, rank)| Square::new(file, rank))
            .filter(|&square| matches!(board.occupant(square), Some(piece) if piece.color == color))
            .count() as i32
            * Self::CENTER_BONUS;

        let tables: i32 = board
            .pieces(color)
            .map(|(square, piece)| piece_square_value(piece.kind, color, square, endgame))
            .sum();

        center + tables
    }

    #[inline]
    pub fn threat_term(board: &Board, color: Color) -> i32 {
        if board.is_check(color.opposite()) {
            Self::CHECK_BONUS
        } else {
            0
        }
    }

    pub fn pawn_structure_term(board: &Board, color: Color) -> i32 {
        let mut score = 0;
        for (square, piece) in board.pieces(color) {
            if piece.kind != PieceKind::Pawn {
                continue;
            }

            if is_passed_pawn(board, square, color) {
                let advancement = match color {
                    Color::Light => 7 - i32::from(square.rank()),
                    Color::Dark => i32::from(square.rank()),
                };
                score += Self::PASSED_PAWN_BONUS * advancement;
            }
            if is_isolated_pawn(board, square, color) {
                score -= Self::ISOLATED_PAWN_PENALTY;
            }
        }
        score
    }

    #[inline]
    pub fn mobility_term(board: &Board, color: Color) -> i32 {
        board.all_legal_moves(color).len() as i32 * Self::MOBILITY_WEIGHT
    }

    pub fn king_safety_term(board: &Board, color: Color) -> i32 {
        let Some(king) = board.find_king(color) else {
            return 0;
        };
        let shield = Piece::new(PieceKind::Pawn, color);

        let mut safety = 0;
        for d_rank in -1..=1 {
            for d_file in -1..=1 {
                if let Some(square) = king.offset(d_file, d_rank) {
                    if board.occupant(square) == Some(shield) {
                        safety += Self::KING_SHIELD_BONUS;
                    }
                }
            }
        }
        safety
    }
}

impl BoardScorer for StandardScorer {
    fn score(&self, board: &Board, color: Color) -> i32 {
        MaterialScorer::material_balance(board, color)
            + Self::positional_term(board, color)
            + Self::threat_term(board, color)
            + Self::pawn_structure_term(board, color)
            + Self::mobility_term(board, color)
            + Self::king_safety_term(board, color)
    }
}

/// No enemy pawn ahead on the pawn's own or adjacent files.
fn is_passed_pawn(board: &Board, square: Square, color: Color) -> bool {
    let enemy_pawn = Piece::new(PieceKind::Pawn, color.opposite());
    let forward = color.forward();

    for d_file in -1i8..=1 {
        let mut cursor = square.offset(d_file, forward);
        while let Some(ahead) = cursor {
            if board.occupant(ahead) == Some(enemy_pawn) {
                return false;
            }
            cursor = ahead.offset(0, forward);
        }
    }
    true
}

/// No friendly pawn anywhere on an adjacent file.
fn is_isolated_pawn(board: &Board, square: Square, color: Color) -> bool {
    let friendly_pawn = Piece::new(PieceKind::Pawn, color);
    [-1i8, 1]
        .into_iter()
        .filter_map(|d_file| square.offset(d_file, 0))
        .all(|neighbour| {
            (0..8u8)
                .filter_map(|rank| Square::new(neighbour.file(), rank))
                .all(|on_file| board.occupant(on_file) != Some(friendly_pawn))
        })
}

#[cfg(test)]
mod tests {
    use super::{BoardScorer, MaterialScorer, StandardScorer};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::Color;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn starting_position_is_balanced() {
        let start = Board::new_game();
        assert_eq!(MaterialScorer.score(&start, Color::Light), 0);
        assert_eq!(
            StandardScorer.score(&start, Color::Light),
            StandardScorer.score(&start, Color::Dark)
        );
    }

    #[test]
    fn material_is_counted_from_the_given_side() {
        let up_a_rook = board("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        assert_eq!(MaterialScorer.score(&up_a_rook, Color::Light), 500);
        assert_eq!(MaterialScorer.score(&up_a_rook, Color::Dark), -500);
        assert!(StandardScorer.score(&up_a_rook, Color::Light) > StandardScorer.score(&up_a_rook, Color::Dark));
    }

    #[test]
    fn endgame_detection_counts_queens_and_minors() {
        assert!(!StandardScorer::is_endgame(&Board::new_game()));
        assert!(StandardScorer::is_endgame(&board("4k3/8/8/8/8/8/8/R3K3 w - - 0 1")));
        assert!(StandardScorer::is_endgame(&board("3qk3/8/8/8/8/8/8/1NB1K3 w - - 0 1")));
        assert!(!StandardScorer::is_endgame(&board("3qk3/8/8/8/8/8/8/1NBQK3 w - - 0 1")));
    }

    #[test]
    fn passed_pawn_bonus_grows_with_advancement() {
        let near = board("4k3/8/8/8/8/8/P7/4K3 w - - 0 1");
        let far = board("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        // Both pawns are passed and isolated: 50 * advancement - 30.
        assert_eq!(StandardScorer::pawn_structure_term(&near, Color::Light), 20);
        assert_eq!(StandardScorer::pawn_structure_term(&far, Color::Light), 270);
    }

    #[test]
    fn enemy_pawn_ahead_on_adjacent_file_blocks_passed_status() {
        let blocked = board("4k3/1p6/8/8/8/8/P7/4K3 w - - 0 1");
        assert_eq!(StandardScorer::pawn_structure_term(&blocked, Color::Light), -30);

        // The black pawn on b3 is behind white's a4 pawn.
        let behind = board("4k3/8/8/8/P7/1p6/8/4K3 w - - 0 1");
        assert_eq!(StandardScorer::pawn_structure_term(&behind, Color::Light), 3 * 50 - 30);
    }

    #[test]
    fn connected_pawns_are_not_isolated() {
        let pair = board("4k3/8/8/8/8/8/PP6/4K3 w - - 0 1");
        assert_eq!(StandardScorer::pawn_structure_term(&pair, Color::Light), 2 * 50);
    }

    #[test]
    fn king_shield_and_check_bonus() {
        let sheltered = board("4k3/8/8/8/8/8/5PPP/6K1 w - - 0 1");
        assert_eq!(StandardScorer::king_safety_term(&sheltered, Color::Light), 60);

        let checking = board("4k3/8/8/8/8/8/8/4RK2 b - - 0 1");
        assert_eq!(StandardScorer::threat_term(&checking, Color::Light), StandardScorer::CHECK_BONUS);
        assert_eq!(StandardScorer::threat_term(&checking, Color::Dark), 0);
    }

    #[test]
    fn centre_occupation_adds_a_bonus() {
        let centre = board("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1");
        let edge = board("4k3/8/8/8/N7/8/8/4K3 w - - 0 1");
        let gap = StandardScorer::positional_term(&centre, Color::Light)
            - StandardScorer::positional_term(&edge, Color::Light);
        // Knight table: d4 = 20, a4 = -30; plus the centre bonus.
        assert_eq!(gap, 50 + StandardScorer::CENTER_BONUS);
    }
}
