//! Per-piece pseudo-legal destinations and attack queries.
//!
//! Nothing here looks at whether the mover's king ends up attacked, so
//! attack detection can be built on top of it without recursing into
//! legality.

use crate::game_state::{board::Board, chess_types::*};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Destinations reachable by the piece on `from`, ignoring self-check and
/// castling. Empty when the square holds no playable piece.
pub fn pseudo_legal_moves(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.occupant(from) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(16);
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece.color, &mut out),
        PieceKind::Knight => step_moves(board, from, piece.color, &KNIGHT_OFFSETS, &mut out),
        PieceKind::Bishop => slide_moves(board, from, piece.color, &BISHOP_DIRECTIONS, &mut out),
        PieceKind::Rook => slide_moves(board, from, piece.color, &ROOK_DIRECTIONS, &mut out),
        PieceKind::Queen => {
            slide_moves(board, from, piece.color, &BISHOP_DIRECTIONS, &mut out);
            slide_moves(board, from, piece.color, &ROOK_DIRECTIONS, &mut out);
        }
        PieceKind::King => step_moves(board, from, piece.color, &KING_OFFSETS, &mut out),
        PieceKind::Highlight => {}
    }
    out
}

/// Squares a pawn of `color` on `from` attacks, occupied or not.
#[inline]
pub fn pawn_attack_squares(from: Square, color: Color) -> impl Iterator<Item = Square> {
    let forward = color.forward();
    [-1i8, 1]
        .into_iter()
        .filter_map(move |d_file| from.offset(d_file, forward))
}

/// True when the piece on `from` attacks `target`. Pawns attack their
/// forward diagonals only; every other piece attacks its pseudo-legal
/// destinations.
pub fn attacks_square(board: &Board, from: Square, target: Square) -> bool {
    match board.occupant(from) {
        Some(Piece {
            kind: PieceKind::Pawn,
            color,
        }) => pawn_attack_squares(from, color).any(|square| square == target),
        Some(_) => pseudo_legal_moves(board, from).contains(&target),
        None => false,
    }
}

fn pawn_moves(board: &Board, from: Square, color: Color, out: &mut Vec<Square>) {
    let forward = color.forward();
    let start_row = color.home_row() as i8 + forward;

    if let Some(one) = from.offset(0, forward) {
        if board.is_empty(one) {
            out.push(one);

            if from.rank() as i8 == start_row {
                if let Some(two) = one.offset(0, forward) {
                    if board.is_empty(two) {
                        out.push(two);
                    }
                }
            }
        }
    }

    for target in pawn_attack_squares(from, color) {
        if board.is_enemy(target, color) {
            out.push(target);
        } else if board.en_passant_target() == Some(target)
            && board.is_empty(target)
            && Square::new(target.file(), from.rank()).and_then(|beside| board.occupant(beside))
                == Some(Piece::new(PieceKind::Pawn, color.opposite()))
        {
            out.push(target);
        }
    }
}

fn step_moves(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_file, d_rank) in offsets {
        if let Some(target) = from.offset(d_file, d_rank) {
            if board.is_empty(target) || board.is_enemy(target, color) {
                out.push(target);
            }
        }
    }
}

fn slide_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_file, d_rank) in directions {
        let mut cursor = from.offset(d_file, d_rank);
        while let Some(target) = cursor {
            if board.is_empty(target) {
                out.push(target);
            } else {
                if board.is_enemy(target, color) {
                    out.push(target);
                }
                break;
            }
            cursor = target.offset(d_file, d_rank);
        }
    }
}
