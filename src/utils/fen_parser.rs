//! FEN-to-Board parser.
//!
//! Builds a fully-populated board from a Forsyth-Edwards Notation string:
//! placement, side to move, rights, en-passant target and clocks. The
//! full-move field may be omitted and then defaults to 1. Callers normally
//! go through `Board::from_fen`, which also seeds the repetition history.

use crate::errors::{FenError, FenResult};
use crate::game_state::{board::Board, chess_types::*};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> FenResult<Board> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::MissingField("board layout"))?;
    let side_part = parts.next().ok_or(FenError::MissingField("side-to-move"))?;
    let castling_part = parts.next().ok_or(FenError::MissingField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(FenError::MissingField("en-passant square"))?;
    let halfmove_part = parts.next().ok_or(FenError::MissingField("halfmove clock"))?;
    let fullmove_part = parts.next();

    if parts.next().is_some() {
        return Err(FenError::ExtraFields);
    }

    let mut board = Board::new_empty();

    parse_board(board_part, &mut board)?;
    board.side_to_move = parse_side_to_move(side_part)?;
    board.castling_rights = parse_castling_rights(castling_part)?;
    board.en_passant_target = parse_en_passant_square(en_passant_part, board.side_to_move)?;
    board.halfmove_clock = halfmove_part
        .parse::<u32>()
        .map_err(|_| FenError::InvalidHalfmoveClock(halfmove_part.to_owned()))?;
    board.fullmove_number = match fullmove_part {
        None => 1,
        Some(text) => match text.parse::<u32>() {
            Ok(number) if number >= 1 => number,
            _ => return Err(FenError::InvalidFullmoveNumber(text.to_owned())),
        },
    };

    for color in [Color::Light, Color::Dark] {
        let count = board
            .pieces(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .count();
        if count != 1 {
            return Err(FenError::KingCount { color, count });
        }
    }

    Ok(board)
}

fn parse_board(board_part: &str, board: &mut Board) -> FenResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    // FEN lists rank 8 first, which is grid row 0.
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::InvalidEmptyRun(ch));
                }
                file += empty_count as usize;
                continue;
            }

            let piece = piece_from_fen_char(ch).ok_or(FenError::InvalidPiece(ch))?;

            if file >= 8 {
                return Err(FenError::RankLength {
                    rank: 8 - row,
                    squares: file + 1,
                });
            }

            board.grid[row][file] = Some(piece);
            file += 1;
        }

        if file != 8 {
            return Err(FenError::RankLength {
                rank: 8 - row,
                squares: file,
            });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> FenResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(FenError::InvalidActiveColor(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> FenResult<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.light_kingside = true,
            'Q' => rights.light_queenside = true,
            'k' => rights.dark_kingside = true,
            'q' => rights.dark_queenside = true,
            _ => return Err(FenError::InvalidCastling(ch)),
        }
    }

    Ok(rights)
}

/// The target sits behind a pawn that just double-stepped, so it must be on
/// rank 6 when white is to move and rank 3 when black is.
fn parse_en_passant_square(en_passant_part: &str, side_to_move: Color) -> FenResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let target_row = match side_to_move {
        Color::Light => 2,
        Color::Dark => 5,
    };
    algebraic_to_square(en_passant_part)
        .filter(|square| square.rank() == target_row)
        .map(Some)
        .ok_or_else(|| FenError::InvalidEnPassant(en_passant_part.to_owned()))
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(kind, color))
}
