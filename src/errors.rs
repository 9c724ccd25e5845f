//! Errors used throughout the rules and search core.
//!
//! Malformed notation, illegal move attempts and opening-book loading each
//! get their own enum so callers can match on the failure class they care
//! about. None of these represent fatal conditions: the board is never left
//! partially initialised or partially mutated when one is returned.

use crate::game_state::chess_types::{Color, Square};

/// Reasons a position-notation string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("missing {0} field in position notation")]
    MissingField(&'static str),

    #[error("position notation has extra trailing fields")]
    ExtraFields,

    #[error("board layout must contain 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} describes {squares} squares instead of 8")]
    RankLength { rank: usize, squares: usize },

    #[error("invalid empty-square count '{0}'")]
    InvalidEmptyRun(char),

    #[error("invalid piece character '{0}' in board layout")]
    InvalidPiece(char),

    #[error("position must contain exactly one {color:?} king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("invalid side-to-move field: {0}")]
    InvalidActiveColor(String),

    #[error("invalid castling rights character: {0}")]
    InvalidCastling(char),

    #[error("invalid en-passant square: {0}")]
    InvalidEnPassant(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Reasons `Board::make_move` refuses a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("coordinate ({file}, {rank}) is off the board")]
    OutOfBounds { file: i32, rank: i32 },

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("piece on {square} belongs to {owner:?}, but {to_move:?} is to move")]
    NotYourPiece {
        square: Square,
        owner: Color,
        to_move: Color,
    },

    #[error("{from} -> {to} is not a legal destination")]
    NotLegal { from: Square, to: Square },

    #[error("{from} -> {to} would leave the king attacked")]
    LeavesKingInCheck { from: Square, to: Square },

    #[error("castling {from} -> {to} is not allowed")]
    CastlingRejected { from: Square, to: Square },

    #[error("invalid long algebraic move: {0}")]
    InvalidNotation(String),
}

/// Reasons an opening-book file cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("line {line}: malformed position header '{text}'")]
    MalformedPosition { line: usize, text: String },

    #[error("line {line}: malformed book entry '{text}'")]
    MalformedEntry { line: usize, text: String },

    #[error("line {line}: book entry appears before any 'pos' header")]
    EntryWithoutPosition { line: usize },
}

pub type FenResult<T> = Result<T, FenError>;
pub type MoveResult<T> = Result<T, MoveError>;
pub type BookResult<T> = Result<T, BookError>;
