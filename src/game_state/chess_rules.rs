//! Canonical chess-rule constants.
//!
//! Static literals shared by board setup, draw detection and castling.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Number of recent position fingerprints retained for repetition checks.
///
/// The window covers the last 8 half-moves only, so repetitions spread over a
/// longer stretch of the game go undetected.
pub const POSITION_HISTORY_WINDOW: usize = 8;

/// Half-move clock value at which the fifty-move rule applies.
pub const FIFTY_MOVE_HALFMOVES: u32 = 50;

/// Occurrences of one fingerprint that make a repetition draw.
pub const REPETITION_COUNT: usize = 3;

/// File the king starts on.
pub const KING_START_FILE: u8 = 4;
pub const KINGSIDE_ROOK_FILE: u8 = 7;
pub const QUEENSIDE_ROOK_FILE: u8 = 0;
