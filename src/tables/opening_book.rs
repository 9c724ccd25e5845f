//! Opening-book support backed by a flat text format.
//!
//! A `pos <fen>` line opens a position block and each following non-empty
//! line is `<long-algebraic-move> <frequency>`. Positions are keyed by the
//! first three notation fields (placement, side to move, castling), so the
//! en-passant field and clocks never affect lookups. The book is read-only
//! once built and can be shared between players.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::info;
use rand::Rng;

use crate::errors::{BookError, BookResult};
use crate::game_state::{board::Board, chess_types::ChessMove};
use crate::utils::fen_generator::generate_position_key;
use crate::utils::fen_parser::parse_fen;
use crate::utils::long_algebraic::long_algebraic_to_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookMove {
    pub chess_move: ChessMove,
    pub frequency: u32,
}

#[derive(Debug, Clone)]
pub struct OpeningBook {
    by_position: HashMap<String, Vec<BookMove>>,
    top_n: usize,
}

impl Default for OpeningBook {
    fn default() -> Self {
        Self {
            by_position: HashMap::new(),
            top_n: Self::DEFAULT_TOP_N,
        }
    }
}

impl OpeningBook {
    pub const DEFAULT_TOP_N: usize = 5;

    /// Small embedded book covering the main first moves.
    pub fn load_default() -> Self {
        Self::from_book_str(include_str!("data/opening_book.txt")).unwrap_or_default()
    }

    pub fn from_path(path: impl AsRef<Path>) -> BookResult<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let book = Self::from_book_str(&data)?;
        info!(
            "loaded opening book from {} with {} positions",
            path.display(),
            book.len()
        );
        Ok(book)
    }

    pub fn from_book_str(text: &str) -> BookResult<Self> {
        let mut by_position: HashMap<String, Vec<BookMove>> = HashMap::new();
        let mut current_key: Option<String> = None;

        for (index, raw) in text.lines().enumerate() {
            let line_number = index + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(fen) = line.strip_prefix("pos ") {
                let key = normalize_key(fen).ok_or_else(|| BookError::MalformedPosition {
                    line: line_number,
                    text: line.to_owned(),
                })?;
                current_key = Some(key);
                continue;
            }

            let key = current_key
                .as_ref()
                .ok_or(BookError::EntryWithoutPosition { line: line_number })?;
            let entry = parse_entry(line).ok_or_else(|| BookError::MalformedEntry {
                line: line_number,
                text: line.to_owned(),
            })?;

            let row = by_position.entry(key.clone()).or_default();
            match row.iter_mut().find(|known| known.chess_move == entry.chess_move) {
                Some(known) => known.frequency = known.frequency.saturating_add(entry.frequency),
                None => row.push(entry),
            }
        }

        Ok(Self {
            by_position,
            top_n: Self::DEFAULT_TOP_N,
        })
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n.max(1);
        self
    }

    /// Number of indexed positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_position.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_position.is_empty()
    }

    pub fn moves_for(&self, board: &Board) -> Option<&[BookMove]> {
        self.by_position
            .get(&generate_position_key(board))
            .map(|row| row.as_slice())
    }

    /// Up to `top_n` entries by descending frequency; ties keep file order.
    pub fn top_moves(&self, board: &Board) -> Vec<BookMove> {
        let mut moves = self.moves_for(board).map(<[BookMove]>::to_vec).unwrap_or_default();
        moves.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        moves.truncate(self.top_n);
        moves
    }

    /// Uniform pick among the top entries for the board's position.
    pub fn choose_move<R: Rng + ?Sized>(&self, board: &Board, rng: &mut R) -> Option<ChessMove> {
        let top = self.top_moves(board);
        if top.is_empty() {
            return None;
        }
        let pick = rng.random_range(0..top.len());
        Some(top[pick].chess_move)
    }
}

// Round-trip through the parser so the key matches `generate_position_key`
// regardless of castling letter order. En passant and clocks are dropped.
fn normalize_key(fen: &str) -> Option<String> {
    let fields: Vec<&str> = fen.split_whitespace().take(3).collect();
    let [placement, side, castling] = fields[..] else {
        return None;
    };
    let board = parse_fen(&format!("{placement} {side} {castling} - 0 1")).ok()?;
    Some(generate_position_key(&board))
}

fn parse_entry(line: &str) -> Option<BookMove> {
    let mut parts = line.split_whitespace();
    let chess_move = long_algebraic_to_move(parts.next()?).ok()?;
    let frequency = parts.next()?.parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(BookMove {
        chess_move,
        frequency,
    })
}
