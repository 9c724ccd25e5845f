//! Engine abstraction layer.
//!
//! Search strategies sit behind a single trait so a player can be built with
//! any of them, and `EngineConfig` carries the knobs used to assemble the
//! standard player.

use std::path::PathBuf;

use crate::game_state::{board::Board, chess_types::*};
use crate::search::minimax::{MinimaxSearch, SearchConfig, SearchReport};
use crate::tables::opening_book::OpeningBook;

pub trait SearchStrategy: Send {
    /// Full search outcome for `color` on `board`.
    fn analyse(&mut self, board: &Board, color: Color) -> SearchReport;

    /// Best move for `color`, or `None` when it has no legal move.
    fn generate_best_move(&mut self, board: &Board, color: Color) -> Option<ChessMove> {
        self.analyse(board, color).best_move
    }
}

impl SearchStrategy for MinimaxSearch {
    fn analyse(&mut self, board: &Board, color: Color) -> SearchReport {
        self.search(board, color)
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub use_opening_book: bool,
    /// Book file to load; `None` uses the embedded book.
    pub book_path: Option<PathBuf>,
    pub book_top_n: usize,
    /// Seed for book choices; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            use_opening_book: true,
            book_path: None,
            book_top_n: OpeningBook::DEFAULT_TOP_N,
            seed: None,
        }
    }
}
