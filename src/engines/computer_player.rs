//! Computer player: opening book first, search on a miss.

use std::sync::Arc;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{EngineConfig, SearchStrategy};
use crate::errors::MoveResult;
use crate::game_state::{board::Board, chess_types::*};
use crate::search::minimax::{MinimaxSearch, SearchConfig, SearchReport};
use crate::tables::opening_book::OpeningBook;

pub struct ComputerPlayer {
    color: Color,
    strategy: Box<dyn SearchStrategy>,
    book: Option<Arc<OpeningBook>>,
    rng: StdRng,
    last_move: Option<ChessMove>,
    last_report: Option<SearchReport>,
}

impl ComputerPlayer {
    pub fn new(
        color: Color,
        strategy: Box<dyn SearchStrategy>,
        book: Option<Arc<OpeningBook>>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            color,
            strategy,
            book,
            rng,
            last_move: None,
            last_report: None,
        }
    }

    /// Minimax with the standard evaluator at `depth`, plus the embedded book.
    pub fn create(color: Color, depth: u8) -> Self {
        let config = EngineConfig {
            search: SearchConfig {
                max_depth: depth,
                ..SearchConfig::default()
            },
            ..EngineConfig::default()
        };
        Self::from_config(color, &config)
    }

    pub fn from_config(color: Color, config: &EngineConfig) -> Self {
        let strategy = Box::new(MinimaxSearch::with_standard_scorer(config.search));
        let book = if config.use_opening_book {
            load_book(config).map(Arc::new)
        } else {
            None
        };
        Self::new(color, strategy, book, config.seed)
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn last_move(&self) -> Option<ChessMove> {
        self.last_move
    }

    /// Report of the most recent search; book moves do not produce one.
    #[inline]
    pub fn last_report(&self) -> Option<SearchReport> {
        self.last_report
    }

    /// Pick a move without touching the board. Book moves are checked
    /// against the legal set before being trusted.
    pub fn choose_move(&mut self, board: &Board) -> Option<ChessMove> {
        if let Some(book) = &self.book {
            if let Some(book_move) = book.choose_move(board, &mut self.rng) {
                if is_legal_for(board, self.color, book_move) {
                    info!("opening book move {book_move} for {:?}", self.color);
                    self.last_report = None;
                    return Some(book_move);
                }
                warn!("opening book suggested illegal move {book_move}; searching instead");
            }
        }

        let report = self.strategy.analyse(board, self.color);
        self.last_report = Some(report);
        report.best_move
    }

    /// Choose and play a move. `Ok(None)` means there was nothing to play.
    pub fn make_move(&mut self, board: &mut Board) -> MoveResult<Option<ChessMove>> {
        let Some(chosen) = self.choose_move(board) else {
            return Ok(None);
        };
        board.apply_move(chosen)?;
        self.last_move = Some(chosen);
        Ok(Some(chosen))
    }
}

fn load_book(config: &EngineConfig) -> Option<OpeningBook> {
    let book = match &config.book_path {
        None => OpeningBook::load_default(),
        Some(path) => match OpeningBook::from_path(path) {
            Ok(book) => book,
            Err(e) => {
                warn!(
                    "opening book {} unavailable ({e}); playing without it",
                    path.display()
                );
                return None;
            }
        },
    };
    Some(book.with_top_n(config.book_top_n))
}

fn is_legal_for(board: &Board, color: Color, candidate: ChessMove) -> bool {
    board
        .all_legal_moves(color)
        .iter()
        .any(|mv| mv.from == candidate.from && mv.to == candidate.to)
}
