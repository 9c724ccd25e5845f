//! Fixed-depth minimax search with alpha-beta pruning.
//!
//! The root maximises for the requested color and plies alternate after it.
//! Leaves, checkmates, stalemates and drawn positions all return the static
//! evaluation from the root color's perspective. With `mate_scoring` set,
//! checkmates instead return a mate score adjusted by ply so that shorter
//! mates are preferred.

use chrono::Utc;
use log::debug;

use crate::game_state::{board::Board, chess_types::*};
use crate::move_generation::draw_rules::{is_fifty_move_draw, is_insufficient_material, is_repetition};
use crate::move_generation::legal_moves::has_legal_move;
use crate::search::board_scoring::{BoardScorer, StandardScorer, MATE_SCORE};
use crate::search::move_ordering::{captured_piece, order_moves, HistoryTable, KillerTable};

const INFINITY: i32 = MATE_SCORE + 1000;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// Score checkmated nodes as +/-(`MATE_SCORE` - ply) instead of
    /// statically.
    pub mate_scoring: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            mate_scoring: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: Option<ChessMove>,
    pub best_score: i32,
    pub nodes: u64,
    pub cutoffs: u64,
    pub elapsed_ms: i64,
}

/// Per-call search state. Nothing survives between `search` calls.
#[derive(Debug, Clone)]
pub struct SearchContext {
    pub root: Color,
    pub killers: KillerTable,
    pub history: HistoryTable,
    pub nodes: u64,
    pub cutoffs: u64,
}

impl SearchContext {
    pub fn new(root: Color) -> Self {
        Self {
            root,
            killers: KillerTable::default(),
            history: HistoryTable::default(),
            nodes: 0,
            cutoffs: 0,
        }
    }
}

pub struct MinimaxSearch {
    config: SearchConfig,
    scorer: Box<dyn BoardScorer>,
}

impl MinimaxSearch {
    pub fn new(config: SearchConfig, scorer: Box<dyn BoardScorer>) -> Self {
        Self { config, scorer }
    }

    pub fn with_standard_scorer(config: SearchConfig) -> Self {
        Self::new(config, Box::new(StandardScorer))
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Best move for `color` on `board`. `best_move` is `None` when `color`
    /// has no legal move or the configured depth is zero.
    pub fn search(&self, board: &Board, color: Color) -> SearchReport {
        let started = Utc::now();
        let mut ctx = SearchContext::new(color);

        let mut root = board.clone();
        root.side_to_move = color;

        let moves = root.all_legal_moves(color);
        let mut report = SearchReport::default();

        if moves.is_empty() || self.config.max_depth == 0 {
            ctx.nodes = 1;
            report.best_score = if moves.is_empty() {
                self.terminal_score(&root, 0, &ctx)
            } else {
                self.scorer.score(&root, color)
            };
        } else {
            let ordered = order_moves(&root, moves, &ctx.killers, &ctx.history, 0);
            let mut alpha = -INFINITY;
            let beta = INFINITY;
            let mut best_score = -INFINITY;

            for mv in ordered {
                let mut next = root.clone();
                next.play_unchecked(mv);
                let score =
                    self.minimax(&next, self.config.max_depth - 1, alpha, beta, 1, &mut ctx);
                debug!("root move {mv} scored {score}");

                if score > best_score {
                    best_score = score;
                    report.best_move = Some(mv);
                }
                alpha = alpha.max(score);
            }
            report.best_score = best_score;
        }

        report.nodes = ctx.nodes;
        report.cutoffs = ctx.cutoffs;
        report.elapsed_ms = (Utc::now() - started).num_milliseconds();

        debug!(
            "search depth={} best={:?} score={} nodes={} cutoffs={} elapsed_ms={}",
            self.config.max_depth,
            report.best_move.map(|mv| mv.to_string()),
            report.best_score,
            report.nodes,
            report.cutoffs,
            report.elapsed_ms
        );

        report
    }

    fn minimax(
        &self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        ply: u8,
        ctx: &mut SearchContext,
    ) -> i32 {
        ctx.nodes += 1;
        let to_move = board.side_to_move();

        if depth == 0 {
            if !has_legal_move(board, to_move) {
                return self.terminal_score(board, ply, ctx);
            }
            return self.scorer.score(board, ctx.root);
        }

        let moves = board.all_legal_moves(to_move);
        if moves.is_empty() {
            return self.terminal_score(board, ply, ctx);
        }
        if is_insufficient_material(board) || is_fifty_move_draw(board) || is_repetition(board) {
            return self.scorer.score(board, ctx.root);
        }

        let maximizing = to_move == ctx.root;
        let mut best = if maximizing { -INFINITY } else { INFINITY };
        let ordered = order_moves(board, moves, &ctx.killers, &ctx.history, usize::from(ply));

        for mv in ordered {
            let mut next = board.clone();
            next.play_unchecked(mv);
            let score = self.minimax(&next, depth - 1, alpha, beta, ply + 1, ctx);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if beta <= alpha {
                ctx.cutoffs += 1;
                if captured_piece(board, mv).is_none() {
                    ctx.killers.record(usize::from(ply), mv);
                    ctx.history.record(mv, depth);
                }
                break;
            }
        }

        best
    }

    // Side to move has no legal move: mate if in check, otherwise stalemate.
    fn terminal_score(&self, board: &Board, ply: u8, ctx: &SearchContext) -> i32 {
        let to_move = board.side_to_move();
        if !self.config.mate_scoring || !board.is_check(to_move) {
            return self.scorer.score(board, ctx.root);
        }
        if to_move == ctx.root {
            -MATE_SCORE + i32::from(ply)
        } else {
            MATE_SCORE - i32::from(ply)
        }
    }
}
