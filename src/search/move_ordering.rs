//! Move ordering: captures first by MVV-LVA, then quiet moves with killer
//! moves ahead of the history-heuristic ranking. All sorts are stable, so
//! equal keys keep generation order and search stays deterministic.

use std::cmp::Reverse;

use crate::game_state::{board::Board, chess_types::*};

pub const MAX_KILLER_PLY: usize = 64;

/// Two killer slots per ply: quiet moves that caused a cutoff there.
#[derive(Debug, Clone)]
pub struct KillerTable {
    slots: Vec<[Option<ChessMove>; 2]>,
}

impl Default for KillerTable {
    fn default() -> Self {
        Self {
            slots: vec![[None; 2]; MAX_KILLER_PLY],
        }
    }
}

impl KillerTable {
    pub fn record(&mut self, ply: usize, mv: ChessMove) {
        let Some(slot) = self.slots.get_mut(ply) else {
            return;
        };
        if slot[0] != Some(mv) {
            slot[1] = slot[0];
            slot[0] = Some(mv);
        }
    }

    /// Slot index holding `mv` at `ply`, newest first.
    pub fn rank(&self, ply: usize, mv: ChessMove) -> Option<usize> {
        self.slots
            .get(ply)
            .and_then(|slot| slot.iter().position(|&killer| killer == Some(mv)))
    }
}

/// Cutoff credit per (from, to) pair, weighted by remaining depth squared.
#[derive(Debug, Clone)]
pub struct HistoryTable {
    scores: Vec<i32>,
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self {
            scores: vec![0; 64 * 64],
        }
    }
}

impl HistoryTable {
    pub fn record(&mut self, mv: ChessMove, depth: u8) {
        let bonus = i32::from(depth) * i32::from(depth);
        let entry = &mut self.scores[mv.from.index() * 64 + mv.to.index()];
        *entry = entry.saturating_add(bonus);
    }

    #[inline]
    pub fn score(&self, mv: ChessMove) -> i32 {
        self.scores[mv.from.index() * 64 + mv.to.index()]
    }
}

/// Piece captured by `mv`, counting en-passant victims.
pub fn captured_piece(board: &Board, mv: ChessMove) -> Option<PieceKind> {
    if let Some(victim) = board.occupant(mv.to) {
        return Some(victim.kind);
    }
    match board.occupant(mv.from) {
        Some(piece)
            if piece.kind == PieceKind::Pawn
                && mv.from.file() != mv.to.file()
                && board.en_passant_target() == Some(mv.to) =>
        {
            Some(PieceKind::Pawn)
        }
        _ => None,
    }
}

/// Victim value minus attacker value, or `None` for quiet moves.
pub fn mvv_lva(board: &Board, mv: ChessMove) -> Option<i32> {
    let victim = captured_piece(board, mv)?;
    let attacker = board.occupant(mv.from)?;
    Some(victim.value() - attacker.kind.value())
}

pub fn order_moves(
    board: &Board,
    moves: Vec<ChessMove>,
    killers: &KillerTable,
    history: &HistoryTable,
    ply: usize,
) -> Vec<ChessMove> {
    let mut captures = Vec::with_capacity(moves.len());
    let mut quiets = Vec::with_capacity(moves.len());
    for mv in moves {
        match mvv_lva(board, mv) {
            Some(gain) => captures.push((gain, mv)),
            None => quiets.push(mv),
        }
    }

    captures.sort_by_key(|&(gain, _)| Reverse(gain));
    quiets.sort_by_key(|&mv| {
        (
            killers.rank(ply, mv).unwrap_or(2),
            Reverse(history.score(mv)),
        )
    });

    captures
        .into_iter()
        .map(|(_, mv)| mv)
        .chain(quiets)
        .collect()
}
