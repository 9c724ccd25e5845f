//! Authoritative board state and move application.
//!
//! `Board` owns the 8x8 grid plus the auxiliary state a position needs: side
//! to move, castling rights, en-passant target, clocks and a short window of
//! recent position fingerprints. The live board only changes through
//! `make_move`, which validates on a private copy and commits that copy on
//! success, so a rejected move never leaves partial edits behind.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::errors::{FenResult, MoveError, MoveResult};
use crate::game_state::chess_types::*;
use crate::game_state::position_history::PositionHistory;
use crate::move_generation::{castling, check, draw_rules, legal_moves, pseudo_legal};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    // [rank][file], rank 0 is notation rank 8.
    pub(crate) grid: [[Option<Piece>; 8]; 8],

    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,

    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,

    pub(crate) history: PositionHistory,
}

impl Default for Board {
    fn default() -> Self {
        Self::new_game()
    }
}

impl Board {
    /// Board with no pieces, white to move and no castling rights.
    pub(crate) fn new_empty() -> Self {
        Self {
            grid: [[None; 8]; 8],
            side_to_move: Color::Light,
            castling_rights: CastlingRights::NONE,
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: PositionHistory::default(),
        }
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        let mut board = Self::new_empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            board.grid[0][file] = Some(Piece::new(*kind, Color::Dark));
            board.grid[1][file] = Some(Piece::new(PieceKind::Pawn, Color::Dark));
            board.grid[6][file] = Some(Piece::new(PieceKind::Pawn, Color::Light));
            board.grid[7][file] = Some(Piece::new(*kind, Color::Light));
        }
        board.castling_rights = CastlingRights::ALL;
        board.record_position();
        board
    }

    pub fn from_fen(fen: &str) -> FenResult<Self> {
        let mut board = parse_fen(fen)?;
        board.record_position();
        Ok(board)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    // --- Queries ---

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    pub fn position_history(&self) -> &PositionHistory {
        &self.history
    }

    /// Raw square contents, highlight markers included.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid[square.rank() as usize][square.file() as usize]
    }

    /// Playable piece on a square; highlight markers read as empty.
    #[inline]
    pub fn occupant(&self, square: Square) -> Option<Piece> {
        self.piece_at(square).filter(|piece| !piece.is_highlight())
    }

    #[inline]
    pub(crate) fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.grid[square.rank() as usize][square.file() as usize] = piece;
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.occupant(square).is_none()
    }

    #[inline]
    pub fn is_enemy(&self, square: Square, ally: Color) -> bool {
        matches!(self.occupant(square), Some(piece) if piece.color != ally)
    }

    /// Every playable piece of `color` with its square, in grid order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| {
            self.occupant(square)
                .filter(|piece| piece.color == color)
                .map(|piece| (square, piece))
        })
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// Destination squares the piece on `from` may legally move to.
    #[inline]
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        legal_moves::legal_moves(self, from)
    }

    #[inline]
    pub fn all_legal_moves(&self, color: Color) -> Vec<ChessMove> {
        legal_moves::all_legal_moves(self, color)
    }

    #[inline]
    pub fn is_attacked(&self, square: Square, by_color: Color) -> bool {
        check::is_attacked(self, square, by_color)
    }

    #[inline]
    pub fn is_check(&self, color: Color) -> bool {
        check::is_check(self, color)
    }

    #[inline]
    pub fn is_checkmate(&self, color: Color) -> bool {
        check::is_checkmate(self, color)
    }

    #[inline]
    pub fn is_stalemate(&self, color: Color) -> bool {
        check::is_stalemate(self, color)
    }

    #[inline]
    pub fn is_draw(&self, color: Color) -> bool {
        draw_rules::is_draw(self, color)
    }

    /// Hash of placement, side to move, castling rights and en-passant
    /// target. Clocks are excluded so transpositions compare equal.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for square in Square::all() {
            self.occupant(square).hash(&mut hasher);
        }
        self.side_to_move.hash(&mut hasher);
        self.castling_rights.hash(&mut hasher);
        self.en_passant_target.hash(&mut hasher);
        hasher.finish()
    }

    // --- Mutation ---

    /// Validate and play a move for the side to move.
    ///
    /// A king stepping two files is treated as a castling request. On any
    /// error the board is untouched.
    pub fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> MoveResult<()> {
        let piece = self.occupant(from).ok_or(MoveError::EmptySquare(from))?;
        if piece.color != self.side_to_move {
            return Err(MoveError::NotYourPiece {
                square: from,
                owner: piece.color,
                to_move: self.side_to_move,
            });
        }

        let mut next = self.clone();

        if is_castling_step(piece, from, to) {
            castling::try_perform_castle(&mut next, from, to)?;
            next.en_passant_target = None;
            next.finish_turn(piece.color, false);
        } else {
            if !legal_moves::legal_moves(self, from).contains(&to) {
                return Err(if pseudo_legal::pseudo_legal_moves(self, from).contains(&to) {
                    MoveError::LeavesKingInCheck { from, to }
                } else {
                    MoveError::NotLegal { from, to }
                });
            }

            next.apply_piece_move(from, to, promotion);
            if check::is_check(&next, piece.color) {
                return Err(MoveError::LeavesKingInCheck { from, to });
            }
        }

        next.record_position();
        *self = next;
        Ok(())
    }

    #[inline]
    pub fn apply_move(&mut self, chess_move: ChessMove) -> MoveResult<()> {
        self.make_move(chess_move.from, chess_move.to, chess_move.promotion)
    }

    /// Play a move already known to be legal, skipping validation. Used by
    /// search and perft on their own board copies.
    pub(crate) fn play_unchecked(&mut self, chess_move: ChessMove) {
        let Some(piece) = self.occupant(chess_move.from) else {
            return;
        };

        if is_castling_step(piece, chess_move.from, chess_move.to) {
            castling::relocate_castling_pieces(self, chess_move.from, chess_move.to);
            self.en_passant_target = None;
            self.finish_turn(piece.color, false);
        } else {
            self.apply_piece_move(chess_move.from, chess_move.to, chess_move.promotion);
        }
        self.record_position();
    }

    /// Move the piece on `from` to `to` with every ordinary side effect:
    /// en-passant removal, en-passant target update, promotion, castling
    /// rights and clocks. Does not validate and does not touch history.
    pub(crate) fn apply_piece_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) {
        let Some(piece) = self.occupant(from) else {
            return;
        };
        let captured = self.occupant(to);
        let mut reset_halfmove = piece.kind == PieceKind::Pawn || captured.is_some();

        if piece.kind == PieceKind::Pawn
            && from.file() != to.file()
            && captured.is_none()
            && self.en_passant_target == Some(to)
        {
            let passed_pawn = Piece::new(PieceKind::Pawn, piece.color.opposite());
            if let Some(victim) = Square::new(to.file(), from.rank())
                .filter(|&square| self.occupant(square) == Some(passed_pawn))
            {
                self.set_piece(victim, None);
            }
        }

        self.en_passant_target =
            if piece.kind == PieceKind::Pawn && from.rank().abs_diff(to.rank()) == 2 {
                Square::new(from.file(), (from.rank() + to.rank()) / 2)
            } else {
                None
            };

        let placed = if piece.kind == PieceKind::Pawn && (to.rank() == 0 || to.rank() == 7) {
            Piece::new(promotion_kind(promotion), piece.color)
        } else {
            piece
        };

        self.set_piece(to, Some(placed));
        self.set_piece(from, None);

        castling::update_castling_rights(self, from, piece);
        if let Some(victim) = captured {
            castling::clear_rights_for_captured_rook(self, to, victim);
        }

        self.finish_turn(piece.color, reset_halfmove);
    }

    fn finish_turn(&mut self, mover: Color, reset_halfmove: bool) {
        if reset_halfmove {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if mover == Color::Dark {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = mover.opposite();
    }

    fn record_position(&mut self) {
        let fingerprint = self.fingerprint();
        self.history.push(fingerprint);
    }

    // --- Front-end markers ---

    /// Mark the given empty squares with highlight markers, clearing any
    /// previous markers first. Occupied squares are left as they are.
    pub fn highlight_moves(&mut self, squares: &[Square]) {
        self.clear_highlights();
        for &square in squares {
            if self.piece_at(square).is_none() {
                self.set_piece(square, Some(Piece::new(PieceKind::Highlight, Color::Light)));
            }
        }
    }

    pub fn clear_highlights(&mut self) {
        for row in self.grid.iter_mut() {
            for cell in row.iter_mut() {
                if cell.is_some_and(|piece| piece.is_highlight()) {
                    *cell = None;
                }
            }
        }
    }
}

#[inline]
fn is_castling_step(piece: Piece, from: Square, to: Square) -> bool {
    piece.kind == PieceKind::King && from.rank() == to.rank() && from.file().abs_diff(to.file()) == 2
}

#[inline]
fn promotion_kind(requested: Option<PieceKind>) -> PieceKind {
    match requested {
        Some(kind @ (PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)) => {
            kind
        }
        _ => PieceKind::Queen,
    }
}
