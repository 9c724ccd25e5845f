//! Crate root module declarations for the Gambit chess engine.
//!
//! Exposes the rules core (board state, notation, move generation and draw
//! detection), the evaluation and search layer, the opening book and the
//! computer player so binaries, benches and tests share stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position_history;
}

pub mod move_generation {
    pub mod castling;
    pub mod check;
    pub mod draw_rules;
    pub mod legal_moves;
    pub mod perft;
    pub mod pseudo_legal;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
    pub mod move_ordering;
}

pub mod tables {
    pub mod opening_book;
    pub mod piece_square_tables;
}

pub mod engines {
    pub mod computer_player;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
}
