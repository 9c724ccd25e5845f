use crate::game_state::{board::Board, chess_types::*};
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(board: &Board) -> String {
    let placement = generate_board_field(board);
    let side_to_move = match board.side_to_move() {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let castling = generate_castling_field(board.castling_rights());
    let en_passant = board
        .en_passant_target()
        .map_or_else(|| "-".to_owned(), square_to_algebraic);

    format!(
        "{} {} {} {} {} {}",
        placement,
        side_to_move,
        castling,
        en_passant,
        board.halfmove_clock(),
        board.fullmove_number()
    )
}

/// Normalised position key: placement, side to move and castling field.
pub fn generate_position_key(board: &Board) -> String {
    generate_fen(board)
        .split_whitespace()
        .take(3)
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for row in 0..8u8 {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            let letter = Square::new(file, row)
                .and_then(|square| board.occupant(square))
                .and_then(piece_to_fen_char);
            if let Some(ch) = letter {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(ch);
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row < 7 {
            out.push('/');
        }
    }

    out
}

fn piece_to_fen_char(piece: Piece) -> Option<char> {
    let base = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
        PieceKind::Highlight => return None,
    };

    Some(match piece.color {
        Color::Light => base.to_ascii_uppercase(),
        Color::Dark => base,
    })
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();

    if rights.light_kingside {
        out.push('K');
    }
    if rights.light_queenside {
        out.push('Q');
    }
    if rights.dark_kingside {
        out.push('k');
    }
    if rights.dark_queenside {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{generate_fen, generate_position_key};
    use crate::game_state::board::Board;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{CastlingRights, Color, Square};
    use crate::utils::fen_parser::parse_fen;

    fn assert_same_position(a: &Board, b: &Board) {
        for square in Square::all() {
            assert_eq!(a.occupant(square), b.occupant(square), "square {square}");
        }
        assert_eq!(a.side_to_move(), b.side_to_move());
        assert_eq!(a.castling_rights(), b.castling_rights());
        assert_eq!(a.en_passant_target(), b.en_passant_target());
        assert_eq!(a.halfmove_clock(), b.halfmove_clock());
        assert_eq!(a.fullmove_number(), b.fullmove_number());
    }

    #[test]
    fn round_trip_starting_position_fen() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        let generated = generate_fen(&parsed);

        assert_eq!(generated, STARTING_POSITION_FEN);

        let reparsed = parse_fen(&generated).expect("generated FEN should parse");
        assert_same_position(&parsed, &reparsed);
    }

    #[test]
    fn round_trip_custom_position_fen() {
        let fen = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6";
        let parsed = parse_fen(fen).expect("custom FEN should parse");
        let generated = generate_fen(&parsed);
        let reparsed = parse_fen(&generated).expect("generated FEN should parse");

        assert_eq!(generated, fen);
        assert_same_position(&parsed, &reparsed);
        assert_eq!(reparsed.side_to_move(), Color::Dark);
        assert_eq!(
            reparsed.castling_rights(),
            CastlingRights {
                dark_kingside: true,
                dark_queenside: true,
                ..CastlingRights::NONE
            }
        );
    }

    #[test]
    fn round_trip_positions_reached_by_play() {
        let mut board = Board::new_game();
        for text in ["e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4", "g8f6"] {
            let mv = crate::utils::long_algebraic::long_algebraic_to_move(text)
                .expect("move text should parse");
            board.apply_move(mv).expect("scripted move should be legal");

            let reparsed = parse_fen(&board.to_fen()).expect("generated FEN should parse");
            assert_same_position(&board, &reparsed);
        }
    }

    #[test]
    fn non_canonical_castling_order_is_normalised() {
        let parsed = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w qkQK - 0 1").expect("FEN should parse");
        assert_eq!(generate_fen(&parsed), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    }

    #[test]
    fn position_key_strips_en_passant_and_clocks() {
        let mut board = Board::new_game();
        board
            .apply_move(
                crate::utils::long_algebraic::long_algebraic_to_move("e2e4")
                    .expect("move text should parse"),
            )
            .expect("e2e4 should be legal");

        assert_eq!(
            generate_position_key(&board),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq"
        );
    }
}
