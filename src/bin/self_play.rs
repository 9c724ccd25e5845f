//! Engine-versus-engine runner.
//!
//! Usage:
//! `cargo run --release --bin self_play`
//! `cargo run --release --bin self_play -- --fen "<fen>" --plies 40 --depth 3 --seed 7`

use gambit_engine::engines::computer_player::ComputerPlayer;
use gambit_engine::engines::engine_trait::EngineConfig;
use gambit_engine::game_state::board::Board;
use gambit_engine::game_state::chess_rules::STARTING_POSITION_FEN;
use gambit_engine::game_state::chess_types::Color;
use gambit_engine::search::minimax::SearchConfig;
use log::info;

fn arg_value(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1).cloned())
}

fn parse_arg<T: std::str::FromStr>(flag: &str, default: T) -> T {
    arg_value(flag)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    )
    .init();

    let fen = arg_value("--fen").unwrap_or_else(|| STARTING_POSITION_FEN.to_string());
    let plies: u32 = parse_arg("--plies", 40);
    let depth: u8 = parse_arg("--depth", 3);
    let seed = arg_value("--seed").and_then(|value| value.parse::<u64>().ok());

    let mut board = Board::from_fen(&fen).map_err(|e| e.to_string())?;
    let config = EngineConfig {
        search: SearchConfig {
            max_depth: depth,
            ..SearchConfig::default()
        },
        seed,
        ..EngineConfig::default()
    };
    let mut light = ComputerPlayer::from_config(Color::Light, &config);
    let mut dark = ComputerPlayer::from_config(Color::Dark, &config);

    info!("self play from '{fen}' for {plies} plies at depth {depth}");
    for _ in 0..plies {
        let to_move = board.side_to_move();
        if board.is_checkmate(to_move) {
            info!("{to_move:?} is checkmated");
            break;
        }
        if board.is_draw(to_move) {
            info!("drawn position: {}", board.to_fen());
            break;
        }

        let player = match to_move {
            Color::Light => &mut light,
            Color::Dark => &mut dark,
        };
        match player.make_move(&mut board).map_err(|e| e.to_string())? {
            Some(played) => {
                let score = player
                    .last_report()
                    .map(|report| report.best_score.to_string())
                    .unwrap_or_else(|| "book".to_string());
                info!("{:>3}. {to_move:?} {played} ({score})", board.fullmove_number());
            }
            None => {
                info!("{to_move:?} has no move to play");
                break;
            }
        }
    }

    println!("final position: {}", board.to_fen());
    Ok(())
}
