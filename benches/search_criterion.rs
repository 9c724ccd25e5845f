use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use gambit_engine::game_state::board::Board;
use gambit_engine::game_state::chess_rules::STARTING_POSITION_FEN;
use gambit_engine::search::minimax::{MinimaxSearch, SearchConfig};

const POSITIONS: &[(&str, &str)] = &[
    ("start", STARTING_POSITION_FEN),
    (
        "classical_mid",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    ),
    ("end_kpk", "8/8/8/8/8/4k3/4P3/4K3 w - - 0 1"),
];

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    for depth in [2u8, 3] {
        let search = MinimaxSearch::with_standard_scorer(SearchConfig {
            max_depth: depth,
            ..SearchConfig::default()
        });
        for (name, fen) in POSITIONS {
            let board = Board::from_fen(fen).expect("benchmark FEN should parse");
            let color = board.side_to_move();
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{name}_d{depth}")),
                &board,
                |b, board| {
                    b.iter(|| {
                        let report = search.search(black_box(board), color);
                        black_box(report.best_score)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
