use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use turnwise_chess::game_state::chess_types::Position;
use turnwise_chess::search::ai_search::SearchEngine;
use turnwise_chess::search::difficulty::Difficulty;

const POSITIONS: &[(&str, &str)] = &[
    ("start", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
    (
        "middlegame",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    ),
];

fn bench_select_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_move");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    for &(name, fen) in POSITIONS {
        let position = Position::from_fen(fen).expect("benchmark FEN should parse");
        for difficulty in Difficulty::ALL {
            let mut engine = SearchEngine::seeded(1);
            group.bench_with_input(
                BenchmarkId::new(name, difficulty.level()),
                &difficulty,
                |b, &difficulty| {
                    b.iter(|| {
                        let picked = engine
                            .search(black_box(&position), difficulty, None)
                            .expect("search should succeed");
                        black_box(picked.map(|m| m.mv))
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_select_move);
criterion_main!(search_benches);
