use criterion::{criterion_group, criterion_main, Criterion};
use games_tilerow::TileRowPosition;
use playout::{LogisticWinEstimator, SimConfig, Simulator};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bench_simulate(c: &mut Criterion) {
    c.bench_function("simulate_2ply_10iter", |b| {
        b.iter(|| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            let position = TileRowPosition::standard(2, &mut rng);
            let mut sim = Simulator::new(
                position,
                LogisticWinEstimator::default(),
                SimConfig::default().with_seed(7),
            );
            sim.prune_to(20.0, 5);
            sim.simulate(2, 10).unwrap();
            sim.moves(true, true)
        })
    });

    c.bench_function("simulate_endgame_unbounded", |b| {
        b.iter(|| {
            let position = TileRowPosition::new(&["ABCDE", "FGHIJ"], "KLMNO", 5);
            let mut sim = Simulator::new(
                position,
                LogisticWinEstimator::default(),
                SimConfig::default().with_seed(7),
            );
            sim.simulate(-1, 5).unwrap();
            sim.moves(true, true)
        })
    });
}

criterion_group!(benches, bench_simulate);
criterion_main!(benches);
