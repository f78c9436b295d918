use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_table::arena::agent::RandomAgent;
use holdem_table::arena::{Agent, TableBuilder, TableLoopBuilder, TableResult};
use rand::{rngs::StdRng, SeedableRng};

const STARTING_STACK: u64 = 10_000;
const SMALL_BLIND: u64 = 50;
const BIG_BLIND: u64 = 100;

fn run_random_table(num_players: usize, seed: u64) -> TableResult {
    let table = TableBuilder::new()
        .num_players_with_stack(num_players, STARTING_STACK)
        .blinds(BIG_BLIND, SMALL_BLIND)
        .build()
        .unwrap();
    let agents: Vec<Box<dyn Agent>> = (0..num_players)
        .map(|idx| {
            Box::new(RandomAgent::with_seed(
                format!("random-{idx}"),
                seed + idx as u64,
            )) as Box<dyn Agent>
        })
        .collect();

    let mut table_loop = TableLoopBuilder::default()
        .table(table)
        .agents(agents)
        .max_hands(100)
        .build()
        .unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    table_loop.run(&mut rng)
}

fn bench_random_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_table_100_hands");

    for num_players in [2, 3, 6, 9] {
        group.bench_with_input(
            BenchmarkId::new("num_players", num_players),
            &num_players,
            |b, &num_players| {
                b.iter(|| run_random_table(num_players, 42));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_random_tables);
criterion_main!(benches);
