use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_table::core::{Card, Deck, Rankable};
use rand::{rngs::StdRng, SeedableRng};

fn bench_rank_known(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_known");

    for (name, hand) in [
        ("high_card", "2h7dTc9sKd4h3s"),
        ("two_pair", "2h2d8d8sKd6sTh"),
        ("straight", "Ah2d3c4s5hKdQs"),
        ("flush", "AhKh2h7h9hTd3c"),
        ("straight_flush", "9s8s7s6s5sAhKd"),
    ] {
        let cards = Card::parse_many(hand).unwrap();
        group.bench_with_input(BenchmarkId::new("seven_cards", name), &cards, |b, cards| {
            b.iter(|| cards.rank());
        });
    }

    group.finish();
}

fn bench_rank_random(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let hands: Vec<Vec<Card>> = (0..1000)
        .map(|_| {
            let mut deck = Deck::shuffled(&mut rng);
            (0..7).filter_map(|_| deck.deal()).collect()
        })
        .collect();

    c.bench_function("rank_1000_random_seven_card_hands", |b| {
        b.iter(|| hands.iter().map(|h| h.rank().strength()).max());
    });
}

criterion_group!(benches, bench_rank_known, bench_rank_random);
criterion_main!(benches);
