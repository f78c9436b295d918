#![no_main]

extern crate arbitrary;
extern crate holdem_table;
extern crate libfuzzer_sys;
extern crate rand;

use rand::{rngs::StdRng, SeedableRng};

use holdem_table::arena::{
    action::AgentAction,
    agent::VecReplayAgent,
    test_util::{assert_valid_outcome, ChipConservationHistorian},
    Agent, Chips, TableBuilder, TableError, TableLoopBuilder,
};

use libfuzzer_sys::fuzz_target;

const MAX_STACK: Chips = 100_000_000;

#[derive(Debug, Clone, arbitrary::Arbitrary)]
struct PlayerInput {
    pub stack: Chips,
    pub actions: Vec<AgentAction>,
}

#[derive(Debug, Clone, arbitrary::Arbitrary)]
struct TableInput {
    pub players: Vec<PlayerInput>,
    pub sb: Chips,
    pub bb: Chips,
    pub dealer_idx: usize,
    pub max_raises: Option<u8>,
    pub num_hands: u8,
    pub seed: u64,
}

fuzz_target!(|input: TableInput| {
    if !(2..=9).contains(&input.players.len()) {
        return;
    }

    let table = match TableBuilder::new()
        .players(
            input
                .players
                .iter()
                .enumerate()
                .map(|(idx, p)| (format!("replay-{idx}"), p.stack.clamp(1, MAX_STACK))),
        )
        .blinds(input.bb.min(MAX_STACK), input.sb)
        .dealer_idx(input.dealer_idx % input.players.len())
        .max_raises_per_round(input.max_raises)
        .build()
    {
        Ok(table) => table,
        // Invalid blinds, skip
        Err(_) => return,
    };

    let agents: Vec<Box<dyn Agent>> = input
        .players
        .into_iter()
        .enumerate()
        .map(|(idx, p)| {
            Box::new(VecReplayAgent::new(format!("replay-{idx}"), p.actions)) as Box<dyn Agent>
        })
        .collect();

    let mut table_loop = TableLoopBuilder::default()
        .table(table)
        .agents(agents)
        .historian(Box::<ChipConservationHistorian>::default())
        .panic_on_historian_error(true)
        .build()
        .unwrap();

    let mut rng = StdRng::seed_from_u64(input.seed);
    for _ in 0..=(input.num_hands % 8) {
        let before = table_loop.table().total_stacks();
        match table_loop.play_hand(&mut rng) {
            Ok(outcome) => assert_valid_outcome(&outcome, before),
            Err(TableError::NotEnoughPlayers { .. }) => break,
            Err(e) => panic!("Unexpected error {e}"),
        }
    }
});
