//! # holdem_table
//!
//! `holdem_table` simulates No-Limit Texas Hold'em tables played by automated
//! agents. The interesting part is the betting engine: turn order, blinds,
//! heads-up rules, raises re-opening the action, all-ins, pot awards and
//! dealer rotation across hands.
//!
//! ## Core
//!
//! The [`core`] module holds the card primitives: values, suits, cards, a
//! shuffled deck and a seven card hand ranker.
//!
//! ## Arena
//!
//! The [`arena`] module is where tables are played. Agents decide, the
//! betting round engine applies their decisions, the hand orchestrator deals
//! and settles each hand, and the table loop keeps dealing until only one
//! player has chips left.
//!
//! ```
//! use holdem_table::arena::agent::CallingAgent;
//! use holdem_table::arena::{Agent, TableBuilder, TableLoopBuilder};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let table = TableBuilder::new()
//!     .player("Alice", 1000)
//!     .player("Bob", 1000)
//!     .blinds(20, 10)
//!     .build()
//!     .unwrap();
//! let agents: Vec<Box<dyn Agent>> = vec![
//!     Box::new(CallingAgent::new("caller-0")),
//!     Box::new(CallingAgent::new("caller-1")),
//! ];
//! let mut table_loop = TableLoopBuilder::default()
//!     .table(table)
//!     .agents(agents)
//!     .max_hands(10)
//!     .build()
//!     .unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let result = table_loop.run(&mut rng);
//! assert!(result.hands_played <= 10);
//! ```

/// Card values, suits, decks and hand ranking. Nothing in here knows about
/// betting.
pub mod core;

/// Tables, agents, the betting round engine and everything needed to play
/// hands.
pub mod arena;
