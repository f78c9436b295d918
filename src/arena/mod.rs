//! This is the arena module for playing No-Limit Hold'em tables.
//!
//! A [`Table`] is a ring of seats with chip stacks, blinds and a dealer
//! button. Each seat is driven by an [`Agent`] that decides what to do when
//! it's that seat's turn. The [`TableLoop`] deals hand after hand with a
//! [`HandOrchestrator`], which in turn hands each betting round to the
//! [`BettingRoundEngine`]. Everything that happens is published to
//! [`Historian`]s.
//!
//! Chips are whole numbers. Until the pot is awarded every stack plus the
//! pot equals what the table started the hand with. When a split pot
//! doesn't divide evenly the remainder is discarded and reported as
//! [`HandOutcome::undistributed`].
//!
//! # Example
//!
//! ```
//! use holdem_table::arena::agent::{CallingAgent, RandomAgent};
//! use holdem_table::arena::{Agent, TableBuilder, TableLoopBuilder};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let table = TableBuilder::new()
//!     .num_players_with_stack(3, 200)
//!     .blinds(10, 5)
//!     .build()
//!     .unwrap();
//! let agents: Vec<Box<dyn Agent>> = vec![
//!     Box::new(CallingAgent::new("caller")),
//!     Box::new(RandomAgent::with_seed("random-1", 1)),
//!     Box::new(RandomAgent::with_seed("random-2", 2)),
//! ];
//! let mut table_loop = TableLoopBuilder::default()
//!     .table(table)
//!     .agents(agents)
//!     .build()
//!     .unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(99);
//! let outcome = table_loop.play_hand(&mut rng).unwrap();
//! assert!(outcome.pot >= 15);
//! ```
pub mod action;
pub mod agent;
pub mod betting;
pub mod errors;
pub mod game_state;
pub mod hand;
pub mod historian;
pub mod oracle;
pub mod player;
pub mod table;
#[cfg(feature = "serde")]
pub mod table_config;
pub mod table_loop;

#[cfg(any(test, feature = "arena-test-util"))]
pub mod test_util;

/// Chip counts. Stacks, bets and pots are all whole chips.
pub type Chips = u64;

pub use agent::Agent;
pub use betting::{BettingRoundEngine, StageResult};
pub use errors::{ActionError, TableError, TableLoopError};
pub use game_state::{ActionRecord, HandState, OpponentView, PublicGameView, Round};
pub use hand::{HandOrchestrator, HandOutcome, PotAward, ShowdownResult};
pub use historian::{Historian, HistorianError};
pub use oracle::{HandRank, HandRankOracle, StandardOracle};
pub use player::Player;
pub use table::{Table, TableBuilder, TableBuilderError, MAX_PLAYERS};
#[cfg(feature = "serde")]
pub use table_config::{SeatConfig, TableConfig, TableConfigError};
pub use table_loop::{TableLoop, TableLoopBuilder, TableResult};
