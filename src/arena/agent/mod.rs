//! `Agent`s are the automatic players at the table. They only decide; the
//! betting engine applies (and if needed, corrects) whatever they decide.
//!
//! Some basic agents are provided as a way of testing the engine and as
//! baseline opponents.
mod aggressive;
mod all_in;
mod calling;
#[cfg(feature = "serde")]
mod config;
mod equity;
mod folding;
mod random;
mod replay;
mod threshold;

use uuid::Uuid;

use crate::arena::{
    action::AgentAction,
    game_state::{ActionRecord, PublicGameView},
};

/// This is the trait that you need to implement in order to implement
/// different strategies. It's up to you to implement the logic and state.
///
/// Agents only ever see a `PublicGameView`: their own hole cards plus what
/// everyone at the table can see.
pub trait Agent {
    /// Called when it is this agent's turn to act.
    fn act(&mut self, id: Uuid, view: &PublicGameView) -> AgentAction;

    /// Called after every played action at the table, including this
    /// agent's own.
    fn observe(&mut self, _id: Uuid, _record: &ActionRecord) {}

    fn name(&self) -> &str;
}

pub use aggressive::AggressiveAgent;
pub use all_in::AllInAgent;
pub use calling::CallingAgent;
#[cfg(feature = "serde")]
pub use config::{AgentConfig, AgentConfigError};
pub use equity::EquityAgent;
pub use folding::FoldingAgent;
pub use random::RandomAgent;
pub use replay::VecReplayAgent;
pub use threshold::ThresholdAgent;
