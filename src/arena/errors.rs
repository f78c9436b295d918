use thiserror::Error;

use super::Chips;

/// Why an agent's action could not be played as asked. These never stop a
/// hand, the engine coerces the action and carries on.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("Can't check while owing {owed} chips")]
    CheckWhileOwing { owed: Chips },
    #[error("Raise of {by} is below the minimum raise of {min}")]
    RaiseTooSmall { by: Chips, min: Chips },
    #[error("Raise is more than the player's stack")]
    RaiseExceedsStack,
    #[error("No more raises are allowed this round")]
    RaiseCapped,
}

/// Conditions that stop a hand from being dealt.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TableError {
    #[error("At least two players with chips are needed to deal, found {funded}")]
    NotEnoughPlayers { funded: usize },

    #[error("Expected one agent per seat, got {agents} agents for {seats} seats")]
    AgentCountMismatch { agents: usize, seats: usize },

    #[error("The deck ran out of cards")]
    DeckExhausted,
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TableLoopError {
    #[error("Builder needs a table")]
    NeedTable,

    #[error("Builder needs agents")]
    NeedAgents,

    #[error("Expected one agent per seat, got {agents} agents for {seats} seats")]
    AgentCountMismatch { agents: usize, seats: usize },
}
