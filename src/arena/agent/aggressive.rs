use tracing::trace;
use uuid::Uuid;

use crate::arena::{action::AgentAction, game_state::PublicGameView, Chips};

use super::Agent;

/// Keeps raising by the minimum until the pot gets big, then just calls.
#[derive(Debug, Clone)]
pub struct AggressiveAgent {
    name: String,
    /// Stop raising once the pot reaches this size.
    pot_limit: Chips,
}

impl AggressiveAgent {
    pub fn new(name: impl Into<String>, pot_limit: Chips) -> Self {
        Self {
            name: name.into(),
            pot_limit,
        }
    }
}

impl Agent for AggressiveAgent {
    fn act(&mut self, _id: Uuid, view: &PublicGameView) -> AgentAction {
        let action = if view.pot < self.pot_limit {
            AgentAction::Raise(view.min_raise)
        } else if view.can_check() {
            AgentAction::Check
        } else {
            AgentAction::Call
        };
        trace!(?action, pot = view.pot, "AggressiveAgent decision");
        action
    }

    fn name(&self) -> &str {
        &self.name
    }
}
