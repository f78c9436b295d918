use uuid::Uuid;

use crate::arena::{action::AgentAction, game_state::PublicGameView, Chips};

use super::Agent;

/// Calls as long as the price is low enough and folds otherwise.
#[derive(Debug, Clone)]
pub struct ThresholdAgent {
    name: String,
    /// Most chips this agent will put in to stay in the hand.
    max_call: Chips,
}

impl ThresholdAgent {
    pub fn new(name: impl Into<String>, max_call: Chips) -> Self {
        Self {
            name: name.into(),
            max_call,
        }
    }
}

impl Agent for ThresholdAgent {
    fn act(&mut self, _id: Uuid, view: &PublicGameView) -> AgentAction {
        if view.can_check() {
            AgentAction::Check
        } else if view.to_call <= self.max_call {
            AgentAction::Call
        } else {
            AgentAction::Fold
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
