use std::sync::atomic::{AtomicUsize, Ordering};

use uuid::Uuid;

use crate::arena::{action::AgentAction, game_state::PublicGameView};

use super::Agent;

/// A simple agent that folds whenever it owes chips and checks otherwise.
#[derive(Debug, Clone)]
pub struct FoldingAgent {
    name: String,
}

impl FoldingAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for FoldingAgent {
    fn default() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let idx = COUNTER.fetch_add(1, Ordering::Relaxed);
        FoldingAgent::new(format!("FoldingAgent-{idx}"))
    }
}

impl Agent for FoldingAgent {
    fn act(&mut self, _id: Uuid, view: &PublicGameView) -> AgentAction {
        if view.can_check() {
            AgentAction::Check
        } else {
            AgentAction::Fold
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
