use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{instrument, trace};
use uuid::Uuid;

use crate::arena::{action::AgentAction, game_state::PublicGameView};

use super::Agent;

/// A simple agent that always goes all-in regardless of context.
#[derive(Debug, Clone)]
pub struct AllInAgent {
    name: String,
}

impl AllInAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for AllInAgent {
    fn default() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let idx = COUNTER.fetch_add(1, Ordering::Relaxed);
        AllInAgent::new(format!("AllInAgent-{idx}"))
    }
}

impl Agent for AllInAgent {
    #[instrument(level = "trace", skip(self, view), fields(agent_name = %self.name))]
    fn act(&mut self, _id: Uuid, view: &PublicGameView) -> AgentAction {
        trace!(stack = view.stack, "AllInAgent going all-in");
        AgentAction::AllIn
    }

    fn name(&self) -> &str {
        &self.name
    }
}
