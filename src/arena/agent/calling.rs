use std::sync::atomic::{AtomicUsize, Ordering};

use uuid::Uuid;

use crate::arena::{action::AgentAction, game_state::PublicGameView};

use super::Agent;

/// A simple agent that always calls, or checks when nothing is owed.
#[derive(Debug, Clone)]
pub struct CallingAgent {
    name: String,
}

impl CallingAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for CallingAgent {
    fn default() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let idx = COUNTER.fetch_add(1, Ordering::Relaxed);
        CallingAgent::new(format!("CallingAgent-{idx}"))
    }
}

impl Agent for CallingAgent {
    fn act(&mut self, _id: Uuid, view: &PublicGameView) -> AgentAction {
        if view.can_check() {
            AgentAction::Check
        } else {
            AgentAction::Call
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
