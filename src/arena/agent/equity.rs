use rand::{rngs::StdRng, SeedableRng};
use tracing::{instrument, trace};
use uuid::Uuid;

use crate::{
    arena::{action::AgentAction, game_state::PublicGameView, Chips},
    core::{Card, Deck, Rankable},
};

/// An agent that estimates its equity by dealing out the rest of the hand
/// many times with random opponent hole cards.
///
/// It knows nothing about opponent ranges, so every unknown card is equally
/// likely. That is a poor model of real opponents but it's cheap and it
/// does track the strength of the agent's own cards.
///
/// The pot share it expects to win decides:
/// - fold when that share is worth less than the call,
/// - min raise when equity reaches `raise_equity`,
/// - otherwise check or call.
#[derive(Debug, Clone)]
pub struct EquityAgent {
    name: String,
    samples: usize,
    raise_equity: f64,
    rng: StdRng,
}

impl EquityAgent {
    pub fn new(name: impl Into<String>, samples: usize, raise_equity: f64, seed: u64) -> Self {
        Self {
            name: name.into(),
            samples: samples.max(1),
            raise_equity,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Share of the pot this seat expects to win at showdown, between 0
    /// and 1. Ties count as an even split.
    pub fn estimate_equity(&mut self, hole: [Card; 2], board: &[Card], opponents: usize) -> f64 {
        if opponents == 0 {
            return 1.0;
        }

        let mut won = 0.0;
        for _ in 0..self.samples {
            let mut deck = Deck::shuffled(&mut self.rng);
            for card in hole.iter().chain(board.iter()) {
                deck.remove(card);
            }

            let mut full_board = board.to_vec();
            while full_board.len() < 5 {
                let Some(card) = deck.deal() else { break };
                full_board.push(card);
            }

            let mut mine = full_board.clone();
            mine.extend_from_slice(&hole);
            let my_rank = mine.rank();

            let mut tied = 1;
            let mut lost = false;
            for _ in 0..opponents {
                let (Some(a), Some(b)) = (deck.deal(), deck.deal()) else {
                    break;
                };
                let mut theirs = full_board.clone();
                theirs.push(a);
                theirs.push(b);
                let their_rank = theirs.rank();
                if their_rank > my_rank {
                    lost = true;
                    break;
                } else if their_rank == my_rank {
                    tied += 1;
                }
            }
            if !lost {
                won += 1.0 / tied as f64;
            }
        }
        won / self.samples as f64
    }
}

impl super::Agent for EquityAgent {
    #[instrument(level = "trace", skip(self, view), fields(agent_name = %self.name))]
    fn act(&mut self, _id: Uuid, view: &PublicGameView) -> AgentAction {
        let Some(hole) = view.hole_cards else {
            return if view.can_check() {
                AgentAction::Check
            } else {
                AgentAction::Fold
            };
        };

        let equity = self.estimate_equity(hole, view.board, view.live_opponents());
        let expected_pot = view.pot + view.to_call;
        let my_value = (equity * expected_pot as f64) as Chips;

        let action = if view.to_call > 0 && my_value < view.to_call {
            AgentAction::Fold
        } else if equity >= self.raise_equity && view.stack > view.to_call {
            AgentAction::Raise(view.min_raise)
        } else if view.can_check() {
            AgentAction::Check
        } else {
            AgentAction::Call
        };

        trace!(equity, my_value, ?action, "EquityAgent decision");
        action
    }

    fn name(&self) -> &str {
        &self.name
    }
}
