use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{instrument, trace};
use uuid::Uuid;

use crate::arena::{action::AgentAction, game_state::PublicGameView};

use super::Agent;

/// An agent that picks between folding, calling and raising at random.
///
/// The probabilities are indexed by how many raises this agent has already
/// seen in the current round, so it can get tighter as the betting heats up.
/// The last entry is reused once the raises run past the end of the list.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    name: String,
    percent_fold: Vec<f64>,
    percent_call: Vec<f64>,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(
        name: impl Into<String>,
        percent_fold: Vec<f64>,
        percent_call: Vec<f64>,
        seed: u64,
    ) -> Self {
        Self {
            name: name.into(),
            percent_fold,
            percent_call,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build with the default probabilities.
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self::new(name, vec![0.25, 0.30, 0.50], vec![0.5, 0.6, 0.45], seed)
    }

    fn probability(values: &[f64], raises: usize) -> f64 {
        values
            .get(raises.min(values.len().saturating_sub(1)))
            .copied()
            .unwrap_or(1.0)
            .clamp(0.0, 1.0)
    }
}

impl Agent for RandomAgent {
    #[instrument(level = "trace", skip(self, view), fields(agent_name = %self.name))]
    fn act(&mut self, _id: Uuid, view: &PublicGameView) -> AgentAction {
        let raises = view
            .actions
            .iter()
            .filter(|r| r.round == view.round && r.raised)
            .count();

        // We shouldn't fold when checking is an option.
        let can_fold = !view.can_check();
        let percent_fold = Self::probability(&self.percent_fold, raises);
        let percent_call = Self::probability(&self.percent_call, raises);

        // Raise somewhere between the minimum and about the size of the pot.
        let min = view.min_raise;
        let max = view.pot.max(min);

        let action = if can_fold && self.rng.gen_bool(percent_fold) {
            AgentAction::Fold
        } else if self.rng.gen_bool(percent_call) {
            if can_fold {
                AgentAction::Call
            } else {
                AgentAction::Check
            }
        } else if max > min {
            AgentAction::Raise(self.rng.gen_range(min..=max))
        } else {
            AgentAction::Raise(min)
        };

        trace!(?action, raises, can_fold, "RandomAgent decision");
        action
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::arena::{
        test_util::{assert_valid_outcome, preflop_spot},
        TableBuilder, TableLoopBuilder,
    };

    use super::*;

    #[test]
    fn test_never_folds_when_checking_is_free() {
        let (table, hand) = preflop_spot(&[1000, 1000, 1000], 20);
        let mut agent = RandomAgent::new("random", vec![1.0], vec![0.0], 5);
        let view = PublicGameView::new(&table, &hand, 2);
        for _ in 0..20 {
            assert_ne!(AgentAction::Fold, agent.act(hand.id, &view));
        }
    }

    #[test]
    fn test_always_fold_when_told() {
        let (table, hand) = preflop_spot(&[1000, 1000, 1000], 20);
        let mut agent = RandomAgent::new("random", vec![1.0], vec![0.0], 5);
        let view = PublicGameView::new(&table, &hand, 0);
        assert_eq!(AgentAction::Fold, agent.act(hand.id, &view));
    }

    #[test]
    fn test_all_in_raise_counts_as_raise() {
        use crate::arena::{ActionRecord, Round};

        let (table, mut hand) = preflop_spot(&[1000, 1000, 1000], 20);
        // Never folds unraised pots, always folds once someone raised
        let mut agent = RandomAgent::new("random", vec![0.0, 1.0], vec![1.0], 5);

        let mut shove = ActionRecord {
            idx: 0,
            name: "Player-0".to_string(),
            round: Round::Preflop,
            action: AgentAction::AllIn,
            amount: 20,
            raised: false,
        };
        // An all-in for no more than the bet is just a call
        hand.actions.push(shove.clone());
        let view = PublicGameView::new(&table, &hand, 1);
        assert_eq!(AgentAction::Call, agent.act(hand.id, &view));

        shove.amount = 1000;
        shove.raised = true;
        hand.actions[0] = shove;
        let view = PublicGameView::new(&table, &hand, 1);
        assert_eq!(AgentAction::Fold, agent.act(hand.id, &view));
    }

    #[test]
    fn test_raise_is_at_least_min() {
        let (table, hand) = preflop_spot(&[1000, 1000, 1000], 20);
        let mut agent = RandomAgent::new("random", vec![0.0], vec![0.0], 11);
        let view = PublicGameView::new(&table, &hand, 0);
        for _ in 0..20 {
            match agent.act(hand.id, &view) {
                AgentAction::Raise(by) => assert!((20..=30).contains(&by), "raise {by}"),
                action => panic!("Expected a raise, got {action:?}"),
            }
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let (table, hand) = preflop_spot(&[1000, 1000, 1000], 20);
        let view = PublicGameView::new(&table, &hand, 0);
        let mut a = RandomAgent::with_seed("a", 77);
        let mut b = RandomAgent::with_seed("b", 77);
        for _ in 0..10 {
            assert_eq!(a.act(hand.id, &view), b.act(hand.id, &view));
        }
    }

    #[test_log::test]
    fn test_random_agents_keep_chips() {
        let table = TableBuilder::new()
            .num_players_with_stack(5, 500)
            .blinds(10, 5)
            .build()
            .unwrap();
        let agents: Vec<Box<dyn Agent>> = (0..5)
            .map(|idx| Box::new(RandomAgent::with_seed(format!("r-{idx}"), idx)) as Box<dyn Agent>)
            .collect();
        let mut table_loop = TableLoopBuilder::default()
            .table(table)
            .agents(agents)
            .build()
            .unwrap();

        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..20 {
            let starting = table_loop.table().total_stacks();
            match table_loop.play_hand(&mut rng) {
                Ok(outcome) => assert_valid_outcome(&outcome, starting),
                Err(_) => break,
            }
        }
    }
}
