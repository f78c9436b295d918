use tracing::{debug, instrument, trace};
use uuid::Uuid;

use crate::arena::{action::AgentAction, game_state::PublicGameView};

use super::Agent;

/// A replay agent that will replay a sequence of actions
/// from a vector. It consumes the vector making it fast but
/// hard to reuse or introspect what actions were taken.
#[derive(Debug, Clone)]
pub struct VecReplayAgent {
    name: String,
    actions: Vec<AgentAction>,
    idx: usize,
    default: AgentAction,
}

impl VecReplayAgent {
    pub fn new(name: impl Into<String>, actions: Vec<AgentAction>) -> Self {
        Self::new_with_default(name, actions, AgentAction::Fold)
    }

    pub fn new_with_default(
        name: impl Into<String>,
        actions: Vec<AgentAction>,
        default: AgentAction,
    ) -> Self {
        Self {
            name: name.into(),
            actions,
            idx: 0,
            default,
        }
    }
}

impl Agent for VecReplayAgent {
    #[instrument(level = "trace", skip(self, _view), fields(agent_name = %self.name))]
    fn act(&mut self, _id: Uuid, _view: &PublicGameView) -> AgentAction {
        let current = self.idx;
        self.idx += 1;
        match self.actions.get(current) {
            Some(a) => {
                trace!(idx = current, ?a, "Replaying action");
                *a
            }
            None => {
                debug!(
                    idx = current,
                    actions_len = self.actions.len(),
                    default = ?self.default,
                    "Replay exhausted actions, using default"
                );
                self.default
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rand::{rngs::StdRng, SeedableRng};

    use crate::arena::{
        action::AgentAction,
        agent::VecReplayAgent,
        test_util::{assert_valid_outcome, preflop_spot},
        Agent, Chips, TableBuilder, TableLoopBuilder,
    };

    use super::*;

    fn boxed_vec_agent(actions: Vec<AgentAction>) -> Box<dyn Agent> {
        boxed_vec_agent_with_default(actions, AgentAction::Fold)
    }

    fn boxed_vec_agent_with_default(
        actions: Vec<AgentAction>,
        default: AgentAction,
    ) -> Box<dyn Agent> {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let name = format!(
            "vec-replay-agent-{}",
            COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        Box::new(VecReplayAgent::new_with_default(name, actions, default))
    }

    fn play_one(
        stacks: &[Chips],
        big_blind: Chips,
        small_blind: Chips,
        dealer_idx: usize,
        agents: Vec<Box<dyn Agent>>,
    ) {
        let table = TableBuilder::new()
            .players(
                stacks
                    .iter()
                    .enumerate()
                    .map(|(idx, s)| (format!("P{idx}"), *s)),
            )
            .blinds(big_blind, small_blind)
            .dealer_idx(dealer_idx)
            .build()
            .unwrap();
        let starting: Chips = stacks.iter().sum();
        let mut table_loop = TableLoopBuilder::default()
            .table(table)
            .agents(agents)
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(421);
        let outcome = table_loop.play_hand(&mut rng).unwrap();
        assert_valid_outcome(&outcome, starting);
    }

    #[test]
    fn test_all_in_for_less() {
        let agents = vec![
            boxed_vec_agent(vec![
                AgentAction::Call,
                AgentAction::Check,
                AgentAction::Check,
                AgentAction::Raise(690),
            ]),
            boxed_vec_agent(vec![
                AgentAction::Call,
                AgentAction::Check,
                AgentAction::Check,
                AgentAction::Raise(690),
            ]),
            boxed_vec_agent(vec![
                AgentAction::Call,
                AgentAction::Check,
                AgentAction::Check,
                AgentAction::Raise(90),
            ]),
            boxed_vec_agent(vec![AgentAction::Call, AgentAction::Fold]),
        ];
        play_one(&[700, 900, 100, 800], 10, 5, 0, agents);
    }

    #[test]
    fn test_cant_bet_after_folds() {
        let agents = vec![
            boxed_vec_agent(vec![]),
            boxed_vec_agent(vec![]),
            boxed_vec_agent(vec![AgentAction::Raise(100)]),
        ];
        play_one(&[100, 100, 100], 10, 5, 0, agents);
    }

    #[test]
    fn test_short_stacks_post_what_they_have() {
        let agents = vec![
            boxed_vec_agent(vec![AgentAction::Fold]),
            boxed_vec_agent(vec![AgentAction::Fold]),
            boxed_vec_agent(vec![AgentAction::Fold]),
            boxed_vec_agent(vec![AgentAction::Call]),
            boxed_vec_agent(vec![AgentAction::Call]),
            boxed_vec_agent(vec![AgentAction::Raise(259), AgentAction::Fold]),
        ];
        play_one(&[1000, 100, 1000, 5, 5, 1000], 114, 96, 1, agents);
    }

    #[test]
    fn test_call_with_fold() {
        let agents = vec![
            boxed_vec_agent(vec![AgentAction::Call]),
            boxed_vec_agent(vec![AgentAction::Call, AgentAction::Fold, AgentAction::Fold]),
            boxed_vec_agent(vec![AgentAction::Call]),
            boxed_vec_agent(vec![AgentAction::Call, AgentAction::Call]),
        ];
        play_one(&[50000, 50000, 50000, 50000], 50, 0, 1, agents);
    }

    #[test]
    fn test_both_all_in_no_more_actions() {
        // Heads up: the dealer limps and the big blind gets no option. The big
        // blind shoves the flop and the dealer calls for the rest of the stack,
        // leaving nobody able to act on the turn or river.
        let agents = vec![
            boxed_vec_agent_with_default(
                vec![AgentAction::Call, AgentAction::Call],
                AgentAction::Fold,
            ),
            boxed_vec_agent_with_default(vec![AgentAction::AllIn], AgentAction::Fold),
        ];
        let table = TableBuilder::new()
            .player("sb", 360)
            .player("bb", 360)
            .blinds(200, 5)
            .build()
            .unwrap();
        let mut table_loop = TableLoopBuilder::default()
            .table(table)
            .agents(agents)
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let outcome = table_loop.play_hand(&mut rng).unwrap();

        assert_eq!(720, outcome.pot);
        assert_eq!(5, outcome.board.len());
        assert_eq!(3, outcome.actions.len());
        assert_valid_outcome(&outcome, 720);
    }

    #[test]
    fn test_vec_replay_agent_name() {
        let agent = VecReplayAgent::new("TestAgentName", vec![AgentAction::Fold]);
        assert_eq!(agent.name(), "TestAgentName");
    }

    #[test]
    fn test_vec_replay_agent_index_increment() {
        let actions = vec![
            AgentAction::Raise(10),
            AgentAction::Raise(20),
            AgentAction::Raise(30),
        ];
        let (table, hand) = preflop_spot(&[100, 100], 10);
        let view = PublicGameView::new(&table, &hand, 0);
        let mut agent = VecReplayAgent::new("TestAgent", actions);

        assert_eq!(AgentAction::Raise(10), agent.act(hand.id, &view));
        assert_eq!(AgentAction::Raise(20), agent.act(hand.id, &view));
        assert_eq!(AgentAction::Raise(30), agent.act(hand.id, &view));
        // Exhausted so it falls back to the default
        assert_eq!(AgentAction::Fold, agent.act(hand.id, &view));
    }
}
