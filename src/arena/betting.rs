use tracing::{debug, instrument, trace, warn};

use crate::core::PlayerBitSet;

use super::{
    action::{
        Action, AgentAction, FailedActionPayload, ForcedBetPayload, ForcedBetType,
        PlayedActionPayload,
    },
    errors::ActionError,
    game_state::{ActionRecord, HandState, PublicGameView, Round},
    historian::Historians,
    player::Player,
    table::Table,
    Agent, Chips,
};

/// How a betting round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageResult {
    /// Betting is closed and at least two players are still in the hand.
    Complete,
    /// Everyone else folded.
    HandEndedEarly { winner: usize },
}

/// Runs one betting round: asks agents for decisions in turn order, turns
/// those decisions into legal actions and keeps the pot, bet and seats in
/// step until the round is complete.
pub struct BettingRoundEngine<'a> {
    table: &'a mut Table,
    hand: &'a mut HandState,
    agents: &'a mut [Box<dyn Agent>],
    historians: &'a mut Historians,
}

impl<'a> BettingRoundEngine<'a> {
    pub fn new(
        table: &'a mut Table,
        hand: &'a mut HandState,
        agents: &'a mut [Box<dyn Agent>],
        historians: &'a mut Historians,
    ) -> Self {
        Self {
            table,
            hand,
            agents,
            historians,
        }
    }

    /// Play `round` to completion.
    ///
    /// Preflop this posts the blinds first. Every other round starts from a
    /// clean slate with the first live seat after the dealer to act.
    #[instrument(level = "debug", skip(self), fields(hand_id = %self.hand.id))]
    pub fn run_stage(&mut self, round: Round) -> StageResult {
        self.start_round(round);

        let mut next = if round == Round::Preflop {
            match self.post_blinds() {
                Some(bb) => self.table.next_seat_where(bb, Player::can_act),
                None => self.first_after_dealer(),
            }
        } else {
            self.first_after_dealer()
        };

        loop {
            if let Some(winner) = self.sole_survivor() {
                debug!(winner, "Everyone else folded");
                return StageResult::HandEndedEarly { winner };
            }
            if self.is_complete() {
                trace!(pot = self.hand.pot, "Betting round complete");
                return StageResult::Complete;
            }
            let Some(idx) = next else {
                return StageResult::Complete;
            };

            self.take_turn(idx);
            next = self.table.next_seat_where(idx, Player::can_act);
        }
    }

    fn start_round(&mut self, round: Round) {
        self.hand.reset_round(round, self.table.min_raise);
        for player in self.table.players.iter_mut() {
            player.reset_for_round();
        }
    }

    fn first_after_dealer(&self) -> Option<usize> {
        self.table
            .next_seat_where(self.table.dealer_idx, Player::can_act)
    }

    /// Post both blinds. The agents aren't asked. Returns the big blind seat.
    fn post_blinds(&mut self) -> Option<usize> {
        let (sb, bb) = self.table.blind_seats()?;
        self.post_forced(sb, self.table.small_blind, ForcedBetType::SmallBlind);
        self.post_forced(bb, self.table.big_blind, ForcedBetType::BigBlind);

        self.hand.bet = self.table.big_blind;
        self.hand.bet_holder = Some(bb);
        Some(bb)
    }

    fn post_forced(&mut self, idx: usize, bet: Chips, forced_bet_type: ForcedBetType) {
        let player = &mut self.table.players[idx];
        let posted = player.commit(bet);
        let player_stack = player.stack;
        self.hand.pot += posted;

        trace!(idx, bet, posted, ?forced_bet_type, "Posting blind");
        self.record(Action::ForcedBet(ForcedBetPayload {
            bet,
            posted,
            player_stack,
            idx,
            forced_bet_type,
        }));
    }

    /// Only one player still holds cards.
    fn sole_survivor(&self) -> Option<usize> {
        let mut live = self
            .table
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_live());
        match (live.next(), live.next()) {
            (Some((idx, _)), None) => Some(idx),
            _ => None,
        }
    }

    /// The round is over when everyone who can still put chips in has
    /// matched the bet and either acted since the last raise or made it.
    /// It is also over when at most one such player remains and they owe
    /// nothing, since nobody could answer a bet.
    pub(crate) fn is_complete(&self) -> bool {
        let bet = self.hand.bet;
        let can_act: Vec<usize> = self
            .table
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.can_act())
            .map(|(idx, _)| idx)
            .collect();

        if can_act.len() <= 1
            && can_act
                .iter()
                .all(|idx| self.table.players[*idx].owed(bet) == 0)
        {
            return true;
        }

        can_act.iter().all(|idx| {
            self.table.players[*idx].owed(bet) == 0
                && (self.hand.acted.get(*idx) || self.hand.bet_holder == Some(*idx))
        })
    }

    fn take_turn(&mut self, idx: usize) {
        let requested = {
            let view = PublicGameView::new(&*self.table, &*self.hand, idx);
            self.agents[idx].act(self.hand.id, &view)
        };
        trace!(idx, ?requested, "Agent decided");

        let action = self.legalize(idx, requested);
        let record = self.apply(idx, action);

        for agent in self.agents.iter_mut() {
            agent.observe(self.hand.id, &record);
        }
        self.hand.actions.push(record);
    }

    /// Turn whatever the agent asked for into something legal. Anything
    /// that had to change is reported as a failed action.
    fn legalize(&mut self, idx: usize, requested: AgentAction) -> AgentAction {
        let player = &self.table.players[idx];
        let owed = player.owed(self.hand.bet);
        let stack = player.stack;

        let (action, error) = match requested {
            AgentAction::Fold => (AgentAction::Fold, None),
            AgentAction::Check if owed > 0 => {
                (AgentAction::Fold, Some(ActionError::CheckWhileOwing { owed }))
            }
            AgentAction::Check => (AgentAction::Check, None),
            AgentAction::Call if owed == 0 => (AgentAction::Check, None),
            AgentAction::Call => (AgentAction::Call, None),
            AgentAction::AllIn => (AgentAction::AllIn, None),
            AgentAction::Raise(by) => self.legalize_raise(owed, stack, by),
        };

        if let Some(error) = error {
            warn!(
                idx,
                ?requested,
                ?action,
                %error,
                "Illegal action coerced"
            );
            self.record(Action::FailedAction(FailedActionPayload {
                idx,
                action: requested,
                error,
                coerced: action,
            }));
        }
        action
    }

    fn legalize_raise(
        &self,
        owed: Chips,
        stack: Chips,
        by: Chips,
    ) -> (AgentAction, Option<ActionError>) {
        if let Some(max) = self.table.max_raises_per_round {
            if self.hand.raise_count >= max {
                let call = if owed == 0 {
                    AgentAction::Check
                } else {
                    AgentAction::Call
                };
                return (call, Some(ActionError::RaiseCapped));
            }
        }

        let min = self.table.min_raise;
        if owed.saturating_add(by.max(min)) > stack {
            return (AgentAction::AllIn, Some(ActionError::RaiseExceedsStack));
        }
        if by < min {
            return (
                AgentAction::Raise(min),
                Some(ActionError::RaiseTooSmall { by, min }),
            );
        }
        (AgentAction::Raise(by), None)
    }

    /// Apply an already legal action to the seat and the hand.
    fn apply(&mut self, idx: usize, action: AgentAction) -> ActionRecord {
        let starting_pot = self.hand.pot;
        let starting_bet = self.hand.bet;
        let starting_min_raise = self.hand.min_raise;

        let player = &mut self.table.players[idx];
        let starting_player_bet = player.round_bet;
        let owed = player.owed(starting_bet);

        let moved = match action {
            AgentAction::Fold => {
                player.folded = true;
                0
            }
            AgentAction::Check => 0,
            AgentAction::Call => player.commit(owed),
            AgentAction::Raise(by) => player.commit(owed.saturating_add(by)),
            AgentAction::AllIn => {
                let stack = player.stack;
                player.commit(stack)
            }
        };
        let final_player_bet = player.round_bet;
        let player_stack = player.stack;
        let name = player.name.clone();

        self.hand.pot += moved;
        if final_player_bet > starting_bet {
            self.hand.bet = final_player_bet;
            self.hand.bet_holder = Some(idx);
            self.hand.acted = PlayerBitSet::single(idx);
            self.hand.raise_count = self.hand.raise_count.saturating_add(1);
        } else {
            self.hand.acted.enable(idx);
        }

        let mut players_active = PlayerBitSet::default();
        let mut players_all_in = PlayerBitSet::default();
        for (i, p) in self.table.players.iter().enumerate() {
            if p.is_live() {
                players_active.enable(i);
            }
            if p.is_all_in() {
                players_all_in.enable(i);
            }
        }

        self.record(Action::PlayedAction(PlayedActionPayload {
            action,
            idx,
            round: self.hand.round,
            player_stack,
            starting_pot,
            final_pot: self.hand.pot,
            starting_bet,
            final_bet: self.hand.bet,
            starting_min_raise,
            final_min_raise: self.hand.min_raise,
            starting_player_bet,
            final_player_bet,
            players_active,
            players_all_in,
        }));

        ActionRecord {
            idx,
            name,
            round: self.hand.round,
            action,
            amount: moved,
            raised: final_player_bet > starting_bet,
        }
    }

    fn record(&mut self, action: Action) {
        self.historians
            .record(self.hand.id, &*self.table, &*self.hand, action);
    }
}
