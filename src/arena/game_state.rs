use std::fmt::Display;

use uuid::Uuid;

use crate::core::{Card, PlayerBitSet};

use super::{action::AgentAction, table::Table, Chips};

/// The round of the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Round {
    /// Cards are being dealt and blinds posted.
    Starting,
    Preflop,
    Flop,
    Turn,
    River,
    /// The remaining hands are compared.
    Showdown,
    /// The pot has been awarded.
    Complete,
}

impl Round {
    /// Gets the next round in the sequence. `Complete` stays `Complete`.
    pub fn advance(&self) -> Self {
        match *self {
            Round::Starting => Round::Preflop,
            Round::Preflop => Round::Flop,
            Round::Flop => Round::Turn,
            Round::Turn => Round::River,
            Round::River => Round::Showdown,
            Round::Showdown => Round::Complete,
            Round::Complete => Round::Complete,
        }
    }

    /// Cards on the board once this round's cards are out.
    pub fn board_size(&self) -> usize {
        match *self {
            Round::Starting | Round::Preflop => 0,
            Round::Flop => 3,
            Round::Turn => 4,
            Round::River | Round::Showdown | Round::Complete => 5,
        }
    }

    /// Community cards revealed when entering this round.
    pub fn cards_revealed(&self) -> usize {
        match *self {
            Round::Flop => 3,
            Round::Turn | Round::River => 1,
            _ => 0,
        }
    }

    /// True for the four rounds that have betting.
    pub fn is_betting(&self) -> bool {
        matches!(
            *self,
            Round::Preflop | Round::Flop | Round::Turn | Round::River
        )
    }
}

impl Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Round::Starting => "starting",
            Round::Preflop => "preflop",
            Round::Flop => "flop",
            Round::Turn => "turn",
            Round::River => "river",
            Round::Showdown => "showdown",
            Round::Complete => "complete",
        };
        f.write_str(s)
    }
}

/// One entry in a hand's action log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    pub idx: usize,
    pub name: String,
    pub round: Round,
    /// The action as played, after coercion.
    pub action: AgentAction,
    /// Chips moved into the pot by this action.
    pub amount: Chips,
    /// The action lifted the bet to match. True for raises and for all-ins
    /// that went over the bet.
    pub raised: bool,
}

/// Everything about the hand in progress that isn't stored on the seats.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandState {
    pub id: Uuid,
    pub round: Round,
    pub pot: Chips,
    /// The contribution everyone has to match this round.
    pub bet: Chips,
    /// Smallest legal raise right now.
    pub min_raise: Chips,
    /// Whoever made the outstanding bet. The big blind preflop.
    pub bet_holder: Option<usize>,
    pub board: Vec<Card>,
    /// Seats that acted since the last raise.
    pub acted: PlayerBitSet,
    pub raise_count: u8,
    pub actions: Vec<ActionRecord>,
    /// Sum of all stacks when the hand started.
    pub starting_total: Chips,
}

impl HandState {
    pub fn new(id: Uuid, table: &Table) -> Self {
        Self {
            id,
            round: Round::Starting,
            pot: 0,
            bet: 0,
            min_raise: table.min_raise,
            bet_holder: None,
            board: Vec::with_capacity(5),
            acted: PlayerBitSet::default(),
            raise_count: 0,
            actions: Vec::new(),
            starting_total: table.total_stacks(),
        }
    }

    /// Clear the per round betting state for a new round.
    pub(crate) fn reset_round(&mut self, round: Round, min_raise: Chips) {
        self.round = round;
        self.bet = 0;
        self.min_raise = min_raise;
        self.bet_holder = None;
        self.acted.clear();
        self.raise_count = 0;
    }

    /// Actions played in `round` so far.
    pub fn round_actions(&self, round: Round) -> impl Iterator<Item = &ActionRecord> {
        self.actions.iter().filter(move |r| r.round == round)
    }
}

/// What an opponent looks like from across the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentView {
    pub idx: usize,
    pub name: String,
    pub stack: Chips,
    pub round_bet: Chips,
    pub folded: bool,
}

/// The read-only snapshot handed to an agent when it is their turn. It only
/// holds what the seat is allowed to see.
#[derive(Debug, Clone)]
pub struct PublicGameView<'a> {
    pub hand_id: Uuid,
    pub round: Round,
    pub idx: usize,
    pub hole_cards: Option<[Card; 2]>,
    pub board: &'a [Card],
    pub pot: Chips,
    /// Chips needed to call, capped at the stack.
    pub to_call: Chips,
    pub current_bet: Chips,
    pub min_raise: Chips,
    pub stack: Chips,
    pub round_bet: Chips,
    pub dealer_idx: usize,
    pub big_blind: Chips,
    pub opponents: Vec<OpponentView>,
    pub actions: &'a [ActionRecord],
}

impl<'a> PublicGameView<'a> {
    pub fn new(table: &Table, hand: &'a HandState, idx: usize) -> Self {
        let player = &table.players[idx];
        let opponents = table
            .players
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(i, p)| OpponentView {
                idx: i,
                name: p.name.clone(),
                stack: p.stack,
                round_bet: p.round_bet,
                folded: p.folded,
            })
            .collect();

        Self {
            hand_id: hand.id,
            round: hand.round,
            idx,
            hole_cards: player.hole_cards,
            board: &hand.board,
            pot: hand.pot,
            to_call: player.owed(hand.bet).min(player.stack),
            current_bet: hand.bet,
            min_raise: hand.min_raise,
            stack: player.stack,
            round_bet: player.round_bet,
            dealer_idx: table.dealer_idx,
            big_blind: table.big_blind,
            opponents,
            actions: &hand.actions,
        }
    }

    /// Number of opponents still holding cards.
    pub fn live_opponents(&self) -> usize {
        self.opponents.iter().filter(|o| !o.folded).count()
    }

    /// Whether checking is legal.
    pub fn can_check(&self) -> bool {
        self.to_call == 0
    }
}
