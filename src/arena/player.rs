use crate::core::Card;

use super::Chips;

/// One seat at the table.
///
/// The player is only data. Decisions come from the `Agent` sitting in the
/// same seat, and only the engine changes these fields.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    /// Unique within a table.
    pub name: String,
    /// Chips behind, not counting anything already in the pot.
    pub stack: Chips,
    /// What this player has put in during the current betting round.
    pub round_bet: Chips,
    /// What this player has put in during the whole hand.
    pub hand_bet: Chips,
    pub hole_cards: Option<[Card; 2]>,
    pub folded: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: Chips) -> Self {
        Self {
            name: name.into(),
            stack,
            round_bet: 0,
            hand_bet: 0,
            hole_cards: None,
            folded: false,
        }
    }

    /// Move up to `amount` chips from the stack into this round's bet.
    /// Returns how many chips actually moved; anything past the stack is
    /// dropped, leaving the player all in.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let moved = amount.min(self.stack);
        self.stack -= moved;
        self.round_bet += moved;
        self.hand_bet += moved;
        moved
    }

    /// Still holding cards in this hand.
    pub fn is_live(&self) -> bool {
        !self.folded
    }

    /// Live in the hand but with nothing left to bet.
    pub fn is_all_in(&self) -> bool {
        !self.folded && self.stack == 0 && self.hand_bet > 0
    }

    /// Live and still able to put chips in.
    pub fn can_act(&self) -> bool {
        !self.folded && self.stack > 0
    }

    /// Out of chips once the pot has been settled.
    pub fn is_eliminated(&self) -> bool {
        self.stack == 0
    }

    /// Chips owed to match `bet`, ignoring the stack.
    pub fn owed(&self, bet: Chips) -> Chips {
        bet.saturating_sub(self.round_bet)
    }

    pub(crate) fn reset_for_hand(&mut self) {
        self.round_bet = 0;
        self.hand_bet = 0;
        self.hole_cards = None;
        self.folded = false;
    }

    pub(crate) fn reset_for_round(&mut self) {
        self.round_bet = 0;
    }
}
