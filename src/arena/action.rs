use crate::core::{Card, PlayerBitSet};

use super::{errors::ActionError, game_state::Round, oracle::HandRank, Chips};

/// Represents an action that an agent can take in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum AgentAction {
    /// Folds the current hand.
    Fold,
    /// Pass without putting chips in. Only legal when nothing is owed.
    Check,
    /// Matches the current bet, or as much of it as the stack allows.
    Call,
    /// Match the current bet then put this many more chips on top.
    Raise(Chips),
    /// Go all-in
    AllIn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// A hand has started.
pub struct GameStartPayload {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub min_raise: Chips,
    pub dealer_idx: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSitPayload {
    pub idx: usize,
    pub name: String,
    pub player_stack: Chips,
}

/// Each player is dealt a card. This is the payload for the event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DealStartingHandPayload {
    pub card: Card,
    pub idx: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForcedBetType {
    SmallBlind,
    BigBlind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForcedBetPayload {
    /// The blind size. What actually went in is `posted`, which is lower when
    /// the blind puts the player all in.
    pub bet: Chips,
    pub posted: Chips,
    pub player_stack: Chips,
    pub idx: usize,
    pub forced_bet_type: ForcedBetType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayedActionPayload {
    /// The action as applied, after any coercion.
    pub action: AgentAction,

    pub idx: usize,
    pub round: Round,
    pub player_stack: Chips,

    pub starting_pot: Chips,
    pub final_pot: Chips,

    pub starting_bet: Chips,
    pub final_bet: Chips,

    pub starting_min_raise: Chips,
    pub final_min_raise: Chips,

    pub starting_player_bet: Chips,
    pub final_player_bet: Chips,

    pub players_active: PlayerBitSet,
    pub players_all_in: PlayerBitSet,
}

impl PlayedActionPayload {
    pub fn raise_amount(&self) -> Chips {
        self.final_bet.saturating_sub(self.starting_bet)
    }

    /// Chips this action moved from the stack into the pot.
    pub fn amount_moved(&self) -> Chips {
        self.final_pot - self.starting_pot
    }
}

/// A player asked for something illegal. The engine replaced it with the
/// nearest legal action; a `PlayedAction` with `coerced` follows.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FailedActionPayload {
    pub idx: usize,
    /// What the agent asked for.
    pub action: AgentAction,
    pub error: ActionError,
    /// What was played instead.
    pub coerced: AgentAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShowdownPayload {
    pub idx: usize,
    pub hole_cards: [Card; 2],
    pub rank: HandRank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AwardPayload {
    pub total_pot: Chips,
    pub award_amount: Chips,
    /// None when everyone else folded and no cards were shown.
    pub rank: Option<HandRank>,
    pub idx: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerEliminatedPayload {
    pub idx: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandCompletePayload {
    /// Chip counts after eliminations, in seat order.
    pub standings: Vec<(String, Chips)>,
    /// The dealer for the next hand.
    pub next_dealer_idx: usize,
    /// Tie remainder chips that nobody received.
    pub undistributed: Chips,
}

/// Represents an action that can happen in a game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    GameStart(GameStartPayload),
    PlayerSit(PlayerSitPayload),
    DealStartingHand(DealStartingHandPayload),
    /// The round has advanced.
    RoundAdvance(Round),
    /// A player was forced to post a blind.
    ForcedBet(ForcedBetPayload),
    /// A player has played an action.
    PlayedAction(PlayedActionPayload),
    /// The player tried an illegal action. It was coerced and the coerced
    /// action follows as a `PlayedAction`.
    FailedAction(FailedActionPayload),
    /// A community card has been dealt.
    DealCommunity(Card),
    /// A player's cards were ranked at showdown.
    Showdown(ShowdownPayload),
    /// There was some pot given to a player
    Award(AwardPayload),
    /// A player has no chips left after the hand and leaves the table.
    PlayerEliminated(PlayerEliminatedPayload),
    /// The hand is settled.
    HandComplete(HandCompletePayload),
}
