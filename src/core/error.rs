use thiserror::Error;

use super::Card;

/// Errors from turning text into cards.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum CardParseError {
    #[error("Unexpected character for a card value")]
    UnexpectedValueChar,
    #[error("Unexpected character for a card suit")]
    UnexpectedSuitChar,
    #[error("Extra characters after the last card")]
    UnparsedCharsRemaining,
    #[error("Card {0} appears more than once")]
    DuplicateCard(Card),
}
