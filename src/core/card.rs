use std::fmt;

use super::error::CardParseError;

/// Card rank. `Two` is the lowest and `Ace` the highest, the discriminant is
/// used directly as a bit index by the ranker.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Value {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// All the values from lowest to highest.
    pub const fn values() -> [Value; 13] {
        VALUES
    }

    /// Look up a value from the index used by the ranker.
    pub fn from_u8(v: u8) -> Option<Value> {
        VALUES.get(v as usize).copied()
    }

    /// Parse the single character representation, e.g. `'T'` for ten.
    pub fn from_char(c: char) -> Option<Value> {
        match c.to_ascii_uppercase() {
            'A' => Some(Value::Ace),
            'K' => Some(Value::King),
            'Q' => Some(Value::Queen),
            'J' => Some(Value::Jack),
            'T' => Some(Value::Ten),
            '9' => Some(Value::Nine),
            '8' => Some(Value::Eight),
            '7' => Some(Value::Seven),
            '6' => Some(Value::Six),
            '5' => Some(Value::Five),
            '4' => Some(Value::Four),
            '3' => Some(Value::Three),
            '2' => Some(Value::Two),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Value::Ace => 'A',
            Value::King => 'K',
            Value::Queen => 'Q',
            Value::Jack => 'J',
            Value::Ten => 'T',
            Value::Nine => '9',
            Value::Eight => '8',
            Value::Seven => '7',
            Value::Six => '6',
            Value::Five => '5',
            Value::Four => '4',
            Value::Three => '3',
            Value::Two => '2',
        }
    }
}

/// Card suit. Suits never order hands, the ordering only exists so cards can
/// be sorted deterministically.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Suit {
    Spade = 0,
    Club = 1,
    Heart = 2,
    Diamond = 3,
}

const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

impl Suit {
    pub const fn suits() -> [Suit; 4] {
        SUITS
    }

    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            's' => Some(Suit::Spade),
            'c' => Some(Suit::Club),
            'h' => Some(Suit::Heart),
            'd' => Some(Suit::Diamond),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Spade => 's',
            Suit::Club => 'c',
            Suit::Heart => 'h',
            Suit::Diamond => 'd',
        }
    }
}

/// A single playing card.
///
/// # Examples
///
/// ```
/// use holdem_table::core::{Card, Suit, Value};
///
/// let card = Card::try_from("Td").unwrap();
/// assert_eq!(card, Card::new(Value::Ten, Suit::Diamond));
/// assert_eq!("Td", card.to_string());
/// ```
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Card {
    pub value: Value,
    pub suit: Suit,
}

impl Card {
    pub const fn new(value: Value, suit: Suit) -> Self {
        Card { value, suit }
    }

    /// Parse a run of cards such as `"AsKd7h"`. Duplicates are rejected.
    pub fn parse_many(s: &str) -> Result<Vec<Card>, CardParseError> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() % 2 != 0 {
            return Err(CardParseError::UnparsedCharsRemaining);
        }

        let mut cards: Vec<Card> = Vec::with_capacity(chars.len() / 2);
        for pair in chars.chunks(2) {
            let card = Card::from_chars(pair[0], pair[1])?;
            if cards.contains(&card) {
                return Err(CardParseError::DuplicateCard(card));
            }
            cards.push(card);
        }
        Ok(cards)
    }

    fn from_chars(value: char, suit: char) -> Result<Card, CardParseError> {
        let value = Value::from_char(value).ok_or(CardParseError::UnexpectedValueChar)?;
        let suit = Suit::from_char(suit).ok_or(CardParseError::UnexpectedSuitChar)?;
        Ok(Card::new(value, suit))
    }
}

impl TryFrom<&str> for Card {
    type Error = CardParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        let value = chars.next().ok_or(CardParseError::UnexpectedValueChar)?;
        let suit = chars.next().ok_or(CardParseError::UnexpectedSuitChar)?;
        if chars.next().is_some() {
            return Err(CardParseError::UnparsedCharsRemaining);
        }
        Card::from_chars(value, suit)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_ordering() {
        assert!(Value::Two < Value::Three);
        assert!(Value::King < Value::Ace);
        assert_eq!(Some(Value::Ace), Value::from_u8(12));
        assert_eq!(None, Value::from_u8(13));
    }

    #[test]
    fn test_char_round_trip() {
        for v in Value::values() {
            assert_eq!(Some(v), Value::from_char(v.to_char()));
        }
        for s in Suit::suits() {
            assert_eq!(Some(s), Suit::from_char(s.to_char()));
        }
    }

    #[test]
    fn test_parse_card() {
        let c = Card::try_from("Ks").unwrap();
        assert_eq!(Value::King, c.value);
        assert_eq!(Suit::Spade, c.suit);

        // Lower case values are accepted
        assert_eq!(c, Card::try_from("ks").unwrap());
    }

    #[test]
    fn test_parse_card_errors() {
        assert_eq!(
            Err(CardParseError::UnexpectedValueChar),
            Card::try_from("Xs")
        );
        assert_eq!(
            Err(CardParseError::UnexpectedSuitChar),
            Card::try_from("Kx")
        );
        assert_eq!(
            Err(CardParseError::UnparsedCharsRemaining),
            Card::try_from("Ksd")
        );
        assert_eq!(Err(CardParseError::UnexpectedSuitChar), Card::try_from("K"));
    }

    #[test]
    fn test_parse_many() {
        let cards = Card::parse_many("As Kd 7h").unwrap();
        assert_eq!(3, cards.len());
        assert_eq!("7h", cards[2].to_string());
    }

    #[test]
    fn test_parse_many_duplicate() {
        let dup = Card::new(Value::Ace, Suit::Spade);
        assert_eq!(
            Err(CardParseError::DuplicateCard(dup)),
            Card::parse_many("AsKdAs")
        );
        assert_eq!(
            Err(CardParseError::UnparsedCharsRemaining),
            Card::parse_many("AsK")
        );
    }
}
