use rand::{seq::SliceRandom, Rng};

use super::{Card, Suit, Value};

/// A deck of cards that is dealt from the top.
///
/// Every card can appear at most once, so dealing from a deck can never
/// produce a collision between hole cards and the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    // The top of the deck is the end of the vec.
    cards: Vec<Card>,
}

impl Deck {
    /// A full 52 card deck shuffled with the provided rng.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Deck::default();
        deck.shuffle(rng);
        deck
    }

    /// Create a deck that deals the given cards in order. The first card in
    /// `cards` is the first card dealt. Duplicates are dropped keeping the
    /// first occurrence.
    ///
    /// This is mostly useful for setting up known hands in tests.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let mut seen: Vec<Card> = Vec::with_capacity(cards.len());
        for card in cards {
            if !seen.contains(&card) {
                seen.push(card);
            }
        }
        seen.reverse();
        Deck { cards: seen }
    }

    /// A full deck where `top` comes off first, in order, and the rest of
    /// the cards follow shuffled.
    pub fn stacked<R: Rng + ?Sized>(top: &[Card], rng: &mut R) -> Self {
        let mut rest = Deck::shuffled(rng);
        rest.cards.retain(|c| !top.contains(c));
        let mut deck = Deck::from_cards(top.to_vec());
        rest.cards.append(&mut deck.cards);
        deck.cards = rest.cards;
        deck
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Take the top card. `None` once the deck is empty.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    /// Remove a card wherever it is in the deck. Returns true if it was there.
    pub fn remove(&mut self, card: &Card) -> bool {
        match self.cards.iter().position(|c| c == card) {
            Some(idx) => {
                self.cards.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Deck {
    /// All 52 cards in a fixed order.
    fn default() -> Self {
        let cards = Value::values()
            .into_iter()
            .flat_map(|v| Suit::suits().into_iter().map(move |s| Card::new(v, s)))
            .collect();
        Deck { cards }
    }
}
