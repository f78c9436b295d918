use std::fmt;

use super::card::Card;

/// All the different possible hand ranks.
///
/// The u32 payload orders hands within the same rank. It holds up to five
/// card values packed four bits each, most important value first, so two
/// `Rank`s compare correctly with the derived `Ord`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub enum Rank {
    /// No matches
    HighCard(u32),
    OnePair(u32),
    TwoPair(u32),
    ThreeOfAKind(u32),
    /// Five values in a row. The wheel (A-5) is the lowest.
    Straight(u32),
    Flush(u32),
    FullHouse(u32),
    FourOfAKind(u32),
    StraightFlush(u32),
}

/// The rank with the tie breaking detail stripped. This is what gets shown
/// to people.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        };
        f.write_str(label)
    }
}

impl From<Rank> for HandCategory {
    fn from(rank: Rank) -> Self {
        match rank {
            Rank::HighCard(_) => HandCategory::HighCard,
            Rank::OnePair(_) => HandCategory::OnePair,
            Rank::TwoPair(_) => HandCategory::TwoPair,
            Rank::ThreeOfAKind(_) => HandCategory::ThreeOfAKind,
            Rank::Straight(_) => HandCategory::Straight,
            Rank::Flush(_) => HandCategory::Flush,
            Rank::FullHouse(_) => HandCategory::FullHouse,
            Rank::FourOfAKind(_) => HandCategory::FourOfAKind,
            Rank::StraightFlush(_) => HandCategory::StraightFlush,
        }
    }
}

/// Number of bits used by the packed tie breaking detail.
const DETAIL_BITS: u32 = 20;

impl Rank {
    pub fn category(&self) -> HandCategory {
        HandCategory::from(*self)
    }

    fn detail(&self) -> u32 {
        match *self {
            Rank::HighCard(d)
            | Rank::OnePair(d)
            | Rank::TwoPair(d)
            | Rank::ThreeOfAKind(d)
            | Rank::Straight(d)
            | Rank::Flush(d)
            | Rank::FullHouse(d)
            | Rank::FourOfAKind(d)
            | Rank::StraightFlush(d) => d,
        }
    }

    /// A single number ordering every possible rank. Bigger is better.
    pub fn strength(&self) -> u32 {
        ((self.category() as u32) << DETAIL_BITS) | self.detail()
    }

    /// The largest value `strength` can return.
    pub const fn max_strength() -> u32 {
        ((HandCategory::StraightFlush as u32 + 1) << DETAIL_BITS) - 1
    }
}

/// Pack up to five values into nibbles. Values are stored plus one so a
/// missing kicker sorts below a deuce.
fn pack(values: &[u8]) -> u32 {
    (0..5).fold(0, |acc, i| {
        let v = values.get(i).map_or(0, |v| u32::from(*v) + 1);
        (acc << 4) | v
    })
}

/// Values present in `mask` from highest to lowest.
fn values_desc(mask: u16) -> impl Iterator<Item = u8> {
    (0..13u8).rev().filter(move |v| mask & (1 << v) != 0)
}

/// The high value of the best straight in `mask`, if there is one. The
/// wheel reports five as its high card.
fn straight_high(mask: u16) -> Option<u8> {
    const RUN: u16 = 0b1_1111;
    const WHEEL: u16 = 0b1_0000_0000_1111;

    (4..13u8)
        .rev()
        .find(|high| (mask >> (high - 4)) & RUN == RUN)
        .or_else(|| (mask & WHEEL == WHEEL).then_some(3))
}

/// Anything that holds cards can be ranked. Works for any number of cards up
/// to seven; the best five card hand is found.
pub trait Rankable {
    fn cards(&self) -> &[Card];

    /// Rank the best five card hand.
    ///
    /// # Examples
    /// ```
    /// use holdem_table::core::{Card, HandCategory, Rankable};
    ///
    /// let cards = Card::parse_many("2h2d8d8sKd6sTh").unwrap();
    /// assert_eq!(HandCategory::TwoPair, cards.rank().category());
    /// ```
    fn rank(&self) -> Rank {
        let mut counts = [0u8; 13];
        let mut suit_masks = [0u16; 4];
        let mut value_mask: u16 = 0;

        for c in self.cards() {
            let v = c.value as usize;
            counts[v] += 1;
            value_mask |= 1 << v;
            suit_masks[c.suit as usize] |= 1 << v;
        }

        if let Some(flush_mask) = suit_masks.iter().copied().find(|m| m.count_ones() >= 5) {
            return match straight_high(flush_mask) {
                Some(high) => Rank::StraightFlush(pack(&[high])),
                None => {
                    let top: Vec<u8> = values_desc(flush_mask).take(5).collect();
                    Rank::Flush(pack(&top))
                }
            };
        }

        // Group values by how often they appear, biggest groups first then
        // highest values first.
        let mut groups: Vec<(u8, u8)> = (0..13u8)
            .filter(|v| counts[*v as usize] > 0)
            .map(|v| (counts[v as usize], v))
            .collect();
        groups.sort_unstable_by(|a, b| b.cmp(a));

        let kickers = |skip: &[u8], n: usize| -> Vec<u8> {
            values_desc(value_mask)
                .filter(|v| !skip.contains(v))
                .take(n)
                .collect()
        };

        match groups.as_slice() {
            [(4, quad), ..] => {
                let mut vals = vec![*quad];
                vals.extend(kickers(&[*quad], 1));
                Rank::FourOfAKind(pack(&vals))
            }
            [(3, set), (c, pair), ..] if *c >= 2 => Rank::FullHouse(pack(&[*set, *pair])),
            _ => {
                if let Some(high) = straight_high(value_mask) {
                    return Rank::Straight(pack(&[high]));
                }
                match groups.as_slice() {
                    [(3, set), ..] => {
                        let mut vals = vec![*set];
                        vals.extend(kickers(&[*set], 2));
                        Rank::ThreeOfAKind(pack(&vals))
                    }
                    [(2, high), (2, low), ..] => {
                        let mut vals = vec![*high, *low];
                        vals.extend(kickers(&[*high, *low], 1));
                        Rank::TwoPair(pack(&vals))
                    }
                    [(2, pair), ..] => {
                        let mut vals = vec![*pair];
                        vals.extend(kickers(&[*pair], 3));
                        Rank::OnePair(pack(&vals))
                    }
                    _ => Rank::HighCard(pack(&kickers(&[], 5))),
                }
            }
        }
    }
}

impl Rankable for [Card] {
    fn cards(&self) -> &[Card] {
        self
    }
}

impl Rankable for Vec<Card> {
    fn cards(&self) -> &[Card] {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(s: &str) -> Rank {
        Card::parse_many(s).unwrap().rank()
    }

    #[test]
    fn test_pack_orders_kickers() {
        assert!(pack(&[12, 3]) > pack(&[12, 2]));
        assert!(pack(&[0]) > pack(&[]));
    }

    #[test]
    fn test_categories() {
        assert_eq!(HandCategory::HighCard, rank("As9d7c5h3s").category());
        assert_eq!(HandCategory::OnePair, rank("AsAd7c5h3s").category());
        assert_eq!(HandCategory::TwoPair, rank("AsAd7c7h3s").category());
        assert_eq!(HandCategory::ThreeOfAKind, rank("AsAdAc7h3s").category());
        assert_eq!(HandCategory::Straight, rank("9s8d7c6h5s").category());
        assert_eq!(HandCategory::Flush, rank("As9s7s5s3s").category());
        assert_eq!(HandCategory::FullHouse, rank("AsAdAc7h7s").category());
        assert_eq!(HandCategory::FourOfAKind, rank("AsAdAcAh7s").category());
        assert_eq!(HandCategory::StraightFlush, rank("9s8s7s6s5s").category());
    }

    #[test]
    fn test_category_order() {
        let hands = [
            "As9d7c5h3s",
            "AsAd7c5h3s",
            "AsAd7c7h3s",
            "AsAdAc7h3s",
            "9s8d7c6h5s",
            "As9s7s5s3s",
            "AsAdAc7h7s",
            "AsAdAcAh7s",
            "9s8s7s6s5s",
        ];
        for pair in hands.windows(2) {
            assert!(rank(pair[0]) < rank(pair[1]), "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_wheel_is_lowest_straight() {
        let wheel = rank("As2d3c4h5s");
        let six_high = rank("2d3c4h5s6s");
        assert_eq!(Rank::Straight(pack(&[3])), wheel);
        assert!(wheel < six_high);
    }

    #[test]
    fn test_seven_card_best_hand() {
        // Pair of eights on board, hole cards make two pair with king kicker
        let r = rank("2h2d8d8sKd6sTh");
        assert_eq!(Rank::TwoPair(pack(&[6, 0, 11])), r);
    }

    #[test]
    fn test_kicker_decides() {
        assert!(rank("AsAdKc5h3s") > rank("AhAcQc5d3h"));
        assert_eq!(rank("AsAdKc5h3s"), rank("AhAcKd5d3h"));
    }

    #[test]
    fn test_three_pairs_uses_best_kicker() {
        // Third pair's value can be the kicker
        let r = rank("KsKd9c9h5s5d2c");
        assert_eq!(Rank::TwoPair(pack(&[11, 7, 3])), r);
    }

    #[test]
    fn test_two_sets_make_full_house() {
        let r = rank("KsKdKc9h9s9d2c");
        assert_eq!(Rank::FullHouse(pack(&[11, 7])), r);
    }

    #[test]
    fn test_flush_beats_straight_in_seven() {
        let r = rank("9h8d7h6h5c2hKh");
        assert_eq!(HandCategory::Flush, r.category());
    }

    #[test]
    fn test_partial_hands() {
        // Two hole cards alone still rank
        assert_eq!(HandCategory::OnePair, rank("AsAd").category());
        assert!(rank("AsAd") > rank("AsKd"));
    }

    #[test]
    fn test_strength_is_monotonic() {
        assert!(rank("9s8s7s6s5s").strength() > rank("AsAdAcAh7s").strength());
        assert!(rank("TsJsQsKsAs").strength() <= Rank::max_strength());
    }

    #[test]
    fn test_display() {
        assert_eq!("Full House", HandCategory::FullHouse.to_string());
        assert_eq!("Pair", HandCategory::OnePair.to_string());
    }
}
