use crate::core::{Card, HandCategory, Rank, Rankable};

/// How a hand scored at showdown. Lower `value` is the stronger hand; equal
/// values split the pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandRank {
    pub value: u32,
    pub category: HandCategory,
}

/// Scores hole cards plus whatever is on the board. The engine only ever
/// compares the values it returns, so any evaluator can be plugged in.
pub trait HandRankOracle {
    fn evaluate(&self, hole: &[Card; 2], board: &[Card]) -> HandRank;
}

/// The default oracle backed by the crate's own hand ranker.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardOracle;

impl HandRankOracle for StandardOracle {
    fn evaluate(&self, hole: &[Card; 2], board: &[Card]) -> HandRank {
        let mut cards: Vec<Card> = Vec::with_capacity(7);
        cards.extend_from_slice(hole);
        cards.extend_from_slice(board);
        let rank: Rank = cards.rank();
        HandRank {
            value: Rank::max_strength() - rank.strength(),
            category: rank.category(),
        }
    }
}
