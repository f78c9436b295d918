use uuid::Uuid;

use crate::core::{Card, HandCategory};

use super::{
    action::Action,
    game_state::{HandState, Round},
    hand::HandOutcome,
    historian::{Historian, HistorianError},
    oracle::{HandRank, HandRankOracle},
    table::Table,
    Chips, TableBuilder,
};

/// Checks after every single event that no chip was created or lost:
/// everything behind plus the pot always equals what the table started the
/// hand with.
#[derive(Debug, Default)]
pub struct ChipConservationHistorian {
    pub events: usize,
}

impl Historian for ChipConservationHistorian {
    fn record_action(
        &mut self,
        id: Uuid,
        table: &Table,
        hand: &HandState,
        action: Action,
    ) -> Result<(), HistorianError> {
        self.events += 1;
        assert_eq!(
            hand.starting_total,
            table.total_stacks() + hand.pot,
            "Chips not conserved in hand {id} after {action:?}"
        );
        assert!(hand.board.len() <= 5);

        if let Action::PlayedAction(payload) = &action {
            assert!(payload.final_pot >= payload.starting_pot);
            assert!(payload.final_bet >= payload.starting_bet);
            assert_eq!(payload.final_min_raise, payload.starting_min_raise);
            assert!(hand.board.len() <= payload.round.board_size());
        }
        Ok(())
    }
}

/// Every hand ties with the same category.
pub struct ConstantOracle(pub HandCategory);

impl HandRankOracle for ConstantOracle {
    fn evaluate(&self, _hole: &[Card; 2], _board: &[Card]) -> HandRank {
        HandRank {
            value: 0,
            category: self.0,
        }
    }
}

/// A table with the dealer on seat 0 and the blinds already posted, in the
/// middle of preflop betting. Handy for asking a single agent what it would
/// do.
pub fn preflop_spot(stacks: &[Chips], big_blind: Chips) -> (Table, HandState) {
    let mut table = TableBuilder::new()
        .players(
            stacks
                .iter()
                .enumerate()
                .map(|(idx, s)| (format!("Player-{idx}"), *s)),
        )
        .big_blind(big_blind)
        .build()
        .unwrap();
    let mut hand = HandState::new(Uuid::nil(), &table);
    hand.round = Round::Preflop;

    let (sb, bb) = table.blind_seats().unwrap();
    let small_blind = table.small_blind;
    hand.pot += table.players[sb].commit(small_blind);
    hand.pot += table.players[bb].commit(big_blind);
    hand.bet = big_blind;
    hand.bet_holder = Some(bb);
    (table, hand)
}

/// Sanity checks that hold for every finished hand.
pub fn assert_valid_outcome(outcome: &HandOutcome, starting_total: Chips) {
    let stacks: Chips = outcome.standings.iter().map(|(_, s)| *s).sum();
    assert_eq!(
        starting_total,
        stacks + outcome.undistributed,
        "Chips not conserved: {outcome:?}"
    );

    let awarded: Chips = outcome.winners.iter().map(|w| w.amount).sum();
    assert_eq!(outcome.pot, awarded + outcome.undistributed);
    assert!(!outcome.winners.is_empty());

    if outcome.ended_early {
        assert_eq!(1, outcome.winners.len());
        assert!(outcome.showdown.is_empty());
        assert_eq!(0, outcome.undistributed);
    } else {
        assert_eq!(5, outcome.board.len());
        assert!(outcome.showdown.len() >= 2);
        assert!(outcome.winners.len() <= outcome.showdown.len());
        assert!((outcome.undistributed as usize) < outcome.winners.len());

        let best = outcome.showdown.iter().map(|s| s.rank.value).min();
        for winner in outcome.winners.iter() {
            let shown = outcome
                .showdown
                .iter()
                .find(|s| s.idx == winner.idx)
                .expect("winner must have shown down");
            assert_eq!(best, Some(shown.rank.value));
        }
    }

    // Nobody busted stays seated
    assert!(outcome.standings.iter().all(|(_, s)| *s > 0));
    if !outcome.standings.is_empty() {
        assert!(outcome.next_dealer_idx < outcome.standings.len());
    }

    // Hole cards and board never collide
    let mut seen: Vec<Card> = outcome.board.clone();
    for shown in outcome.showdown.iter() {
        for card in shown.hole_cards {
            assert!(!seen.contains(&card), "{card} dealt twice");
            seen.push(card);
        }
    }
}
