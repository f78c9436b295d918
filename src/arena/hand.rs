use rand::Rng;
use tracing::{debug, info, instrument, trace};
use uuid::Uuid;

use crate::core::{Card, Deck};

use super::{
    action::{
        Action, AwardPayload, DealStartingHandPayload, GameStartPayload, HandCompletePayload,
        PlayerEliminatedPayload, PlayerSitPayload, ShowdownPayload,
    },
    betting::{BettingRoundEngine, StageResult},
    errors::TableError,
    game_state::{ActionRecord, HandState, Round},
    historian::Historians,
    oracle::{HandRank, HandRankOracle},
    table::Table,
    Agent, Chips,
};

/// Chips paid out to one seat.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PotAward {
    /// Seat index during the hand, before any eliminations.
    pub idx: usize,
    pub name: String,
    pub amount: Chips,
}

/// A hand that was shown down.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShowdownResult {
    pub idx: usize,
    pub name: String,
    pub hole_cards: [Card; 2],
    pub rank: HandRank,
}

/// Everything worth knowing about a finished hand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandOutcome {
    pub hand_id: Uuid,
    /// The pot before it was awarded.
    pub pot: Chips,
    pub winners: Vec<PotAward>,
    /// Every hand that reached showdown, in seat order. Empty when everyone
    /// else folded.
    pub showdown: Vec<ShowdownResult>,
    pub board: Vec<Card>,
    pub ended_early: bool,
    pub actions: Vec<ActionRecord>,
    /// Names of the players who ran out of chips.
    pub eliminated: Vec<String>,
    /// Tie remainder left unawarded.
    pub undistributed: Chips,
    /// Stacks after eliminations, in the new seat order.
    pub standings: Vec<(String, Chips)>,
    pub next_dealer_idx: usize,
}

/// Plays a single hand from the deal to the dealer button moving.
pub struct HandOrchestrator<'a> {
    table: &'a mut Table,
    agents: &'a mut Vec<Box<dyn Agent>>,
    historians: &'a mut Historians,
    oracle: &'a dyn HandRankOracle,
    deck: Option<Deck>,
}

impl<'a> HandOrchestrator<'a> {
    pub fn new(
        table: &'a mut Table,
        agents: &'a mut Vec<Box<dyn Agent>>,
        historians: &'a mut Historians,
        oracle: &'a dyn HandRankOracle,
    ) -> Self {
        Self {
            table,
            agents,
            historians,
            oracle,
            deck: None,
        }
    }

    /// Deal from this deck instead of a freshly shuffled one.
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Play the hand.
    ///
    /// # Errors
    ///
    /// Nothing is dealt when fewer than two players have chips or the agents
    /// don't line up with the seats. Running out of cards can only happen
    /// with a short deck passed to `with_deck`.
    #[instrument(level = "debug", skip(self, rng), fields(dealer_idx = self.table.dealer_idx))]
    pub fn play_hand<R: Rng + ?Sized>(mut self, rng: &mut R) -> Result<HandOutcome, TableError> {
        let funded = self.table.num_funded_players();
        if funded < 2 {
            return Err(TableError::NotEnoughPlayers { funded });
        }
        if self.agents.len() != self.table.num_players() {
            return Err(TableError::AgentCountMismatch {
                agents: self.agents.len(),
                seats: self.table.num_players(),
            });
        }

        let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
        let mut hand = HandState::new(id, &*self.table);
        let mut deck = match self.deck.take() {
            Some(deck) => deck,
            None => Deck::shuffled(rng),
        };

        self.start(&mut hand);
        self.deal_hole_cards(&mut hand, &mut deck)?;

        let mut winner = None;
        for round in [Round::Preflop, Round::Flop, Round::Turn, Round::River] {
            hand.round = round;
            self.record(&hand, Action::RoundAdvance(round));
            for _ in 0..round.cards_revealed() {
                let card = deck.deal().ok_or(TableError::DeckExhausted)?;
                hand.board.push(card);
                self.record(&hand, Action::DealCommunity(card));
            }

            let result = BettingRoundEngine::new(
                &mut *self.table,
                &mut hand,
                self.agents.as_mut_slice(),
                &mut *self.historians,
            )
            .run_stage(round);

            if let StageResult::HandEndedEarly { winner: idx } = result {
                winner = Some(idx);
                break;
            }
        }

        let pot = hand.pot;
        let (winners, showdown) = match winner {
            Some(idx) => (vec![self.award(&mut hand, idx, pot, None)], vec![]),
            None => self.showdown(&mut hand),
        };
        let undistributed = hand.pot;

        hand.round = Round::Complete;
        self.record(&hand, Action::RoundAdvance(Round::Complete));

        let eliminated = self.remove_busted(&hand);

        let standings = self.table.standings();
        self.record(
            &hand,
            Action::HandComplete(HandCompletePayload {
                standings: standings.clone(),
                next_dealer_idx: self.table.dealer_idx,
                undistributed,
            }),
        );
        debug!(
            hand_id = %id,
            pot,
            undistributed,
            ended_early = winner.is_some(),
            ?standings,
            "Hand complete"
        );

        Ok(HandOutcome {
            hand_id: id,
            pot,
            winners,
            showdown,
            board: hand.board,
            ended_early: winner.is_some(),
            actions: hand.actions,
            eliminated,
            undistributed,
            standings,
            next_dealer_idx: self.table.dealer_idx,
        })
    }

    fn start(&mut self, hand: &mut HandState) {
        for player in self.table.players.iter_mut() {
            player.reset_for_hand();
            // Anyone without chips sits this hand out
            if player.stack == 0 {
                player.folded = true;
            }
        }

        self.record(
            hand,
            Action::GameStart(GameStartPayload {
                small_blind: self.table.small_blind,
                big_blind: self.table.big_blind,
                min_raise: self.table.min_raise,
                dealer_idx: self.table.dealer_idx,
            }),
        );
        for idx in 0..self.table.num_players() {
            let player = &self.table.players[idx];
            let payload = PlayerSitPayload {
                idx,
                name: player.name.clone(),
                player_stack: player.stack,
            };
            self.record(hand, Action::PlayerSit(payload));
        }
    }

    /// Two passes around the table, one card each, starting left of the
    /// dealer.
    fn deal_hole_cards(&mut self, hand: &mut HandState, deck: &mut Deck) -> Result<(), TableError> {
        let n = self.table.num_players();
        let order: Vec<usize> = (1..=n)
            .map(|offset| (self.table.dealer_idx + offset) % n)
            .filter(|idx| self.table.players[*idx].is_live())
            .collect();

        let mut first: Vec<Option<Card>> = vec![None; n];
        for pass in 0..2 {
            for idx in order.iter().copied() {
                let card = deck.deal().ok_or(TableError::DeckExhausted)?;
                if pass == 0 {
                    first[idx] = Some(card);
                } else if let Some(first_card) = first[idx] {
                    self.table.players[idx].hole_cards = Some([first_card, card]);
                }
                trace!(idx, %card, "Dealt hole card");
                self.record(hand, Action::DealStartingHand(DealStartingHandPayload { card, idx }));
            }
        }
        Ok(())
    }

    /// Move `amount` from the pot to a seat.
    fn award(
        &mut self,
        hand: &mut HandState,
        idx: usize,
        amount: Chips,
        rank: Option<HandRank>,
    ) -> PotAward {
        let total_pot = hand.pot;
        let player = &mut self.table.players[idx];
        player.stack += amount;
        hand.pot -= amount;
        let name = player.name.clone();

        debug!(idx, amount, "Awarding pot");
        self.record(
            hand,
            Action::Award(AwardPayload {
                total_pot,
                award_amount: amount,
                rank,
                idx,
            }),
        );
        PotAward { idx, name, amount }
    }

    /// Rank every live hand. The lowest value takes the pot, ties split it
    /// evenly and whatever doesn't divide stays unawarded.
    fn showdown(&mut self, hand: &mut HandState) -> (Vec<PotAward>, Vec<ShowdownResult>) {
        hand.round = Round::Showdown;
        self.record(hand, Action::RoundAdvance(Round::Showdown));

        let mut results = Vec::new();
        for (idx, player) in self.table.players.iter().enumerate() {
            if !player.is_live() {
                continue;
            }
            let Some(hole_cards) = player.hole_cards else {
                continue;
            };
            let rank = self.oracle.evaluate(&hole_cards, &hand.board);
            results.push(ShowdownResult {
                idx,
                name: player.name.clone(),
                hole_cards,
                rank,
            });
        }
        for result in results.iter() {
            self.record(
                hand,
                Action::Showdown(ShowdownPayload {
                    idx: result.idx,
                    hole_cards: result.hole_cards,
                    rank: result.rank,
                }),
            );
        }

        let Some(best) = results.iter().map(|r| r.rank.value).min() else {
            return (vec![], results);
        };
        let winners: Vec<(usize, HandRank)> = results
            .iter()
            .filter(|r| r.rank.value == best)
            .map(|r| (r.idx, r.rank))
            .collect();

        let share = hand.pot / winners.len() as Chips;
        let awards = winners
            .into_iter()
            .map(|(idx, rank)| self.award(hand, idx, share, Some(rank)))
            .collect();
        (awards, results)
    }

    /// Drop busted players with their agents and move the button.
    fn remove_busted(&mut self, hand: &HandState) -> Vec<String> {
        let removed = self.table.remove_busted_and_rotate();
        for (idx, _) in removed.iter().rev() {
            self.agents.remove(*idx);
        }

        removed
            .into_iter()
            .map(|(idx, player)| {
                info!(idx, name = %player.name, "Player eliminated");
                self.record(
                    hand,
                    Action::PlayerEliminated(PlayerEliminatedPayload {
                        idx,
                        name: player.name.clone(),
                    }),
                );
                player.name
            })
            .collect()
    }

    fn record(&mut self, hand: &HandState, action: Action) {
        self.historians.record(hand.id, &*self.table, hand, action);
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{
        arena::{
            action::AgentAction,
            agent::{CallingAgent, FoldingAgent, VecReplayAgent},
            historian::{Historian, VecHistorian},
            oracle::StandardOracle,
            test_util::{assert_valid_outcome, ChipConservationHistorian, ConstantOracle},
            TableBuilder,
        },
        core::HandCategory,
    };

    use super::*;

    fn historians() -> Historians {
        let hist: Vec<Box<dyn Historian>> = vec![Box::new(ChipConservationHistorian::default())];
        Historians::new(hist, true)
    }

    fn callers(n: usize) -> Vec<Box<dyn Agent>> {
        (0..n)
            .map(|idx| Box::new(CallingAgent::new(format!("caller-{idx}"))) as Box<dyn Agent>)
            .collect()
    }

    #[test_log::test]
    fn test_heads_up_check_down() {
        let mut table = TableBuilder::new()
            .player("Alice", 1000)
            .player("Bob", 1000)
            .blinds(20, 10)
            .build()
            .unwrap();
        let mut agents = callers(2);
        let mut hist = historians();
        let mut rng = StdRng::seed_from_u64(11);

        let outcome = HandOrchestrator::new(&mut table, &mut agents, &mut hist, &StandardOracle)
            .play_hand(&mut rng)
            .unwrap();

        assert_eq!(40, outcome.pot);
        assert_eq!(5, outcome.board.len());
        assert_eq!(2, outcome.showdown.len());
        assert_eq!(2000, table.total_stacks() + outcome.undistributed);
        assert_valid_outcome(&outcome, 2000);
    }

    #[test]
    fn test_everyone_folds_to_dealer() {
        // Dealer is seat 0. Blinds are seats 1 and 2, seat 3 acts first.
        let mut table = TableBuilder::new()
            .num_players_with_stack(4, 1000)
            .blinds(20, 10)
            .build()
            .unwrap();
        let mut agents: Vec<Box<dyn Agent>> = vec![
            Box::new(VecReplayAgent::new("dealer", vec![AgentAction::Raise(20)])),
            Box::new(FoldingAgent::new("sb")),
            Box::new(FoldingAgent::new("bb")),
            Box::new(FoldingAgent::new("utg")),
        ];
        let mut hist = historians();
        let mut rng = StdRng::seed_from_u64(3);

        let outcome = HandOrchestrator::new(&mut table, &mut agents, &mut hist, &StandardOracle)
            .play_hand(&mut rng)
            .unwrap();

        assert!(outcome.ended_early);
        assert!(outcome.board.is_empty());
        assert!(outcome.showdown.is_empty());
        assert_eq!(
            vec![PotAward {
                idx: 0,
                name: "Player-0".to_string(),
                amount: 70,
            }],
            outcome.winners
        );
        // The dealer raised to 40 and collected both blinds
        assert_eq!(1030, table.players[0].stack);
        assert_eq!(990, table.players[1].stack);
        assert_eq!(980, table.players[2].stack);
        assert_eq!(1, table.dealer_idx);
    }

    #[test]
    fn test_no_board_cards_after_fold_out() {
        let hist = Box::new(VecHistorian::new());
        let storage = hist.get_storage();
        let mut table = TableBuilder::new()
            .num_players_with_stack(3, 100)
            .blinds(10, 5)
            .build()
            .unwrap();
        let mut agents: Vec<Box<dyn Agent>> = vec![
            Box::new(VecReplayAgent::new("r0", vec![AgentAction::Call, AgentAction::Fold])),
            Box::new(VecReplayAgent::new("r1", vec![AgentAction::Call, AgentAction::Fold])),
            Box::new(VecReplayAgent::new("r2", vec![AgentAction::Check])),
        ];
        let hists: Vec<Box<dyn Historian>> = vec![hist];
        let mut historians = Historians::new(hists, true);
        let mut rng = StdRng::seed_from_u64(8);

        let outcome = HandOrchestrator::new(&mut table, &mut agents, &mut historians, &StandardOracle)
            .play_hand(&mut rng)
            .unwrap();

        // Flop: seat 1 folds, seat 2 (which got no preflop option) checks and
        // seat 0 folds.
        assert!(outcome.ended_early);
        assert_eq!(3, outcome.board.len());
        assert_eq!(2, outcome.winners[0].idx);
        let community = storage
            .borrow()
            .iter()
            .filter(|r| matches!(r.action, Action::DealCommunity(_)))
            .count();
        assert_eq!(3, community);
    }

    #[test]
    fn test_tie_splits_and_keeps_remainder() {
        let mut table = TableBuilder::new()
            .num_players_with_stack(3, 1000)
            .blinds(20, 10)
            .build()
            .unwrap();
        let mut agents: Vec<Box<dyn Agent>> = vec![
            Box::new(VecReplayAgent::new_with_default(
                "r0",
                vec![AgentAction::Raise(1)],
                AgentAction::Check,
            )),
            Box::new(CallingAgent::new("c1")),
            Box::new(CallingAgent::new("c2")),
        ];
        let mut hist = historians();
        let mut rng = StdRng::seed_from_u64(5);
        let oracle = ConstantOracle(HandCategory::HighCard);

        let outcome = HandOrchestrator::new(&mut table, &mut agents, &mut hist, &oracle)
            .play_hand(&mut rng)
            .unwrap();

        // Raise lifted to 20 makes 40 a head, pot is 120, everyone ties
        assert_eq!(120, outcome.pot);
        assert_eq!(3, outcome.winners.len());
        assert!(outcome.winners.iter().all(|w| w.amount == 40));
        assert_eq!(0, outcome.undistributed);
        assert_valid_outcome(&outcome, 3000);
    }

    #[test]
    fn test_tie_remainder_is_undistributed() {
        let mut table = TableBuilder::new()
            .num_players_with_stack(3, 1000)
            .blinds(20, 5)
            .build()
            .unwrap();
        // The small blind folds and the other two check it down
        let mut agents: Vec<Box<dyn Agent>> = vec![
            Box::new(CallingAgent::new("c0")),
            Box::new(VecReplayAgent::new("r1", vec![AgentAction::Fold])),
            Box::new(CallingAgent::new("c2")),
        ];
        let mut hist = historians();
        let mut rng = StdRng::seed_from_u64(5);
        let oracle = ConstantOracle(HandCategory::Flush);

        let outcome = HandOrchestrator::new(&mut table, &mut agents, &mut hist, &oracle)
            .play_hand(&mut rng)
            .unwrap();

        // 20 + 5 + 20 = 45 split two ways
        assert_eq!(45, outcome.pot);
        assert_eq!(2, outcome.winners.len());
        assert!(outcome.winners.iter().all(|w| w.amount == 22));
        assert_eq!(1, outcome.undistributed);
        assert_eq!(2999, table.total_stacks());
        assert_valid_outcome(&outcome, 3000);
    }

    #[test]
    fn test_elimination_removes_agent_and_moves_button() {
        let mut table = TableBuilder::new()
            .player("Alice", 1000)
            .player("Bob", 1000)
            .player("Carol", 15)
            .blinds(20, 10)
            .build()
            .unwrap();
        // Carol is all in from the big blind. Alice raises, Bob folds and
        // aces hold up against seven deuce.
        let mut agents: Vec<Box<dyn Agent>> = vec![
            Box::new(VecReplayAgent::new("alice", vec![AgentAction::Raise(100)])),
            Box::new(FoldingAgent::new("bob")),
            Box::new(FoldingAgent::new("carol")),
        ];
        let mut hist = historians();
        let mut rng = StdRng::seed_from_u64(1);
        // Dealt Bob, Carol, Alice then around again, then the board
        let top = Card::parse_many("2c 7d As 3c 2d Ah KhQs9c8h4s").unwrap();
        let deck = Deck::stacked(&top, &mut rng);

        let outcome = HandOrchestrator::new(&mut table, &mut agents, &mut hist, &StandardOracle)
            .with_deck(deck)
            .play_hand(&mut rng)
            .unwrap();

        assert_eq!(145, outcome.pot);
        assert_eq!(vec!["Carol".to_string()], outcome.eliminated);
        assert_eq!(2, table.num_players());
        assert_eq!(2, agents.len());
        assert_eq!("alice", agents[0].name());
        assert_eq!("bob", agents[1].name());
        assert_eq!(1025, table.players[0].stack);
        // The button moves one seat from Alice to Bob
        assert_eq!("Bob", table.players[table.dealer_idx].name);
        assert_eq!(outcome.next_dealer_idx, table.dealer_idx);
    }

    #[test]
    fn test_stacked_deck_deals_known_cards() {
        let mut table = TableBuilder::new()
            .num_players_with_stack(2, 100)
            .blinds(10, 5)
            .build()
            .unwrap();
        let mut agents = callers(2);
        let mut hist = historians();
        let mut rng = StdRng::seed_from_u64(9);

        // Seat 1 gets the first card since dealing starts left of the dealer
        let top = Card::parse_many("AsKd AhKc 2c3d4h8s9s").unwrap();
        let deck = Deck::stacked(&top, &mut rng);
        let outcome = HandOrchestrator::new(&mut table, &mut agents, &mut hist, &StandardOracle)
            .with_deck(deck)
            .play_hand(&mut rng)
            .unwrap();

        assert_eq!(Some([top[0], top[2]]), table.players[1].hole_cards);
        assert_eq!(Some([top[1], top[3]]), table.players[0].hole_cards);
        assert_eq!(&top[4..], outcome.board.as_slice());
        // Aces beat kings
        assert_eq!(1, outcome.winners.len());
        assert_eq!(1, outcome.winners[0].idx);
        assert_eq!(HandCategory::OnePair, outcome.showdown[0].rank.category);
        assert_eq!(110, table.players[1].stack);
    }

    #[test]
    fn test_not_enough_players() {
        let mut table = TableBuilder::new()
            .num_players_with_stack(2, 100)
            .big_blind(10)
            .build()
            .unwrap();
        table.players[1].stack = 0;
        let mut agents = callers(2);
        let mut hist = historians();
        let mut rng = StdRng::seed_from_u64(9);

        let res = HandOrchestrator::new(&mut table, &mut agents, &mut hist, &StandardOracle)
            .play_hand(&mut rng);
        assert_eq!(Err(TableError::NotEnoughPlayers { funded: 1 }), res);
    }

    #[test]
    fn test_agent_count_mismatch() {
        let mut table = TableBuilder::new()
            .num_players_with_stack(3, 100)
            .big_blind(10)
            .build()
            .unwrap();
        let mut agents = callers(2);
        let mut hist = historians();
        let mut rng = StdRng::seed_from_u64(9);

        let res = HandOrchestrator::new(&mut table, &mut agents, &mut hist, &StandardOracle)
            .play_hand(&mut rng);
        assert_eq!(
            Err(TableError::AgentCountMismatch {
                agents: 2,
                seats: 3
            }),
            res
        );
    }
}
