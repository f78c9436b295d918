use tracing::info;
use uuid::Uuid;

use crate::arena::{
    action::{Action, AgentAction},
    game_state::HandState,
    table::Table,
};

use super::{Historian, HistorianError};

/// Narrates the table through `tracing` at info level. This is what the
/// command line runner shows.
#[derive(Debug, Clone, Default)]
pub struct LoggingHistorian;

impl LoggingHistorian {
    pub fn new() -> Self {
        Self
    }
}

fn seat_name(table: &Table, idx: usize) -> &str {
    table
        .players
        .get(idx)
        .map_or("<empty seat>", |p| p.name.as_str())
}

impl Historian for LoggingHistorian {
    fn record_action(
        &mut self,
        id: Uuid,
        table: &Table,
        hand: &HandState,
        action: Action,
    ) -> Result<(), HistorianError> {
        match action {
            Action::GameStart(payload) => info!(
                hand_id = %id,
                dealer = seat_name(table, payload.dealer_idx),
                small_blind = payload.small_blind,
                big_blind = payload.big_blind,
                "New hand"
            ),
            Action::ForcedBet(payload) => info!(
                "{} posts {:?} of {}",
                seat_name(table, payload.idx),
                payload.forced_bet_type,
                payload.posted
            ),
            Action::RoundAdvance(round) => info!(pot = hand.pot, "--- {round} ---"),
            Action::DealCommunity(card) => info!("Board gets {card}"),
            Action::PlayedAction(payload) => {
                let name = seat_name(table, payload.idx);
                match payload.action {
                    AgentAction::Fold => info!("{name} folds"),
                    AgentAction::Check => info!("{name} checks"),
                    AgentAction::Call => info!("{name} calls {}", payload.amount_moved()),
                    AgentAction::Raise(_) => info!("{name} raises to {}", payload.final_bet),
                    AgentAction::AllIn => {
                        info!("{name} is all in for {}", payload.final_player_bet)
                    }
                }
            }
            Action::FailedAction(payload) => info!(
                "{} tried {:?} ({}), played {:?}",
                seat_name(table, payload.idx),
                payload.action,
                payload.error,
                payload.coerced
            ),
            Action::Showdown(payload) => info!(
                "{} shows {}{} for {}",
                seat_name(table, payload.idx),
                payload.hole_cards[0],
                payload.hole_cards[1],
                payload.rank.category
            ),
            Action::Award(payload) => info!(
                "{} wins {} of {}",
                seat_name(table, payload.idx),
                payload.award_amount,
                payload.total_pot
            ),
            Action::PlayerEliminated(payload) => info!("{} is out of chips", payload.name),
            Action::HandComplete(payload) => {
                let standings: Vec<String> = payload
                    .standings
                    .iter()
                    .map(|(name, stack)| format!("{name}: {stack}"))
                    .collect();
                info!(hand_id = %id, "Standings {}", standings.join(", "));
            }
            // Seating and hole cards aren't worth a line each
            Action::PlayerSit(_) | Action::DealStartingHand(_) => {}
        }
        Ok(())
    }
}
