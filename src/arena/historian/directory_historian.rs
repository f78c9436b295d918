use std::{collections::HashMap, fs::File, path::PathBuf};

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::arena::{action::Action, game_state::HandState, table::Table};

use super::{Historian, HistorianError};

/// A historian implementation that writes each hand's events to a JSON file
/// named after the hand id.
#[derive(Debug, Clone)]
pub struct DirectoryHistorian {
    base_path: PathBuf,
    sequence: HashMap<Uuid, Vec<Action>>,
}

impl DirectoryHistorian {
    /// Creates a new `DirectoryHistorian` with the specified base path.
    ///
    /// # Arguments
    ///
    /// * `base_path` - The directory where the hand files will be stored.
    ///   It is created on first use.
    pub fn new(base_path: PathBuf) -> Self {
        debug!(?base_path, "Creating DirectoryHistorian");
        DirectoryHistorian {
            base_path,
            sequence: HashMap::new(),
        }
    }
}

impl Historian for DirectoryHistorian {
    #[instrument(level = "trace", skip(self, _table, _hand), fields(base_path = ?self.base_path))]
    fn record_action(
        &mut self,
        id: Uuid,
        _table: &Table,
        _hand: &HandState,
        action: Action,
    ) -> Result<(), HistorianError> {
        // First make sure the base_path exists at all
        if !self.base_path.exists() {
            debug!(?self.base_path, "Creating directory for hand history");
            std::fs::create_dir_all(&self.base_path)?;
        }

        let is_complete = matches!(action, Action::HandComplete(_));
        let hand_path = self.base_path.join(id.to_string()).with_extension("json");
        // Rewrite the whole sequence every time so a crash still leaves a
        // readable file.
        let file = File::create(&hand_path)?;
        let sequence = self.sequence.entry(id).or_default();
        sequence.push(action);

        debug!(
            ?hand_path,
            action_count = sequence.len(),
            "Writing hand history"
        );
        serde_json::to_writer_pretty(&file, sequence)?;

        // Nothing more will be written for this hand
        if is_complete {
            self.sequence.remove(&id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::arena::{
        action::{ForcedBetPayload, ForcedBetType, GameStartPayload},
        TableBuilder,
    };

    use super::*;

    fn table() -> Table {
        TableBuilder::new()
            .num_players_with_stack(2, 100)
            .blinds(10, 5)
            .build()
            .unwrap()
    }

    /// Verifies that record_action creates the directory tree if it doesn't exist.
    #[test]
    fn test_creates_directory_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_path = temp_dir.path().join("subdir").join("hand_history");
        assert!(!non_existent_path.exists());

        let mut historian = DirectoryHistorian::new(non_existent_path.clone());
        let table = table();
        let id = Uuid::from_u128(12345);
        let hand = HandState::new(id, &table);
        let action = Action::GameStart(GameStartPayload {
            small_blind: 5,
            big_blind: 10,
            min_raise: 10,
            dealer_idx: 0,
        });

        historian.record_action(id, &table, &hand, action).unwrap();

        assert!(non_existent_path.exists());
        assert!(non_existent_path
            .join(id.to_string())
            .with_extension("json")
            .exists());
    }

    /// Test that multiple actions are recorded in sequence.
    #[test]
    fn test_records_multiple_actions() {
        let temp_dir = TempDir::new().unwrap();
        let history_path = temp_dir.path().join("history");
        let mut historian = DirectoryHistorian::new(history_path.clone());
        let table = table();
        let id = Uuid::from_u128(100);
        let hand = HandState::new(id, &table);

        let small = Action::ForcedBet(ForcedBetPayload {
            bet: 5,
            posted: 5,
            player_stack: 95,
            idx: 0,
            forced_bet_type: ForcedBetType::SmallBlind,
        });
        let big = Action::ForcedBet(ForcedBetPayload {
            bet: 10,
            posted: 10,
            player_stack: 90,
            idx: 1,
            forced_bet_type: ForcedBetType::BigBlind,
        });

        historian
            .record_action(id, &table, &hand, small.clone())
            .unwrap();
        historian
            .record_action(id, &table, &hand, big.clone())
            .unwrap();

        let content =
            std::fs::read_to_string(history_path.join(id.to_string()).with_extension("json"))
                .unwrap();
        assert!(content.contains("SmallBlind"));
        let actions: Vec<Action> = serde_json::from_str(&content).unwrap();
        assert_eq!(vec![small, big], actions);
    }
}
