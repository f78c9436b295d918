use tracing::warn;
use uuid::Uuid;

use crate::arena::{action::Action, game_state::HandState, table::Table};

use super::{Historian, HistorianError};

/// A historian that will always fail to record an action
/// and will return an error.
///
/// This historian is useful for testing how a table handles broken
/// observers.
pub struct FailingHistorian;

impl Historian for FailingHistorian {
    fn record_action(
        &mut self,
        _id: Uuid,
        _table: &Table,
        _hand: &HandState,
        _action: Action,
    ) -> Result<(), HistorianError> {
        warn!("FailingHistorian intentionally returning error");
        Err(HistorianError::UnableToRecordAction)
    }
}
