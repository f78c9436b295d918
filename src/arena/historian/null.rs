use uuid::Uuid;

use crate::arena::{action::Action, game_state::HandState, table::Table};

use super::{Historian, HistorianError};

/// A no-op historian that discards all recorded actions.
///
/// Useful when you need a historian but don't care about the history.
pub struct NullHistorian;

impl Historian for NullHistorian {
    fn record_action(
        &mut self,
        _id: Uuid,
        _table: &Table,
        _hand: &HandState,
        _action: Action,
    ) -> Result<(), HistorianError> {
        Ok(())
    }
}
