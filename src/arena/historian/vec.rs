use std::{cell::RefCell, rc::Rc};

use uuid::Uuid;

use crate::arena::{action::Action, game_state::HandState, table::Table};

use super::{Historian, HistorianError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub action: Action,
}

/// Keeps every event in memory. The storage is shared so it can still be
/// read after the historian has been handed to a table.
#[derive(Debug, Clone, Default)]
pub struct VecHistorian {
    records: Rc<RefCell<Vec<HistoryRecord>>>,
}

impl VecHistorian {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_storage(&self) -> Rc<RefCell<Vec<HistoryRecord>>> {
        self.records.clone()
    }
}

impl Historian for VecHistorian {
    fn record_action(
        &mut self,
        id: Uuid,
        _table: &Table,
        _hand: &HandState,
        action: Action,
    ) -> Result<(), HistorianError> {
        self.records.borrow_mut().push(HistoryRecord { id, action });
        Ok(())
    }
}
