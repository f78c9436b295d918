//! Historians watch a table. Every change the engine makes is published to
//! them as an `Action`, which makes them the place for logging, recording
//! hands to disk, or checking invariants in tests.
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

use super::{action::Action, game_state::HandState, table::Table};

#[cfg(feature = "serde")]
mod directory_historian;
mod failing;
mod logging;
mod null;
mod vec;

#[cfg(feature = "serde")]
pub use directory_historian::DirectoryHistorian;
pub use failing::FailingHistorian;
pub use logging::LoggingHistorian;
pub use null::NullHistorian;
pub use vec::{HistoryRecord, VecHistorian};

#[derive(Error, Debug)]
pub enum HistorianError {
    #[error("Unable to record action")]
    UnableToRecordAction,
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A historian is an observer of everything that happens at a table.
pub trait Historian {
    /// Called with every event, after the table and hand have been updated
    /// to reflect it.
    ///
    /// # Errors
    ///
    /// Returning an error gets the historian dropped from the table, or
    /// panics if the table was built with `panic_on_historian_error`.
    fn record_action(
        &mut self,
        id: Uuid,
        table: &Table,
        hand: &HandState,
        action: Action,
    ) -> Result<(), HistorianError>;
}

/// The set of historians attached to a table.
#[derive(Default)]
pub struct Historians {
    historians: Vec<Box<dyn Historian>>,
    panic_on_error: bool,
}

impl Historians {
    pub fn new(historians: Vec<Box<dyn Historian>>, panic_on_error: bool) -> Self {
        Self {
            historians,
            panic_on_error,
        }
    }

    pub fn push(&mut self, historian: Box<dyn Historian>) {
        self.historians.push(historian);
    }

    pub fn len(&self) -> usize {
        self.historians.len()
    }

    pub fn is_empty(&self) -> bool {
        self.historians.is_empty()
    }

    /// Send `action` to every historian. Historians that fail are removed
    /// unless failures should panic.
    pub fn record(&mut self, id: Uuid, table: &Table, hand: &HandState, action: Action) {
        if self.historians.is_empty() {
            return;
        }

        let mut failed = Vec::new();
        for (idx, historian) in self.historians.iter_mut().enumerate() {
            if let Err(err) = historian.record_action(id, table, hand, action.clone()) {
                error!(%err, idx, "Historian failed to record action");
                failed.push(idx);
            }
        }

        if failed.is_empty() {
            return;
        }
        if self.panic_on_error {
            panic!("Historian failed to record action for hand {id}");
        }
        for idx in failed.into_iter().rev() {
            warn!(idx, "Removing failed historian");
            self.historians.remove(idx);
        }
    }
}
