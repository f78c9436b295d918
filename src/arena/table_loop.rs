use rand::Rng;
use tracing::{debug, error, info, instrument};

use super::{
    agent::Agent,
    errors::{TableError, TableLoopError},
    hand::{HandOrchestrator, HandOutcome},
    historian::{Historian, Historians},
    oracle::{HandRankOracle, StandardOracle},
    table::Table,
    Chips,
};

/// How a table finished.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableResult {
    pub hands_played: usize,
    /// Everyone still seated and their stacks.
    pub standings: Vec<(String, Chips)>,
    /// Set once a single player holds every chip.
    pub winner: Option<String>,
}

/// Keeps dealing hands at one table until a single player has chips left,
/// or until the hand limit is reached.
pub struct TableLoop {
    table: Table,
    agents: Vec<Box<dyn Agent>>,
    historians: Historians,
    oracle: Box<dyn HandRankOracle>,
    max_hands: Option<usize>,
    hands_played: usize,
}

impl TableLoop {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn agents(&self) -> &[Box<dyn Agent>] {
        &self.agents
    }

    pub fn num_historians(&self) -> usize {
        self.historians.len()
    }

    pub fn hands_played(&self) -> usize {
        self.hands_played
    }

    /// Add a historian that sees every hand from now on.
    pub fn add_historian(&mut self, historian: Box<dyn Historian>) {
        self.historians.push(historian);
    }

    /// Play exactly one hand. Busted players and their agents are gone from
    /// the table when this returns, and the dealer button has moved.
    ///
    /// # Errors
    ///
    /// See [`HandOrchestrator::play_hand`]. The table is untouched when
    /// the error is [`TableError::NotEnoughPlayers`] or
    /// [`TableError::AgentCountMismatch`]. Other errors happen mid-hand, so
    /// blinds and bets may already have left the stacks.
    pub fn play_hand<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<HandOutcome, TableError> {
        let outcome = HandOrchestrator::new(
            &mut self.table,
            &mut self.agents,
            &mut self.historians,
            self.oracle.as_ref(),
        )
        .play_hand(rng)?;
        self.hands_played += 1;
        Ok(outcome)
    }

    /// Play hands until the table is finished.
    #[instrument(level = "info", skip(self, rng), fields(players = self.table.num_players()))]
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TableResult {
        loop {
            if self.max_hands.is_some_and(|max| self.hands_played >= max) {
                debug!(hands_played = self.hands_played, "Hand limit reached");
                break;
            }
            match self.play_hand(rng) {
                Ok(outcome) => {
                    info!(
                        hand = self.hands_played,
                        hand_id = %outcome.hand_id,
                        pot = outcome.pot,
                        winners = ?outcome.winners.iter().map(|w| &w.name).collect::<Vec<_>>(),
                        eliminated = ?outcome.eliminated,
                        "Hand complete"
                    );
                }
                Err(TableError::NotEnoughPlayers { funded }) => {
                    debug!(funded, "Table finished");
                    break;
                }
                Err(err) => {
                    // Dealing again can't fix a bad agent list
                    error!(?err, "Unable to deal");
                    break;
                }
            }
        }

        let result = self.result();
        info!(
            hands_played = result.hands_played,
            winner = ?result.winner,
            "Table done"
        );
        result
    }

    pub fn result(&self) -> TableResult {
        let winner = if self.table.num_funded_players() == 1 {
            self.table
                .players
                .iter()
                .find(|p| p.stack > 0)
                .map(|p| p.name.clone())
        } else {
            None
        };
        TableResult {
            hands_played: self.hands_played,
            standings: self.table.standings(),
            winner,
        }
    }
}

/// # TableLoopBuilder
///
/// Assembles a [`TableLoop`]. A table and one agent per seat are required,
/// everything else is optional.
///
/// ```
/// use holdem_table::arena::agent::FoldingAgent;
/// use holdem_table::arena::{Agent, TableBuilder, TableLoopBuilder};
///
/// let table = TableBuilder::new()
///     .num_players_with_stack(3, 500)
///     .big_blind(10)
///     .build()
///     .unwrap();
/// let agents: Vec<Box<dyn Agent>> = (0..3)
///     .map(|i| Box::new(FoldingAgent::new(format!("folder-{i}"))) as Box<dyn Agent>)
///     .collect();
/// let table_loop = TableLoopBuilder::default()
///     .table(table)
///     .agents(agents)
///     .build()
///     .unwrap();
/// assert_eq!(0, table_loop.hands_played());
/// ```
#[derive(Default)]
pub struct TableLoopBuilder {
    table: Option<Table>,
    agents: Option<Vec<Box<dyn Agent>>>,
    historians: Vec<Box<dyn Historian>>,
    oracle: Option<Box<dyn HandRankOracle>>,
    max_hands: Option<usize>,
    panic_on_historian_error: bool,
}

impl TableLoopBuilder {
    pub fn table(mut self, table: Table) -> Self {
        self.table = Some(table);
        self
    }

    /// One agent per seat, in seat order.
    pub fn agents(mut self, agents: Vec<Box<dyn Agent>>) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Add one more historian.
    pub fn historian(mut self, historian: Box<dyn Historian>) -> Self {
        self.historians.push(historian);
        self
    }

    /// Replace all historians.
    pub fn historians(mut self, historians: Vec<Box<dyn Historian>>) -> Self {
        self.historians = historians;
        self
    }

    /// How hands are compared at showdown. Defaults to [`StandardOracle`].
    pub fn oracle(mut self, oracle: Box<dyn HandRankOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Stop after this many hands even if several players still have chips.
    pub fn max_hands(mut self, max_hands: usize) -> Self {
        self.max_hands = Some(max_hands);
        self
    }

    /// Should the table panic if a historian errors.
    /// Default is false: the historian is removed and the error logged.
    pub fn panic_on_historian_error(mut self, panic_on_historian_error: bool) -> Self {
        self.panic_on_historian_error = panic_on_historian_error;
        self
    }

    pub fn build(self) -> Result<TableLoop, TableLoopError> {
        let table = self.table.ok_or(TableLoopError::NeedTable)?;
        let agents = self.agents.ok_or(TableLoopError::NeedAgents)?;
        if agents.len() != table.num_players() {
            return Err(TableLoopError::AgentCountMismatch {
                agents: agents.len(),
                seats: table.num_players(),
            });
        }

        Ok(TableLoop {
            table,
            agents,
            historians: Historians::new(self.historians, self.panic_on_historian_error),
            oracle: self.oracle.unwrap_or_else(|| Box::new(StandardOracle)),
            max_hands: self.max_hands,
            hands_played: 0,
        })
    }
}
