//! # Table Configuration
//!
//! Describes a whole table, seats and agents included, in JSON.
//!
//! ```json
//! {
//!   "big_blind": 20,
//!   "small_blind": 10,
//!   "players": [
//!     {"name": "Alice", "stack": 1000, "agent": {"type": "calling"}},
//!     {"name": "Bob", "stack": 1000, "agent": {"type": "random", "seed": 7}}
//!   ]
//! }
//! ```
//!
//! `small_blind`, `min_raise`, `dealer_idx` and `max_raises_per_round` are
//! optional and fall back to the [`TableBuilder`] defaults.
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    agent::{AgentConfig, AgentConfigError},
    table::{Table, TableBuilder, TableBuilderError},
    Agent, Chips,
};

#[derive(Debug, Error)]
pub enum TableConfigError {
    #[error("Invalid table: {0}")]
    Table(#[from] TableBuilderError),

    #[error("Invalid agent for {name}: {source}")]
    Agent {
        name: String,
        #[source]
        source: AgentConfigError,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One seat at the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub name: String,
    pub stack: Chips,
    #[serde(default = "default_agent")]
    pub agent: AgentConfig,
}

fn default_agent() -> AgentConfig {
    AgentConfig::Threshold { max_call: 100 }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub players: Vec<SeatConfig>,
    pub big_blind: Chips,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_blind: Option<Chips>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_raise: Option<Chips>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dealer_idx: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_raises_per_round: Option<u8>,
}

impl Default for TableConfig {
    /// Five players with 1000 chips each, blinds of 10/20.
    fn default() -> Self {
        let players = ["Alice", "Bob", "Charlie", "David", "Erika"]
            .into_iter()
            .map(|name| SeatConfig {
                name: name.to_string(),
                stack: 1000,
                agent: default_agent(),
            })
            .collect();
        Self {
            players,
            big_blind: 20,
            small_blind: Some(10),
            min_raise: Some(20),
            dealer_idx: None,
            max_raises_per_round: None,
        }
    }
}

impl TableConfig {
    pub fn from_json(json: &str) -> Result<Self, TableConfigError> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TableConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check the agents, then everything the table builder checks.
    pub fn validate(&self) -> Result<(), TableConfigError> {
        for seat in self.players.iter() {
            seat.agent
                .validate()
                .map_err(|source| TableConfigError::Agent {
                    name: seat.name.clone(),
                    source,
                })?;
        }
        self.build_table()?;
        Ok(())
    }

    pub fn build_table(&self) -> Result<Table, TableBuilderError> {
        let mut builder = TableBuilder::new()
            .players(self.players.iter().map(|s| (s.name.clone(), s.stack)))
            .big_blind(self.big_blind)
            .max_raises_per_round(self.max_raises_per_round);
        if let Some(sb) = self.small_blind {
            builder = builder.small_blind(sb);
        }
        if let Some(min_raise) = self.min_raise {
            builder = builder.min_raise(min_raise);
        }
        if let Some(dealer_idx) = self.dealer_idx {
            builder = builder.dealer_idx(dealer_idx);
        }
        builder.build()
    }

    /// One agent per seat, named after the seat. Random agents without
    /// their own seed get `seed + seat index`.
    pub fn build_agents(&self, seed: u64) -> Vec<Box<dyn Agent>> {
        self.players
            .iter()
            .enumerate()
            .map(|(idx, seat)| seat.agent.build(seat.name.clone(), seed.wrapping_add(idx as u64)))
            .collect()
    }
}
