//! # Agent Configuration
//!
//! JSON configuration for agents so tables can be described in a file
//! instead of code.
//!
//! ```rust
//! use holdem_table::arena::agent::AgentConfig;
//!
//! let config = AgentConfig::from_json(r#"{"type": "threshold", "max_call": 50}"#).unwrap();
//! let agent = config.build("Alice", 0);
//! assert_eq!("Alice", agent.name());
//! ```
//!
//! ## Supported Agent Types
//!
//! - `all_in` - Always goes all-in
//! - `calling` - Always calls
//! - `folding` - Always folds when facing a bet
//! - `threshold` - Calls while the price is at most `max_call` (default 100)
//! - `aggressive` - Min raises while the pot is below `pot_limit` (default 200)
//! - `random` - Random decisions from probability vectors, optionally seeded
//! - `equity` - Monte-Carlo equity estimate against random hands, optionally seeded
//!
//! ```json
//! {
//!   "type": "random",
//!   "percent_fold": [0.2, 0.3, 0.5],
//!   "percent_call": [0.5, 0.6, 0.45],
//!   "seed": 42
//! }
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arena::{
    agent::{
        AggressiveAgent, AllInAgent, CallingAgent, EquityAgent, FoldingAgent, RandomAgent,
        ThresholdAgent,
    },
    Agent, Chips,
};

/// Configuration for different agent types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentConfig {
    /// Agent that always goes all-in
    AllIn,
    /// Agent that always calls
    Calling,
    /// Agent that always folds
    Folding,
    /// Agent that calls cheap bets and folds to expensive ones
    Threshold {
        #[serde(default = "default_max_call")]
        max_call: Chips,
    },
    /// Agent that raises small pots
    Aggressive {
        #[serde(default = "default_pot_limit")]
        pot_limit: Chips,
    },
    /// Agent that makes random decisions based on probability vectors
    Random {
        /// Probability of folding indexed by raise count
        #[serde(default = "default_percent_fold")]
        percent_fold: Vec<f64>,
        /// Probability of calling indexed by raise count
        #[serde(default = "default_percent_call")]
        percent_call: Vec<f64>,
        /// Seed for the agent's own rng. When missing the seed passed to
        /// `build` is used.
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Agent that samples the rest of the hand to estimate its equity
    Equity {
        #[serde(default = "default_samples")]
        samples: usize,
        /// Equity at which the agent starts raising
        #[serde(default = "default_raise_equity")]
        raise_equity: f64,
        #[serde(default)]
        seed: Option<u64>,
    },
}

fn default_max_call() -> Chips {
    100
}

fn default_pot_limit() -> Chips {
    200
}

fn default_samples() -> usize {
    200
}

fn default_raise_equity() -> f64 {
    0.65
}

fn default_percent_fold() -> Vec<f64> {
    vec![0.25, 0.30, 0.50]
}

fn default_percent_call() -> Vec<f64> {
    vec![0.5, 0.6, 0.45]
}

/// Errors that can occur during agent configuration
#[derive(Debug, Error)]
pub enum AgentConfigError {
    /// Invalid probability value (must be between 0.0 and 1.0)
    #[error("Invalid probability value: {0} (must be between 0.0 and 1.0)")]
    InvalidProbability(f64),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic validation error
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl AgentConfig {
    /// Validate that the configuration is correct
    pub fn validate(&self) -> Result<(), AgentConfigError> {
        if let AgentConfig::Random {
            percent_fold,
            percent_call,
            ..
        } = self
        {
            if percent_fold.is_empty() || percent_call.is_empty() {
                return Err(AgentConfigError::ValidationError(
                    "random agent probabilities can't be empty".to_string(),
                ));
            }
            validate_probabilities(percent_fold)?;
            validate_probabilities(percent_call)?;
        }
        if let AgentConfig::Equity {
            samples,
            raise_equity,
            ..
        } = self
        {
            if *samples == 0 {
                return Err(AgentConfigError::ValidationError(
                    "equity agent needs at least one sample".to_string(),
                ));
            }
            validate_probabilities(&[*raise_equity])?;
        }
        Ok(())
    }

    /// Parse and validate from a JSON string
    pub fn from_json(json: &str) -> Result<Self, AgentConfigError> {
        let config: AgentConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Create the agent. `seed` is only used by random agents that don't
    /// carry their own.
    pub fn build(&self, name: impl Into<String>, seed: u64) -> Box<dyn Agent> {
        let name = name.into();
        match self {
            AgentConfig::AllIn => Box::new(AllInAgent::new(name)),
            AgentConfig::Calling => Box::new(CallingAgent::new(name)),
            AgentConfig::Folding => Box::new(FoldingAgent::new(name)),
            AgentConfig::Threshold { max_call } => Box::new(ThresholdAgent::new(name, *max_call)),
            AgentConfig::Aggressive { pot_limit } => {
                Box::new(AggressiveAgent::new(name, *pot_limit))
            }
            AgentConfig::Random {
                percent_fold,
                percent_call,
                seed: own_seed,
            } => Box::new(RandomAgent::new(
                name,
                percent_fold.clone(),
                percent_call.clone(),
                own_seed.unwrap_or(seed),
            )),
            AgentConfig::Equity {
                samples,
                raise_equity,
                seed: own_seed,
            } => Box::new(EquityAgent::new(
                name,
                *samples,
                *raise_equity,
                own_seed.unwrap_or(seed),
            )),
        }
    }
}

fn validate_probabilities(probs: &[f64]) -> Result<(), AgentConfigError> {
    for &p in probs {
        if !(0.0..=1.0).contains(&p) {
            return Err(AgentConfigError::InvalidProbability(p));
        }
    }
    Ok(())
}
