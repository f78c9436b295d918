use std::collections::HashSet;

use thiserror::Error;

use super::{player::Player, Chips};

/// Maximum number of players supported (based on PlayerBitSet using u16).
pub const MAX_PLAYERS: usize = 16;

/// Errors that can occur when building a `Table`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableBuilderError {
    #[error("big_blind is required")]
    MissingBigBlind,

    #[error("num_players must be between 2 and {max}, got {actual}", max = MAX_PLAYERS)]
    InvalidPlayerCount { actual: usize },

    #[error("player at index {index} needs a name")]
    EmptyName { index: usize },

    #[error("player name {0} is used more than once")]
    DuplicateName(String),

    #[error("stack at index {index} must be positive")]
    InvalidStack { index: usize },

    #[error("big_blind must be positive")]
    InvalidBigBlind,

    #[error("small_blind {small} can't be larger than big_blind {big}")]
    SmallBlindTooLarge { small: Chips, big: Chips },

    #[error("min_raise must be positive")]
    InvalidMinRaise,

    #[error("dealer_idx {dealer_idx} must be less than num_players {num_players}")]
    InvalidDealerIndex {
        dealer_idx: usize,
        num_players: usize,
    },
}

/// Builder for constructing a `Table` with validation.
///
/// # Example
///
/// ```
/// use holdem_table::arena::TableBuilder;
///
/// let table = TableBuilder::new()
///     .player("Alice", 1000)
///     .player("Bob", 1000)
///     .big_blind(20)
///     .build()
///     .unwrap();
///
/// assert_eq!(table.players.len(), 2);
/// assert_eq!(table.small_blind, 10); // defaults to big_blind / 2
/// assert_eq!(table.min_raise, 20); // defaults to big_blind
/// ```
#[derive(Default, Clone)]
pub struct TableBuilder {
    players: Vec<Player>,
    big_blind: Option<Chips>,

    small_blind: Option<Chips>,               // Default: big_blind / 2
    min_raise: Option<Chips>,                 // Default: big_blind
    dealer_idx: Option<usize>,                // Default: 0
    max_raises_per_round: Option<Option<u8>>, // Default: None
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a player in the next seat.
    pub fn player(mut self, name: impl Into<String>, stack: Chips) -> Self {
        self.players.push(Player::new(name, stack));
        self
    }

    /// Seat several players in order.
    pub fn players<I, S>(mut self, players: I) -> Self
    where
        I: IntoIterator<Item = (S, Chips)>,
        S: Into<String>,
    {
        self.players
            .extend(players.into_iter().map(|(name, stack)| Player::new(name, stack)));
        self
    }

    /// Convenience method to seat `n` players named `Player-0`.. with
    /// `stack` chips each.
    pub fn num_players_with_stack(mut self, n: usize, stack: Chips) -> Self {
        self.players = (0..n)
            .map(|idx| Player::new(format!("Player-{idx}"), stack))
            .collect();
        self
    }

    /// Set the big blind size. Required.
    pub fn big_blind(mut self, bb: Chips) -> Self {
        self.big_blind = Some(bb);
        self
    }

    /// Set the small blind size. Defaults to `big_blind / 2`.
    pub fn small_blind(mut self, sb: Chips) -> Self {
        self.small_blind = Some(sb);
        self
    }

    /// Convenience method to set both big and small blinds at once.
    pub fn blinds(mut self, big: Chips, small: Chips) -> Self {
        self.big_blind = Some(big);
        self.small_blind = Some(small);
        self
    }

    /// Set the smallest raise allowed at the start of each round. Defaults
    /// to the big blind.
    pub fn min_raise(mut self, min_raise: Chips) -> Self {
        self.min_raise = Some(min_raise);
        self
    }

    pub fn dealer_idx(mut self, idx: usize) -> Self {
        self.dealer_idx = Some(idx);
        self
    }

    /// Cap the number of raises per betting round. `None` (the default) means
    /// unlimited. Once reached further raises are played as calls.
    pub fn max_raises_per_round(mut self, max: Option<u8>) -> Self {
        self.max_raises_per_round = Some(max);
        self
    }

    /// Build the `Table`, validating all inputs.
    pub fn build(self) -> Result<Table, TableBuilderError> {
        let big_blind = self.big_blind.ok_or(TableBuilderError::MissingBigBlind)?;
        let num_players = self.players.len();

        if !(2..=MAX_PLAYERS).contains(&num_players) {
            return Err(TableBuilderError::InvalidPlayerCount {
                actual: num_players,
            });
        }

        let mut names = HashSet::new();
        for (index, player) in self.players.iter().enumerate() {
            if player.name.trim().is_empty() {
                return Err(TableBuilderError::EmptyName { index });
            }
            if !names.insert(player.name.as_str()) {
                return Err(TableBuilderError::DuplicateName(player.name.clone()));
            }
            if player.stack == 0 {
                return Err(TableBuilderError::InvalidStack { index });
            }
        }

        if big_blind == 0 {
            return Err(TableBuilderError::InvalidBigBlind);
        }

        let small_blind = self.small_blind.unwrap_or(big_blind / 2);
        if small_blind > big_blind {
            return Err(TableBuilderError::SmallBlindTooLarge {
                small: small_blind,
                big: big_blind,
            });
        }

        let min_raise = self.min_raise.unwrap_or(big_blind);
        if min_raise == 0 {
            return Err(TableBuilderError::InvalidMinRaise);
        }

        let dealer_idx = self.dealer_idx.unwrap_or(0);
        if dealer_idx >= num_players {
            return Err(TableBuilderError::InvalidDealerIndex {
                dealer_idx,
                num_players,
            });
        }

        Ok(Table {
            players: self.players,
            dealer_idx,
            small_blind,
            big_blind,
            min_raise,
            max_raises_per_round: self.max_raises_per_round.unwrap_or(None),
        })
    }
}

/// The seats, the button and the stakes. This is everything that lives
/// longer than a single hand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    /// Seat order is fixed and circular.
    pub players: Vec<Player>,
    pub dealer_idx: usize,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub min_raise: Chips,
    pub max_raises_per_round: Option<u8>,
}

impl Table {
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Players with any chips at all.
    pub fn num_funded_players(&self) -> usize {
        self.players.iter().filter(|p| p.stack > 0).count()
    }

    /// Players still holding cards in the current hand.
    pub fn num_live_players(&self) -> usize {
        self.players.iter().filter(|p| p.is_live()).count()
    }

    /// Chips behind across every seat. Chips in the pot are not included.
    pub fn total_stacks(&self) -> Chips {
        self.players.iter().map(|p| p.stack).sum()
    }

    /// The first seat after `from`, going around the table, that matches
    /// `pred`. `from` itself is checked last.
    pub fn next_seat_where<F>(&self, from: usize, pred: F) -> Option<usize>
    where
        F: Fn(&Player) -> bool,
    {
        let n = self.players.len();
        (1..=n)
            .map(|offset| (from + offset) % n)
            .find(|idx| pred(&self.players[*idx]))
    }

    /// Seats posting the small and big blind for the current dealer.
    ///
    /// Heads up the dealer posts the small blind. Otherwise the blinds are
    /// the two funded seats after the dealer.
    pub fn blind_seats(&self) -> Option<(usize, usize)> {
        let funded = |p: &Player| p.stack > 0;
        if self.num_funded_players() < 2 {
            return None;
        }
        let sb = if self.num_funded_players() == 2 && funded(&self.players[self.dealer_idx]) {
            self.dealer_idx
        } else {
            self.next_seat_where(self.dealer_idx, funded)?
        };
        let bb = self.next_seat_where(sb, funded)?;
        Some((sb, bb))
    }

    /// Name and stack for every seat in seat order.
    pub fn standings(&self) -> Vec<(String, Chips)> {
        self.players
            .iter()
            .map(|p| (p.name.clone(), p.stack))
            .collect()
    }

    /// Remove every player without chips and pass the button to the next
    /// surviving seat after the current dealer. That is a single step of
    /// rotation even when the dealer is among the removed.
    ///
    /// Returns the removed players with the seat index they had before
    /// removal, in increasing seat order.
    pub(crate) fn remove_busted_and_rotate(&mut self) -> Vec<(usize, Player)> {
        let next_dealer = self.next_seat_where(self.dealer_idx, |p| !p.is_eliminated());

        let busted: Vec<usize> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_eliminated())
            .map(|(idx, _)| idx)
            .collect();

        let mut removed: Vec<(usize, Player)> = busted
            .iter()
            .rev()
            .map(|idx| (*idx, self.players.remove(*idx)))
            .collect();
        removed.reverse();

        self.dealer_idx = match next_dealer {
            Some(old_idx) => old_idx - busted.iter().filter(|idx| **idx < old_idx).count(),
            None => 0,
        };

        removed
    }
}
