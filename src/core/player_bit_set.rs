use std::fmt;

/// A small set of seat indexes backed by a `u16`. Tables never seat more
/// than 16 players.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerBitSet {
    set: u16,
}

impl PlayerBitSet {
    /// A set with the first `players` seats enabled.
    pub fn new(players: usize) -> Self {
        let set = if players >= 16 {
            u16::MAX
        } else {
            (1u16 << players) - 1
        };
        Self { set }
    }

    /// A set containing exactly one seat.
    pub fn single(idx: usize) -> Self {
        let mut s = Self::default();
        s.enable(idx);
        s
    }

    pub fn count(&self) -> usize {
        self.set.count_ones() as usize
    }

    pub fn empty(&self) -> bool {
        self.set == 0
    }

    pub fn enable(&mut self, idx: usize) {
        self.set |= 1 << idx;
    }

    pub fn disable(&mut self, idx: usize) {
        self.set &= !(1 << idx);
    }

    pub fn get(&self, idx: usize) -> bool {
        idx < 16 && (self.set & (1 << idx)) != 0
    }

    pub fn clear(&mut self) {
        self.set = 0;
    }

    /// Iterate over the enabled seats in increasing order.
    pub fn ones(self) -> impl Iterator<Item = usize> {
        (0..16).filter(move |idx| self.get(*idx))
    }
}

impl fmt::Debug for PlayerBitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ones()).finish()
    }
}
