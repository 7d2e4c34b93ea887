//=========================================================================
// Player State Vector
//=========================================================================
//
// Sparse, self-growing numeric state addressed by small integer keys.
//
// Keys outside 0..=255 are silently ignored on write and read as 0.
// Slots that were never written read as 0.
//
//=========================================================================

//=== StateKey ============================================================

/// Key into a player's numeric state.
///
/// Two keys are reserved and are redirected to the host's score/life
/// bookkeeping by `Player`: [`StateKey::SCORE`] and [`StateKey::LIVES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(pub i32);

impl StateKey {
    /// Reserved: the player's score.
    pub const SCORE: StateKey = StateKey(0);

    /// Reserved: the player's remaining lives.
    pub const LIVES: StateKey = StateKey(1);

    /// Highest addressable key.
    pub const MAX: i32 = 255;

    /// Returns `true` for the score and lives keys.
    pub fn is_reserved(self) -> bool {
        self == Self::SCORE || self == Self::LIVES
    }

    /// Returns the slot index, or `None` for keys outside 0..=255.
    pub fn slot(self) -> Option<usize> {
        if (0..=Self::MAX).contains(&self.0) {
            Some(self.0 as usize)
        } else {
            None
        }
    }
}

impl From<i32> for StateKey {
    fn from(key: i32) -> Self {
        Self(key)
    }
}

//=== StateVector =========================================================

/// Ordered numeric slots, grown on demand up to the highest written key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateVector {
    values: Vec<i32>,
}

impl StateVector {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Returns the value at `key`, or 0 if unset or out of range.
    pub fn get(&self, key: StateKey) -> i32 {
        key.slot()
            .and_then(|slot| self.values.get(slot).copied())
            .unwrap_or(0)
    }

    /// Writes `value` at `key`, growing the vector with zeros as needed.
    ///
    /// Returns `false` (and writes nothing) if the key is out of range.
    pub fn set(&mut self, key: StateKey, value: i32) -> bool {
        let Some(slot) = key.slot() else {
            return false;
        };

        if self.values.len() <= slot {
            self.values.resize(slot + 1, 0);
        }
        self.values[slot] = value;
        true
    }

    /// Number of allocated slots (highest written key + 1).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over every allocated slot in key order.
    pub fn iter(&self) -> impl Iterator<Item = (StateKey, i32)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(slot, &value)| (StateKey(slot as i32), value))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
