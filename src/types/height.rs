//! Block heights.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Index of a committed block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Height(pub u64);

impl Height {
    /// The block whose header carries the root for `self`.
    ///
    /// `None` when `self` is already `u64::MAX`: such a root can never be observed.
    pub fn attesting(&self) -> Option<Self> {
        self.0.checked_add(1).map(Height)
    }

    /// Highest height whose attesting root already exists when `self` is the chain tip.
    pub fn provable_below(&self) -> Option<Self> {
        self.0.checked_sub(1).map(Height)
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Height {
    fn from(value: u64) -> Self {
        Height(value)
    }
}
