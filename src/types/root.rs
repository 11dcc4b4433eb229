//! State roots (the `app_hash` of a block header).

use core::fmt;
use serde::{Deserialize, Serialize};

/// Hash text committing to the key/value state produced by some height.
///
/// Kept as the node reported it; comparisons go through [`StateRoot::normalized`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateRoot(String);

impl StateRoot {
    pub fn new(hash: impl Into<String>) -> Self {
        StateRoot(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form used when matching proof digests.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for StateRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateRoot {
    fn from(value: &str) -> Self {
        StateRoot::new(value)
    }
}
