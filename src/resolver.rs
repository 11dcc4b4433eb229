// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! State root resolution.
//!
//! The root for height `h` lives in the header of block `h + 1`, so it only
//! becomes observable one block later.

use crate::error::NodeError;
use crate::node::NodeClient;
use crate::types::{Height, StateRoot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootResolution {
    /// Block `height + 1` does not exist yet.
    NotFinalized,
    Resolved(StateRoot),
}

impl RootResolution {
    pub fn root(&self) -> Option<&StateRoot> {
        match self {
            RootResolution::Resolved(root) => Some(root),
            RootResolution::NotFinalized => None,
        }
    }
}

pub struct StateRootResolver<N> {
    node: N,
}

impl<N: NodeClient> StateRootResolver<N> {
    pub fn new(node: N) -> Self {
        Self { node }
    }

    /// One or two node calls; never waits.
    pub fn resolve(&self, height: Height) -> Result<RootResolution, NodeError> {
        let Some(attesting) = height.attesting() else {
            return Ok(RootResolution::NotFinalized);
        };
        let latest = self.node.latest_height()?;
        if latest < attesting {
            tracing::debug!(%height, %latest, "Attesting block not yet committed");
            return Ok(RootResolution::NotFinalized);
        }
        let root = self.node.attesting_root(height)?;
        Ok(RootResolution::Resolved(root))
    }

    /// Highest height whose root can be resolved right now.
    pub fn latest_provable_height(&self) -> Result<Option<Height>, NodeError> {
        Ok(self.node.latest_height()?.provable_below())
    }

    pub fn node(&self) -> &N {
        &self.node
    }
}
