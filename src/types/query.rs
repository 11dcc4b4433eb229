//! Read queries against chain state.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::proof::Proof;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryCommand {
    Get,
    Ls,
}

impl QueryCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryCommand::Get => "get",
            QueryCommand::Ls => "ls",
        }
    }
}

/// A `(command, key)` pair, sent to the node as `command:key`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub command: QueryCommand,
    pub key: String,
}

impl Query {
    pub fn new(command: QueryCommand, key: impl Into<String>) -> Self {
        Self { command, key: key.into() }
    }

    pub fn get(key: impl Into<String>) -> Self {
        Self::new(QueryCommand::Get, key)
    }

    pub fn ls(key: impl Into<String>) -> Self {
        Self::new(QueryCommand::Ls, key)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.command.as_str(), self.key)
    }
}

/// What the node returned for a query. Both halves are optional; a missing
/// value means the key is not present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryResponse {
    pub value: Option<Vec<u8>>,
    pub proof: Option<Proof>,
}
