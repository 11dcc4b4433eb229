// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.
//!
//! Verification results are values (see [`crate::reader::VerificationOutcome`]);
//! the errors here only describe a node that could not be talked to.

use thiserror::Error;

use crate::types::Height;

/// Failure of a read-side call to the node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("Node unreachable: {0}")]
    Unavailable(String),
    #[error("Malformed node response: {0}")]
    Malformed(String),
    #[error("Block {0} not found")]
    MissingBlock(Height),
}

/// The node refused a write before executing it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Transaction rejected: {0}")]
    Rejected(String),
    #[error("Node unreachable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("Poll interval must be non-zero")]
    ZeroPollInterval,
}
