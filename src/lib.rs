// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! kvproof: hash-chain inclusion proofs and commit-then-verify for a
//! consensus-node-backed key/value store.

pub mod clock;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod node;
pub mod proof;
pub mod reader;
pub mod report;
pub mod resolver;
pub mod telemetry;
pub mod types;
pub mod verdict;
pub mod verify;
pub mod workflow;

pub use reader::{VerificationOutcome, VerifiedReader};
pub use workflow::{CommitAndVerify, WorkflowOutcome};
