// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Verified reads.
//!
//! A read is only trusted once its value has been checked against a proof
//! and the state root attesting the queried height.

use core::fmt;

use serde::Serialize;

use crate::error::NodeError;
use crate::node::NodeClient;
use crate::proof::Proof;
use crate::resolver::{RootResolution, StateRootResolver};
use crate::types::{Height, Query, StateRoot};
use crate::verify::verify_proof;

/// Terminal result of a single verified read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VerificationOutcome {
    /// The root attesting the height is not observable yet.
    NotFinalized,
    /// The key is not present.
    Empty,
    /// A value came back without a proof.
    MissingProof,
    /// The proof does not lead to the root.
    Invalid,
    /// The proven value differs from what the write reported.
    TentativeMismatch { expected: Vec<u8>, actual: Vec<u8> },
    Verified(Vec<u8>),
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Verified(_))
    }

    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            VerificationOutcome::NotFinalized => "not_finalized",
            VerificationOutcome::Empty => "empty",
            VerificationOutcome::MissingProof => "missing_proof",
            VerificationOutcome::Invalid => "invalid",
            VerificationOutcome::TentativeMismatch { .. } => "tentative_mismatch",
            VerificationOutcome::Verified(_) => "verified",
        }
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationOutcome::NotFinalized => f.write_str("Height is not verifiable yet"),
            VerificationOutcome::Empty => f.write_str("Result is empty"),
            VerificationOutcome::MissingProof => f.write_str("No proof"),
            VerificationOutcome::Invalid => f.write_str("Proof is invalid"),
            VerificationOutcome::TentativeMismatch { expected, actual } => write!(
                f,
                "Verified result '{}' doesn't match tentative '{}'",
                String::from_utf8_lossy(actual),
                String::from_utf8_lossy(expected)
            ),
            VerificationOutcome::Verified(_) => f.write_str("OK"),
        }
    }
}

/// Everything observed during one verified read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadReport {
    pub height: Height,
    pub query: Query,
    /// `None` when the height was not finalized.
    pub root: Option<StateRoot>,
    pub value: Option<Vec<u8>>,
    pub proof: Option<Proof>,
    pub outcome: VerificationOutcome,
}

pub struct VerifiedReader<N> {
    resolver: StateRootResolver<N>,
}

impl<N: NodeClient> VerifiedReader<N> {
    pub fn new(node: N) -> Self {
        Self {
            resolver: StateRootResolver::new(node),
        }
    }

    pub fn resolver(&self) -> &StateRootResolver<N> {
        &self.resolver
    }

    pub fn node(&self) -> &N {
        self.resolver.node()
    }

    pub fn verified_query(
        &self,
        height: Height,
        query: &Query,
        tentative: Option<&[u8]>,
    ) -> Result<VerificationOutcome, NodeError> {
        Ok(self.verified_query_report(height, query, tentative)?.outcome)
    }

    /// Resolve, query, then check in a fixed order. The first failing check
    /// decides the outcome, so a tentative mismatch is reported even when the
    /// proof is also missing.
    pub fn verified_query_report(
        &self,
        height: Height,
        query: &Query,
        tentative: Option<&[u8]>,
    ) -> Result<ReadReport, NodeError> {
        let root = match self.resolver.resolve(height)? {
            RootResolution::Resolved(root) => root,
            RootResolution::NotFinalized => {
                return Ok(self.finish(ReadReport {
                    height,
                    query: query.clone(),
                    root: None,
                    value: None,
                    proof: None,
                    outcome: VerificationOutcome::NotFinalized,
                }));
            }
        };

        let response = self.node().query_state(height, query)?;
        let outcome = classify(response.value.as_deref(), response.proof.as_ref(), &root, tentative);

        Ok(self.finish(ReadReport {
            height,
            query: query.clone(),
            root: Some(root),
            value: response.value,
            proof: response.proof,
            outcome,
        }))
    }

    /// Verified read at the highest provable height, with no tentative value.
    pub fn query_latest(&self, query: &Query) -> Result<ReadReport, NodeError> {
        match self.resolver.latest_provable_height()? {
            Some(height) => self.verified_query_report(height, query, None),
            None => Ok(self.finish(ReadReport {
                height: Height(0),
                query: query.clone(),
                root: None,
                value: None,
                proof: None,
                outcome: VerificationOutcome::NotFinalized,
            })),
        }
    }

    fn finish(&self, report: ReadReport) -> ReadReport {
        metrics::increment_counter!("kvproof_verifications_total", "outcome" => report.outcome.label());
        match &report.outcome {
            VerificationOutcome::Verified(_) => {
                tracing::debug!(height = %report.height, query = %report.query, "Read verified")
            }
            VerificationOutcome::Invalid | VerificationOutcome::TentativeMismatch { .. } => {
                tracing::warn!(height = %report.height, query = %report.query, "Verification failed: {}", report.outcome)
            }
            other => tracing::info!(height = %report.height, query = %report.query, "Read not verified: {}", other),
        }
        report
    }
}

fn classify(
    value: Option<&[u8]>,
    proof: Option<&Proof>,
    root: &StateRoot,
    tentative: Option<&[u8]>,
) -> VerificationOutcome {
    let Some(value) = value else {
        return VerificationOutcome::Empty;
    };
    if let Some(expected) = tentative {
        if expected != value {
            return VerificationOutcome::TentativeMismatch {
                expected: expected.to_vec(),
                actual: value.to_vec(),
            };
        }
    }
    let Some(proof) = proof else {
        return VerificationOutcome::MissingProof;
    };
    if !verify_proof(value, proof, root) {
        return VerificationOutcome::Invalid;
    }
    VerificationOutcome::Verified(value.to_vec())
}
