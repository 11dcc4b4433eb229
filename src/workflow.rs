// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Commit-then-verify.
//!
//! A write reports its result (the tentative `info`) as soon as it executes,
//! before any proof for it can exist. This module waits for the root
//! attesting the write's height and then re-reads the written key through
//! [`VerifiedReader`], so the tentative result either becomes a proven value
//! or is rejected.
//!
//! # States
//! ```text
//! Submitted -> AwaitingResult -> Rejected
//!                             -> Settled (unchecked)
//!                             -> AwaitingFinality -> Settled (checked read)
//!                                                 -> TimedOut
//! ```

use core::fmt;
use std::time::Duration;

use crate::clock::Clock;
use crate::config::WorkflowConfig;
use crate::error::{ConfigError, SubmissionError};
use crate::node::NodeClient;
use crate::reader::{ReadReport, VerificationOutcome, VerifiedReader};
use crate::resolver::RootResolution;
use crate::types::{Height, Query, WriteRequest};

/// Non-terminal states, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState<'a> {
    Submitted,
    AwaitingResult,
    AwaitingFinality { height: Height, query: &'a Query },
}

impl fmt::Display for WorkflowState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowState::Submitted => f.write_str("submitted"),
            WorkflowState::AwaitingResult => f.write_str("awaiting result"),
            WorkflowState::AwaitingFinality { height, query } => {
                write!(f, "awaiting finality of {} for {}", height, query)
            }
        }
    }
}

/// Why a write never produced a value to verify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Refused before execution (malformed payload, network failure).
    Submission(String),
    /// Executed with a non-zero status code.
    Execution {
        height: Height,
        code: u32,
        log: Option<String>,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Submission(detail) => f.write_str(detail),
            Rejection::Execution { log, .. } => f.write_str(log.as_deref().unwrap_or("NO_MESSAGE")),
        }
    }
}

impl From<SubmissionError> for Rejection {
    fn from(e: SubmissionError) -> Self {
        Rejection::Submission(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// Write succeeded and nothing needed proving.
    Unchecked { height: Height, info: Option<Vec<u8>> },
    /// Write succeeded and its result was re-read under proof. The report's
    /// outcome may still be a failure.
    Checked(ReadReport),
}

impl Settlement {
    pub fn height(&self) -> Height {
        match self {
            Settlement::Unchecked { height, .. } => *height,
            Settlement::Checked(report) => report.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    Rejected(Rejection),
    Settled(Settlement),
    /// The attesting root did not appear within the budget. Nothing was
    /// checked, so this is not a proof failure.
    TimedOut { height: Height, waited: Duration },
}

impl WorkflowOutcome {
    fn label(&self) -> &'static str {
        match self {
            WorkflowOutcome::Rejected(_) => "rejected",
            WorkflowOutcome::Settled(Settlement::Unchecked { .. }) => "settled_unchecked",
            WorkflowOutcome::Settled(Settlement::Checked(_)) => "settled_checked",
            WorkflowOutcome::TimedOut { .. } => "timed_out",
        }
    }
}

/// Runs one write to completion. Writes are never resubmitted; only the
/// finality poll repeats.
pub struct CommitAndVerify<N, C> {
    reader: VerifiedReader<N>,
    clock: C,
    config: WorkflowConfig,
}

impl<N: NodeClient, C: Clock> CommitAndVerify<N, C> {
    /// Fails on a config that would poll without ever sleeping.
    pub fn new(node: N, clock: C, config: WorkflowConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            reader: VerifiedReader::new(node),
            clock,
            config: config.validate()?,
        })
    }

    pub fn reader(&self) -> &VerifiedReader<N> {
        &self.reader
    }

    /// Node failures never escape: a failed submission is a rejection and a
    /// failed read while awaiting finality is retried on the next tick.
    pub fn run(&self, write: &WriteRequest) -> WorkflowOutcome {
        let outcome = self.drive(write);
        metrics::increment_counter!("kvproof_workflow_outcomes_total", "outcome" => outcome.label());
        outcome
    }

    fn drive(&self, write: &WriteRequest) -> WorkflowOutcome {
        let payload = write.payload();
        self.transition(&WorkflowState::Submitted);

        let response = match self.reader.node().broadcast_commit(&payload) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Submission of {:?} failed: {}", payload, e);
                return WorkflowOutcome::Rejected(e.into());
            }
        };
        self.transition(&WorkflowState::AwaitingResult);

        if !response.is_success() {
            tracing::warn!(height = %response.height, code = response.code, "Execution failed: {:?}", response.log);
            return WorkflowOutcome::Rejected(Rejection::Execution {
                height: response.height,
                code: response.code,
                log: response.log,
            });
        }

        let tentative = match response.info {
            Some(info) if write.requires_verification() => info,
            info => {
                return WorkflowOutcome::Settled(Settlement::Unchecked {
                    height: response.height,
                    info,
                });
            }
        };

        let height = response.height;
        let query = Query::get(write.result_key());
        self.transition(&WorkflowState::AwaitingFinality { height, query: &query });

        self.await_and_verify(height, &query, &tentative)
    }

    fn await_and_verify(
        &self,
        height: Height,
        query: &Query,
        tentative: &[u8],
    ) -> WorkflowOutcome {
        let interval = self.config.poll_interval();
        let budget = self.config.finality_timeout();
        let start = self.clock.now();
        let mut polls = 0u32;

        loop {
            polls += 1;
            match self.reader.resolver().resolve(height) {
                Ok(RootResolution::Resolved(_)) => {
                    let waited = self.clock.now().saturating_sub(start);
                    tracing::debug!(%height, polls, ?waited, "Attesting root observable");
                    match self.reader.verified_query_report(height, query, Some(tentative)) {
                        // The tip moved back between the poll and the read.
                        Ok(report) if report.outcome == VerificationOutcome::NotFinalized => {}
                        Ok(report) => {
                            metrics::histogram!("kvproof_finality_wait_seconds", waited.as_secs_f64());
                            return WorkflowOutcome::Settled(Settlement::Checked(report));
                        }
                        Err(e) => tracing::warn!(%height, polls, "Verified read failed: {}", e),
                    }
                }
                Ok(RootResolution::NotFinalized) => {}
                Err(e) => tracing::warn!(%height, polls, "Finality poll failed: {}", e),
            }

            let waited = self.clock.now().saturating_sub(start);
            if waited >= budget {
                tracing::info!(%height, polls, ?waited, "Gave up waiting for attesting root");
                return WorkflowOutcome::TimedOut { height, waited };
            }
            self.clock.sleep(interval.min(budget - waited));
        }
    }

    fn transition(&self, state: &WorkflowState<'_>) {
        tracing::debug!("Workflow -> {}", state);
    }
}
