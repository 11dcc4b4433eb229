// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Caller-facing classification of terminal outcomes.
//!
//! Only [`Verdict::Fault`] means the node lied or is broken. Everything else
//! is either success, "try again later", or a plain answer.

use serde::Serialize;

use crate::reader::VerificationOutcome;
use crate::workflow::{Settlement, WorkflowOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Ok,
    /// Root not observable yet (not finalized, timed out).
    Pending,
    /// Key not present.
    Absent,
    /// Value returned without proof.
    Unproven,
    /// Write refused or failed to execute.
    Rejected,
    /// Proof invalid, or proven value contradicts the tentative one.
    Fault,
}

impl Verdict {
    pub fn of_outcome(outcome: &VerificationOutcome) -> Self {
        match outcome {
            VerificationOutcome::Verified(_) => Verdict::Ok,
            VerificationOutcome::NotFinalized => Verdict::Pending,
            VerificationOutcome::Empty => Verdict::Absent,
            VerificationOutcome::MissingProof => Verdict::Unproven,
            VerificationOutcome::Invalid | VerificationOutcome::TentativeMismatch { .. } => Verdict::Fault,
        }
    }

    pub fn of_workflow(outcome: &WorkflowOutcome) -> Self {
        match outcome {
            WorkflowOutcome::Rejected(_) => Verdict::Rejected,
            WorkflowOutcome::TimedOut { .. } => Verdict::Pending,
            WorkflowOutcome::Settled(Settlement::Unchecked { .. }) => Verdict::Ok,
            WorkflowOutcome::Settled(Settlement::Checked(report)) => Self::of_outcome(&report.outcome),
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, Verdict::Fault)
    }

    /// Process exit code for tools built on this crate.
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Ok => 0,
            Verdict::Fault => 1,
            Verdict::Pending => 2,
            Verdict::Absent => 3,
            Verdict::Unproven => 4,
            Verdict::Rejected => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Height;
    use crate::workflow::Rejection;
    use std::time::Duration;

    #[test]
    fn test_only_proof_failures_are_faults() {
        let faults = [
            VerificationOutcome::Invalid,
            VerificationOutcome::TentativeMismatch { expected: b"1".to_vec(), actual: b"2".to_vec() },
        ];
        for outcome in &faults {
            assert!(Verdict::of_outcome(outcome).is_fault(), "{:?}", outcome);
        }

        let benign = [
            VerificationOutcome::NotFinalized,
            VerificationOutcome::Empty,
            VerificationOutcome::MissingProof,
            VerificationOutcome::Verified(vec![]),
        ];
        for outcome in &benign {
            assert!(!Verdict::of_outcome(outcome).is_fault(), "{:?}", outcome);
        }
    }

    #[test]
    fn test_timeout_is_pending_not_fault() {
        let outcome = WorkflowOutcome::TimedOut { height: Height(7), waited: Duration::from_secs(5) };
        assert_eq!(Verdict::of_workflow(&outcome), Verdict::Pending);
        assert_eq!(Verdict::of_workflow(&outcome).exit_code(), 2);
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let all = [
            Verdict::Ok,
            Verdict::Pending,
            Verdict::Absent,
            Verdict::Unproven,
            Verdict::Rejected,
            Verdict::Fault,
        ];
        let mut codes: Vec<i32> = all.iter().map(Verdict::exit_code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
        assert_eq!(Verdict::of_workflow(&WorkflowOutcome::Rejected(Rejection::Submission("x".into()))).exit_code(), 5);
    }
}
