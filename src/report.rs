// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Output field set handed to whatever prints results.

use serde::Serialize;

use crate::reader::{ReadReport, VerificationOutcome};
use crate::verdict::Verdict;
use crate::workflow::{Rejection, Settlement, WorkflowOutcome};

pub const NOT_READY: &str = "NOT_READY";
pub const NO_PROOF: &str = "NO_PROOF";
pub const EMPTY: &str = "EMPTY";
pub const OK: &str = "OK";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// `OK`, or the reason it is not.
    pub verdict: String,
    pub class: Verdict,
}

impl Report {
    pub fn from_read(read: &ReadReport) -> Self {
        Self {
            height: Some(read.height.0),
            app_hash: Some(read.root.as_ref().map_or(NOT_READY.to_string(), |r| r.to_string())),
            proof: Some(read.proof.as_ref().map_or(NO_PROOF.to_string(), |p| p.to_raw())),
            result: Some(read.value.as_deref().map_or(EMPTY.to_string(), lossy)),
            info: None,
            verdict: verdict_text(&read.outcome),
            class: Verdict::of_outcome(&read.outcome),
        }
    }

    pub fn from_workflow(outcome: &WorkflowOutcome) -> Self {
        let class = Verdict::of_workflow(outcome);
        match outcome {
            WorkflowOutcome::Settled(Settlement::Checked(read)) => Self::from_read(read),
            WorkflowOutcome::Settled(Settlement::Unchecked { height, info }) => Self {
                height: Some(height.0),
                app_hash: None,
                proof: None,
                result: None,
                info: Some(info.as_deref().map_or(EMPTY.to_string(), lossy)),
                verdict: OK.to_string(),
                class,
            },
            WorkflowOutcome::Rejected(rejection) => Self {
                height: match rejection {
                    Rejection::Execution { height, .. } => Some(height.0),
                    Rejection::Submission(_) => None,
                },
                app_hash: None,
                proof: None,
                result: None,
                info: None,
                verdict: rejection.to_string(),
                class,
            },
            WorkflowOutcome::TimedOut { height, waited } => Self {
                height: Some(height.0),
                app_hash: Some(NOT_READY.to_string()),
                proof: None,
                result: None,
                info: None,
                verdict: format!("Attesting root not observable after {} ms", waited.as_millis()),
                class,
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn verdict_text(outcome: &VerificationOutcome) -> String {
    match outcome {
        VerificationOutcome::Verified(_) => OK.to_string(),
        other => other.to_string(),
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::Proof;
    use crate::types::{Height, Query, StateRoot};

    #[test]
    fn test_read_report_fields() {
        let read = ReadReport {
            height: Height(100),
            query: Query::get("alpha"),
            root: Some(StateRoot::new("ABCD")),
            value: Some(b"42".to_vec()),
            proof: Some(Proof::parse("aa, bb")),
            outcome: VerificationOutcome::Verified(b"42".to_vec()),
        };
        let report = Report::from_read(&read);
        assert_eq!(report.app_hash.as_deref(), Some("ABCD"));
        assert_eq!(report.proof.as_deref(), Some("aa, bb"));
        assert_eq!(report.result.as_deref(), Some("42"));
        assert_eq!(report.verdict, OK);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["height"], 100);
        assert_eq!(json["class"], "ok");
        assert!(json.get("info").is_none());
    }

    #[test]
    fn test_unfinalized_read_placeholders() {
        let read = ReadReport {
            height: Height(3),
            query: Query::ls("dir"),
            root: None,
            value: None,
            proof: None,
            outcome: VerificationOutcome::NotFinalized,
        };
        let report = Report::from_read(&read);
        assert_eq!(report.app_hash.as_deref(), Some(NOT_READY));
        assert_eq!(report.proof.as_deref(), Some(NO_PROOF));
        assert_eq!(report.result.as_deref(), Some(EMPTY));
        assert_eq!(report.class, Verdict::Pending);
    }
}
