//! Write submissions and what the node reports back for them.

use serde::{Deserialize, Serialize};

use super::height::Height;

/// Key queried after an operation-style write. The node stores the result of
/// the last `run` under it.
pub const OPERATION_RESULT_KEY: &str = "optarg";

const KEY_VALUE_DELIMITER: char = '=';

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "arg", rename_all = "lowercase")]
pub enum WriteRequest {
    /// `key=value` write whose tentative result is verified.
    Put(String),
    /// `key=value` write reported as-is, no proof check.
    FastPut(String),
    /// Operation submitted without an explicit key.
    Run(String),
}

impl WriteRequest {
    /// Transaction text broadcast to the node.
    pub fn payload(&self) -> String {
        match self {
            WriteRequest::Put(tx) | WriteRequest::FastPut(tx) => tx.clone(),
            WriteRequest::Run(arg) => format!("{}{}{}", OPERATION_RESULT_KEY, KEY_VALUE_DELIMITER, arg),
        }
    }

    /// Key whose committed value should equal the write's tentative result.
    pub fn result_key(&self) -> &str {
        match self {
            WriteRequest::Put(tx) | WriteRequest::FastPut(tx) => tx
                .split_once(KEY_VALUE_DELIMITER)
                .map(|(key, _)| key)
                .unwrap_or(tx.as_str()),
            WriteRequest::Run(_) => OPERATION_RESULT_KEY,
        }
    }

    pub fn requires_verification(&self) -> bool {
        !matches!(self, WriteRequest::FastPut(_))
    }
}

/// Outcome of a commit-style broadcast that made it into a block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitResponse {
    pub height: Height,
    /// Execution status; zero is success.
    pub code: u32,
    /// Tentative result reported by execution.
    pub info: Option<Vec<u8>>,
    pub log: Option<String>,
}

impl CommitResponse {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}
