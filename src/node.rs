// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The consensus node, as seen by the verifier.
//!
//! Transport and decoding live behind this trait; everything crossing it is
//! already decoded bytes and text.

use crate::error::{NodeError, SubmissionError};
use crate::types::{CommitResponse, Height, Query, QueryResponse, StateRoot};

pub trait NodeClient {
    /// Highest committed block the node reports.
    fn latest_height(&self) -> Result<Height, NodeError>;

    /// Root attesting `height`, read from the header of block `height + 1`.
    ///
    /// Callers must already know that block exists.
    fn attesting_root(&self, height: Height) -> Result<StateRoot, NodeError>;

    /// Broadcast `payload` and wait for it to be committed.
    fn broadcast_commit(&self, payload: &str) -> Result<CommitResponse, SubmissionError>;

    /// Run `query` against state as of `height`.
    fn query_state(&self, height: Height, query: &Query) -> Result<QueryResponse, NodeError>;
}

impl<T: NodeClient + ?Sized> NodeClient for &T {
    fn latest_height(&self) -> Result<Height, NodeError> {
        (**self).latest_height()
    }

    fn attesting_root(&self, height: Height) -> Result<StateRoot, NodeError> {
        (**self).attesting_root(height)
    }

    fn broadcast_commit(&self, payload: &str) -> Result<CommitResponse, SubmissionError> {
        (**self).broadcast_commit(payload)
    }

    fn query_state(&self, height: Height, query: &Query) -> Result<QueryResponse, NodeError> {
        (**self).query_state(height, query)
    }
}
