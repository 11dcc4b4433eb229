// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Test fixtures: a scripted node and valid proof chains.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use crate::error::{NodeError, SubmissionError};
use crate::node::NodeClient;
use crate::proof::Proof;
use crate::types::{CommitResponse, Height, Query, QueryResponse, StateRoot};
use crate::verify::digest_hex;

/// A value together with a proof and root it verifies against.
#[derive(Debug, Clone)]
pub struct ProofFixture {
    pub value: Vec<u8>,
    pub proof: Proof,
    pub root: StateRoot,
}

/// Build a `depth`-level proof for `value`.
///
/// Every level carries a sibling token plus the digest of what is below it.
/// The root is reported uppercase, as nodes do.
pub fn build_proof(value: &[u8], depth: usize) -> ProofFixture {
    let mut levels = Vec::with_capacity(depth);
    let mut below = digest_hex(value);
    for i in 0..depth {
        let sibling = digest_hex(format!("sibling-{}", i).as_bytes());
        let level = if i % 2 == 0 {
            format!("{} {}", sibling, below)
        } else {
            format!("{} {}", below, sibling)
        };
        below = digest_hex(level.as_bytes());
        levels.push(level);
    }
    ProofFixture {
        value: value.to_vec(),
        proof: Proof::from_levels(levels),
        root: StateRoot::new(below.to_uppercase()),
    }
}

/// In-memory node driven by a script.
///
/// `latest_height` pops from a queue of scripted answers; the last answer
/// repeats forever. Call counters let tests assert how the node was used.
#[derive(Debug, Default)]
pub struct ScriptedNode {
    heights: RefCell<VecDeque<Result<Height, NodeError>>>,
    roots: HashMap<Height, StateRoot>,
    states: HashMap<(Height, Query), QueryResponse>,
    commit: Option<Result<CommitResponse, SubmissionError>>,
    query_errors: RefCell<VecDeque<NodeError>>,
    latest_calls: Cell<usize>,
    root_calls: Cell<usize>,
    query_calls: Cell<usize>,
    submitted: RefCell<Vec<String>>,
}

impl ScriptedNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain tip stays at `height`.
    pub fn at_height(self, height: u64) -> Self {
        self.with_heights([height])
    }

    /// Successive `latest_height` answers.
    pub fn with_heights<I: IntoIterator<Item = u64>>(self, heights: I) -> Self {
        self.heights
            .borrow_mut()
            .extend(heights.into_iter().map(|h| Ok(Height(h))));
        self
    }

    pub fn with_height_error(self, error: NodeError) -> Self {
        self.heights.borrow_mut().push_back(Err(error));
        self
    }

    /// Root attesting `height` (found in block `height + 1`).
    pub fn with_root(mut self, height: u64, root: StateRoot) -> Self {
        self.roots.insert(Height(height), root);
        self
    }

    pub fn with_state(mut self, height: u64, query: Query, response: QueryResponse) -> Self {
        self.states.insert((Height(height), query), response);
        self
    }

    /// Store `fixture` under `key` at `height` along with its root.
    pub fn with_proven(self, height: u64, key: &str, fixture: &ProofFixture) -> Self {
        self.with_root(height, fixture.root.clone()).with_state(
            height,
            Query::get(key),
            QueryResponse {
                value: Some(fixture.value.clone()),
                proof: Some(fixture.proof.clone()),
            },
        )
    }

    /// Fail the next state query with `error`; later queries answer normally.
    pub fn with_query_error(self, error: NodeError) -> Self {
        self.query_errors.borrow_mut().push_back(error);
        self
    }

    pub fn with_commit(mut self, response: Result<CommitResponse, SubmissionError>) -> Self {
        self.commit = Some(response);
        self
    }

    pub fn latest_calls(&self) -> usize {
        self.latest_calls.get()
    }

    pub fn root_calls(&self) -> usize {
        self.root_calls.get()
    }

    pub fn query_calls(&self) -> usize {
        self.query_calls.get()
    }

    pub fn submitted(&self) -> Vec<String> {
        self.submitted.borrow().clone()
    }
}

impl NodeClient for ScriptedNode {
    fn latest_height(&self) -> Result<Height, NodeError> {
        self.latest_calls.set(self.latest_calls.get() + 1);
        let mut heights = self.heights.borrow_mut();
        if heights.len() > 1 {
            if let Some(next) = heights.pop_front() {
                return next;
            }
        }
        heights.front().cloned().unwrap_or(Ok(Height(0)))
    }

    fn attesting_root(&self, height: Height) -> Result<StateRoot, NodeError> {
        self.root_calls.set(self.root_calls.get() + 1);
        let attesting = height
            .attesting()
            .ok_or_else(|| NodeError::Malformed("height overflow".into()))?;
        self.roots
            .get(&height)
            .cloned()
            .ok_or(NodeError::MissingBlock(attesting))
    }

    fn broadcast_commit(&self, payload: &str) -> Result<CommitResponse, SubmissionError> {
        self.submitted.borrow_mut().push(payload.to_string());
        self.commit
            .clone()
            .unwrap_or_else(|| Err(SubmissionError::Unavailable("no commit scripted".into())))
    }

    fn query_state(&self, height: Height, query: &Query) -> Result<QueryResponse, NodeError> {
        self.query_calls.set(self.query_calls.get() + 1);
        if let Some(error) = self.query_errors.borrow_mut().pop_front() {
            return Err(error);
        }
        Ok(self
            .states
            .get(&(height, query.clone()))
            .cloned()
            .unwrap_or_default())
    }
}
