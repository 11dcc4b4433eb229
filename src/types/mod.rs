// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod height;
pub mod query;
pub mod root;
pub mod write;

pub use height::Height;
pub use query::{Query, QueryCommand, QueryResponse};
pub use root::StateRoot;
pub use write::{CommitResponse, WriteRequest, OPERATION_RESULT_KEY};
