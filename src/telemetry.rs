// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a log subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already set.
pub fn init_tracing() -> bool {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "kvproof=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

/// Register metric descriptions with whatever recorder the host installed.
pub fn describe_metrics() {
    metrics::describe_counter!("kvproof_verifications_total", "Verified reads by outcome");
    metrics::describe_counter!("kvproof_workflow_outcomes_total", "Commit-and-verify runs by terminal outcome");
    metrics::describe_histogram!("kvproof_finality_wait_seconds", "Time a write waited for its attesting root");
}
