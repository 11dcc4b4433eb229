// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use kvproof::clock::ManualClock;
use kvproof::config::WorkflowConfig;
use kvproof::fixtures::{build_proof, ScriptedNode};
use kvproof::report::Report;
use kvproof::types::{CommitResponse, Height, StateRoot, WriteRequest};
use kvproof::verdict::Verdict;
use kvproof::verify::verify_proof;
use kvproof::workflow::Settlement;
use kvproof::{CommitAndVerify, VerificationOutcome, WorkflowOutcome};

fn alpha_node(root: StateRoot, heights: &[u64]) -> ScriptedNode {
    let fx = build_proof(b"42", 3);
    ScriptedNode::new()
        .with_heights(heights.iter().copied())
        .with_proven(100, "alpha", &kvproof::fixtures::ProofFixture { root, ..fx })
        .with_commit(Ok(CommitResponse {
            height: Height(100),
            code: 0,
            info: Some(b"42".to_vec()),
            log: None,
        }))
}

#[test]
fn test_put_alpha_settles_verified() {
    kvproof::telemetry::init_tracing();
    kvproof::telemetry::describe_metrics();

    let fx = build_proof(b"42", 3);
    assert!(verify_proof(b"42", &fx.proof, &fx.root));

    let node = alpha_node(fx.root.clone(), &[100, 101]);
    let workflow = CommitAndVerify::new(&node, ManualClock::new(), WorkflowConfig::default()).unwrap();

    let outcome = workflow.run(&WriteRequest::Put("alpha=42".into()));

    let WorkflowOutcome::Settled(Settlement::Checked(read)) = &outcome else {
        panic!("expected a checked settlement, got {:?}", outcome);
    };
    assert_eq!(read.outcome, VerificationOutcome::Verified(b"42".to_vec()));
    assert_eq!(read.height, Height(100));
    assert_eq!(read.root.as_ref(), Some(&fx.root));
    assert_eq!(node.submitted(), vec!["alpha=42".to_string()]);

    let verdict = Verdict::of_workflow(&outcome);
    assert_eq!(verdict, Verdict::Ok);
    assert_eq!(verdict.exit_code(), 0);

    let report = Report::from_workflow(&outcome);
    assert_eq!(report.result.as_deref(), Some("42"));
    assert_eq!(report.verdict, "OK");
}

#[test]
fn test_lying_root_is_a_fault() {
    let node = alpha_node(StateRoot::new("DEADBEEF"), &[101]);
    let workflow = CommitAndVerify::new(&node, ManualClock::new(), WorkflowConfig::default()).unwrap();

    let outcome = workflow.run(&WriteRequest::Put("alpha=42".into()));

    let verdict = Verdict::of_workflow(&outcome);
    assert!(verdict.is_fault());
    assert_eq!(verdict.exit_code(), 1);
    assert_eq!(Report::from_workflow(&outcome).verdict, "Proof is invalid");
}

#[test]
fn test_stalled_chain_is_pending_not_fault() {
    let fx = build_proof(b"42", 3);
    let node = alpha_node(fx.root, &[100]);
    let workflow = CommitAndVerify::new(
        &node,
        ManualClock::new(),
        WorkflowConfig { poll_interval_ms: 100, finality_timeout_ms: 400 },
    ).unwrap();

    let outcome = workflow.run(&WriteRequest::Put("alpha=42".into()));

    assert!(matches!(outcome, WorkflowOutcome::TimedOut { height: Height(100), .. }));
    let verdict = Verdict::of_workflow(&outcome);
    assert_eq!(verdict, Verdict::Pending);
    assert!(!verdict.is_fault());
}
