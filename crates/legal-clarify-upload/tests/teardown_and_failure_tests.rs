//! Integration tests for timer cancellation and provider failure.

mod common;

use std::sync::Arc;

use legal_clarify_core::UploadStatus;
use legal_clarify_upload::{SimulationConfig, UploadEventKind, UploadSimulator};

#[test]
fn teardown_and_failure_tests_cancel_pending_work_mid_upload() {
    let mut simulator = common::fixture_simulator();
    simulator
        .begin_simulation(common::fixture_pdf(), 0)
        .expect("begin should work");
    simulator.advance_to(1_000);

    // Interval plus upload-completion one-shot.
    assert_eq!(simulator.teardown(), 2);
    assert!(simulator.files().is_empty());
    assert_eq!(simulator.pending_timers(), 0);
    assert!(simulator.advance_to(10_000).is_empty());
    assert!(simulator.analysis_result().is_none());
}

#[test]
fn teardown_and_failure_tests_provider_failure_moves_file_to_error() {
    let mut simulator = UploadSimulator::new(
        SimulationConfig::default(),
        Arc::new(common::FailingProvider),
    )
    .expect("default config should be valid");
    let id = simulator
        .begin_simulation(common::fixture_pdf(), 0)
        .expect("begin should work");

    let events = simulator.advance_to(3_500);
    let last = events.last().expect("failure event expected");
    assert!(matches!(last.kind, UploadEventKind::AnalysisFailed { .. }));
    assert_eq!(simulator.file(&id).map(|e| e.status), Some(UploadStatus::Error));
    assert!(simulator.analysis_result().is_none());
    assert!(!simulator.is_showing_analysis());
}
