//! Tests status monotonicity on tracked uploads.

use legal_clarify_core::{CoreError, DocumentFile, FileId, UploadStatus, UploadedFile};

fn fixture_entry() -> UploadedFile {
    UploadedFile::new(
        FileId::new("k3j9x0a2b"),
        DocumentFile::new("lease.pdf", "application/pdf", 2 * 1024 * 1024),
    )
}

#[test]
fn status_transition_tests_follow_pipeline_order() {
    let mut entry = fixture_entry();
    assert_eq!(entry.progress, 0);
    assert_eq!(entry.status, UploadStatus::Uploading);

    entry.advance_status(UploadStatus::Analyzing).expect("upload finishes");
    entry
        .advance_status(UploadStatus::Analyzing)
        .expect("duplicate analyzing write is idempotent");
    entry.advance_status(UploadStatus::Completed).expect("analysis finishes");
    assert!(entry.status.is_terminal());
}

#[test]
fn status_transition_tests_reject_backwards_moves() {
    let mut entry = fixture_entry();
    let error = entry
        .advance_status(UploadStatus::Completed)
        .expect_err("cannot skip analysis");
    assert_eq!(
        error,
        CoreError::IllegalTransition {
            from: UploadStatus::Uploading,
            to: UploadStatus::Completed,
        }
    );
    assert_eq!(entry.status, UploadStatus::Uploading);
}

#[test]
fn status_transition_tests_format_size_in_megabytes() {
    assert_eq!(fixture_entry().file.size_mb_label(), "2.00");
}
