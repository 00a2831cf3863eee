//! Integration tests for the media type and size policy.

mod common;

use legal_clarify_core::DocumentFile;
use legal_clarify_upload::{
    ACCEPTED_MEDIA_TYPES, MAX_FILE_SIZE_BYTES, SelectionOutcome, TOO_LARGE_MESSAGE,
    UNSUPPORTED_TYPE_MESSAGE, UploadError, validate_file,
};

#[test]
fn file_validation_tests_accept_every_listed_type_at_the_ceiling() {
    for media_type in ACCEPTED_MEDIA_TYPES {
        let file = DocumentFile::new("doc", media_type, MAX_FILE_SIZE_BYTES);
        assert_eq!(validate_file(&file), Ok(()), "{media_type} should be accepted");
    }
}

#[test]
fn file_validation_tests_reject_unlisted_types_with_type_message() {
    for media_type in ["image/png", "application/rtf", "text/html", ""] {
        let file = DocumentFile::new("doc", media_type, 1);
        let error = validate_file(&file).expect_err("type must be rejected");
        assert!(matches!(error, UploadError::UnsupportedType { .. }));
        assert_eq!(error.to_string(), UNSUPPORTED_TYPE_MESSAGE);
    }
}

#[test]
fn file_validation_tests_reject_one_byte_over_ten_mebibytes() {
    let file = DocumentFile::new("big.pdf", "application/pdf", 10 * 1024 * 1024 + 1);
    let error = validate_file(&file).expect_err("size must be rejected");
    assert_eq!(
        error,
        UploadError::TooLarge {
            size_bytes: 10 * 1024 * 1024 + 1,
            limit_bytes: MAX_FILE_SIZE_BYTES,
        }
    );
    assert_eq!(error.to_string(), TOO_LARGE_MESSAGE);
}

#[test]
fn file_validation_tests_check_type_before_size() {
    let file = DocumentFile::new("huge.png", "image/png", u64::MAX);
    assert!(matches!(
        validate_file(&file),
        Err(UploadError::UnsupportedType { .. })
    ));
}

#[test]
fn file_validation_tests_rejected_selections_create_no_entries() {
    let mut simulator = common::fixture_simulator();
    let outcomes = simulator.select_files(
        [
            DocumentFile::new("photo.png", "image/png", 100),
            common::fixture_pdf(),
            DocumentFile::new("scan.pdf", "application/pdf", MAX_FILE_SIZE_BYTES + 1),
        ],
        0,
    );

    assert!(matches!(outcomes[0], SelectionOutcome::Rejected { .. }));
    assert!(matches!(outcomes[1], SelectionOutcome::Accepted(_)));
    assert!(matches!(outcomes[2], SelectionOutcome::Rejected { .. }));
    assert_eq!(simulator.files().len(), 1);
    assert_eq!(simulator.files()[0].file.name, "lease.pdf");
}
