//! Shared fixtures for upload integration tests.

use std::sync::Arc;

use legal_clarify_analysis::{
    AnalysisError, AnalysisProvider, AnalysisResult, MockAnalysisProvider,
};
use legal_clarify_core::DocumentFile;
use legal_clarify_upload::{SimulationConfig, UploadSimulator};

/// Provider that always fails, used to exercise the `Error` status.
#[allow(dead_code)]
pub struct FailingProvider;

impl AnalysisProvider for FailingProvider {
    fn analyze(&self, _document: &DocumentFile) -> Result<AnalysisResult, AnalysisError> {
        Err(AnalysisError::Unavailable("backend offline".to_string()))
    }
}

/// 2 MiB PDF that passes validation.
#[allow(dead_code)]
pub fn fixture_pdf() -> DocumentFile {
    DocumentFile::new("lease.pdf", "application/pdf", 2 * 1024 * 1024)
}

/// Simulator with default timing and a seeded mock provider.
#[allow(dead_code)]
pub fn fixture_simulator() -> UploadSimulator {
    UploadSimulator::new(
        SimulationConfig::default(),
        Arc::new(MockAnalysisProvider::with_seed(11)),
    )
    .expect("default config should be valid")
}
