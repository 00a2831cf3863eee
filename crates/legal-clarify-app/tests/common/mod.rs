//! Shared fixtures for app integration tests.

use std::sync::Arc;

use legal_clarify_analysis::MockAnalysisProvider;
use legal_clarify_app::{AppConfig, AppShell, ToastLog};
use legal_clarify_core::DocumentFile;

/// Shell with a seeded mock provider, plus its toast sink.
#[allow(dead_code)]
pub fn fixture_shell() -> (AppShell, Arc<ToastLog>) {
    let toasts = Arc::new(ToastLog::default());
    let shell = AppShell::new(
        AppConfig::default(),
        Arc::new(MockAnalysisProvider::with_seed(21)),
        toasts.clone(),
    );
    (shell, toasts)
}

/// Valid 2 MiB PDF.
#[allow(dead_code)]
pub fn fixture_pdf() -> DocumentFile {
    DocumentFile::new("lease.pdf", "application/pdf", 2 * 1024 * 1024)
}
