#![warn(missing_docs)]
//! # legal-clarify-ui
//!
//! ## Purpose
//! Projects domain state into display-ready view models for the shell.
//!
//! ## Responsibilities
//! - Present an [`AnalysisResult`] as a summary card plus three tabs.
//! - Compute dashboard statistics, including a NaN-free average score.
//! - Describe upload list rows.
//! - Decide whether a route renders, shows a sign-in gate, or redirects.
//!
//! ## Data flow
//! Upload simulator / dashboard document list / auth flag -> projection
//! functions in this crate -> whatever renders the page.
//!
//! ## Ownership and lifetimes
//! View models own their strings so renderers never borrow from live
//! simulation state.
//!
//! ## Error model
//! Projections are total; there is nothing to fail.

use legal_clarify_analysis::{AnalysisResult, RiskLevel};
use legal_clarify_auth::Route;
use legal_clarify_core::{UploadStatus, UploadedFile};

/// Tabs of the analysis results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisTab {
    /// Key risks (default).
    #[default]
    Risks,
    /// Legal protections.
    Protections,
    /// Recommended actions.
    Recommendations,
}

impl AnalysisTab {
    /// All tabs in display order.
    pub const ALL: [AnalysisTab; 3] = [
        AnalysisTab::Risks,
        AnalysisTab::Protections,
        AnalysisTab::Recommendations,
    ];

    /// Short label shown on the tab trigger.
    pub fn label(self) -> &'static str {
        match self {
            AnalysisTab::Risks => "Key Risks",
            AnalysisTab::Protections => "Protections",
            AnalysisTab::Recommendations => "Actions",
        }
    }

    /// Heading shown above the tab content.
    pub fn heading(self) -> &'static str {
        match self {
            AnalysisTab::Risks => "Key Risks Identified",
            AnalysisTab::Protections => "Your Legal Protections",
            AnalysisTab::Recommendations => "Recommended Actions",
        }
    }
}

/// One numbered line inside a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedItem {
    /// 1-based position.
    pub number: usize,
    /// Item text.
    pub text: String,
}

/// Content of one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPanel {
    /// Which tab this is.
    pub tab: AnalysisTab,
    /// Trigger label.
    pub label: &'static str,
    /// Item count shown on the trigger badge.
    pub count: usize,
    /// Content heading.
    pub heading: &'static str,
    /// Numbered items.
    pub items: Vec<NumberedItem>,
}

/// Summary card and tab state for one analysis result.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    result: AnalysisResult,
    active_tab: AnalysisTab,
}

impl AnalysisView {
    /// Builds the view with the risks tab selected.
    pub fn new(result: AnalysisResult) -> Self {
        Self {
            result,
            active_tab: AnalysisTab::default(),
        }
    }

    /// Document type heading.
    pub fn document_type(&self) -> &str {
        &self.result.document_type
    }

    /// Risk badge text, for example `"Medium Risk"`.
    pub fn risk_badge(&self) -> String {
        format!("{} Risk", self.result.risk_level)
    }

    /// Risk level driving badge color.
    pub fn risk_level(&self) -> RiskLevel {
        self.result.risk_level
    }

    /// Score text, for example `"7.2/10"`.
    pub fn score_text(&self) -> String {
        format!("{}/10", self.result.overall_score)
    }

    /// Executive summary paragraph.
    pub fn executive_summary(&self) -> &str {
        &self.result.simplified_summary
    }

    /// Number of risk factors.
    pub fn risk_factor_count(&self) -> usize {
        self.result.key_risks.len()
    }

    /// Number of protections.
    pub fn protection_count(&self) -> usize {
        self.result.protections.len()
    }

    /// Number of recommended actions.
    pub fn action_count(&self) -> usize {
        self.result.recommendations.len()
    }

    /// Currently selected tab.
    pub fn active_tab(&self) -> AnalysisTab {
        self.active_tab
    }

    /// Selects a tab. Display-only; the result is untouched.
    pub fn select_tab(&mut self, tab: AnalysisTab) {
        self.active_tab = tab;
    }

    /// Content of `tab`.
    pub fn panel(&self, tab: AnalysisTab) -> TabPanel {
        let source = match tab {
            AnalysisTab::Risks => &self.result.key_risks,
            AnalysisTab::Protections => &self.result.protections,
            AnalysisTab::Recommendations => &self.result.recommendations,
        };
        TabPanel {
            tab,
            label: tab.label(),
            count: source.len(),
            heading: tab.heading(),
            items: source
                .iter()
                .enumerate()
                .map(|(index, text)| NumberedItem {
                    number: index + 1,
                    text: text.clone(),
                })
                .collect(),
        }
    }

    /// Content of the selected tab.
    pub fn active_panel(&self) -> TabPanel {
        self.panel(self.active_tab)
    }
}

/// Processing state of a dashboard document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    /// Analysis finished.
    Analyzed,
    /// Analysis in progress.
    Processing,
    /// Analysis failed.
    Failed,
}

/// Document entry listed on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardDocument {
    /// Identifier.
    pub id: String,
    /// File name.
    pub name: String,
    /// Detected document category.
    pub document_type: String,
    /// Human-readable size.
    pub size_label: String,
    /// Upload date label.
    pub date: String,
    /// Processing state.
    pub status: DocumentStatus,
    /// Risk classification.
    pub risk_level: RiskLevel,
    /// Number of key points found.
    pub key_points: u32,
    /// Score, when analysis produced one.
    pub analysis_score: Option<f64>,
}

/// Dashboard stat cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    /// Total documents.
    pub total_documents: usize,
    /// Documents in `Analyzed`.
    pub analyzed: usize,
    /// Documents rated high risk.
    pub high_risk: usize,
    /// Average score with one decimal; `"0.0"` when nothing is scored.
    pub average_score: String,
}

/// Computes dashboard stat cards.
///
/// Only documents with a non-zero, finite score take part in the average.
pub fn dashboard_stats(documents: &[DashboardDocument]) -> DashboardStats {
    let scores: Vec<f64> = documents
        .iter()
        .filter_map(|document| document.analysis_score)
        .filter(|score| score.is_finite() && *score != 0.0)
        .collect();

    let average_score = if scores.is_empty() {
        "0.0".to_string()
    } else {
        format!("{:.1}", scores.iter().sum::<f64>() / scores.len() as f64)
    };

    DashboardStats {
        total_documents: documents.len(),
        analyzed: documents
            .iter()
            .filter(|document| document.status == DocumentStatus::Analyzed)
            .count(),
        high_risk: documents
            .iter()
            .filter(|document| document.risk_level == RiskLevel::High)
            .count(),
        average_score,
    }
}

/// One row of the "Processing Files" list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRow {
    /// File name.
    pub name: String,
    /// Size, for example `"2.00 MB"`.
    pub size_label: String,
    /// Status label.
    pub status: UploadStatus,
    /// Progress bar width in percent.
    pub progress: u8,
}

/// Projects tracked uploads into list rows, preserving order.
pub fn upload_rows(files: &[UploadedFile]) -> Vec<UploadRow> {
    files
        .iter()
        .map(|entry| UploadRow {
            name: entry.file.name.clone(),
            size_label: format!("{} MB", entry.file.size_mb_label()),
            status: entry.status,
            progress: entry.progress,
        })
        .collect()
}

/// What the shell shows for a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAccess {
    /// Render the page.
    Render,
    /// Render a "Sign In Required" gate in place of the page.
    SignInGate,
    /// Navigate elsewhere instead of rendering.
    RedirectTo(Route),
}

/// Applies the signed-in requirements of protected pages.
pub fn page_access(route: &Route, logged_in: bool) -> PageAccess {
    match route {
        Route::Upload if !logged_in => PageAccess::SignInGate,
        Route::Dashboard if !logged_in => PageAccess::RedirectTo(Route::Login),
        _ => PageAccess::Render,
    }
}
