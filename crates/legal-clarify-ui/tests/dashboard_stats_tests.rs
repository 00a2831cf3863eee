//! Integration tests for dashboard statistics.

use legal_clarify_analysis::RiskLevel;
use legal_clarify_ui::{DashboardDocument, DocumentStatus, dashboard_stats};

fn document(
    id: &str,
    status: DocumentStatus,
    risk: RiskLevel,
    score: Option<f64>,
) -> DashboardDocument {
    DashboardDocument {
        id: id.to_string(),
        name: format!("{id}.pdf"),
        document_type: "Rental Agreement".to_string(),
        size_label: "1.20 MB".to_string(),
        date: "2026-01-01".to_string(),
        status,
        risk_level: risk,
        key_points: 3,
        analysis_score: score,
    }
}

#[test]
fn dashboard_stats_tests_average_only_scored_documents() {
    let documents = vec![
        document("a", DocumentStatus::Analyzed, RiskLevel::Medium, Some(7.2)),
        document("b", DocumentStatus::Analyzed, RiskLevel::High, Some(4.8)),
        document("c", DocumentStatus::Processing, RiskLevel::Low, None),
        document("d", DocumentStatus::Failed, RiskLevel::High, Some(0.0)),
    ];

    let stats = dashboard_stats(&documents);
    assert_eq!(stats.total_documents, 4);
    assert_eq!(stats.analyzed, 2);
    assert_eq!(stats.high_risk, 2);
    assert_eq!(stats.average_score, "6.0");
}

#[test]
fn dashboard_stats_tests_unscored_documents_render_zero() {
    let documents = vec![document("c", DocumentStatus::Processing, RiskLevel::Low, None)];
    assert_eq!(dashboard_stats(&documents).average_score, "0.0");
}
