#![warn(missing_docs)]
//! # legal-clarify-analysis
//!
//! ## Purpose
//! Defines the document analysis result model and the provider capability
//! that produces it.
//!
//! ## Responsibilities
//! - Model [`AnalysisResult`] with its wire (camelCase) field names.
//! - Ship the two canned result templates used by the mock provider.
//! - Abstract analysis behind [`AnalysisProvider`] with a mock and a remote
//!   variant.
//! - Parse and validate versioned remote analysis responses.
//!
//! ## Data flow
//! Upload state machine -> [`AnalysisProvider::analyze`] -> either
//! [`MockAnalysisProvider`] (uniform pick from [`canned_templates`]) or
//! [`RemoteAnalysisProvider`] (request through [`AnalysisTransport`] ->
//! [`parse_analysis_response`]) -> [`AnalysisResult`].
//!
//! ## Ownership and lifetimes
//! Results are owned values so a new analysis can replace the previous one
//! wholesale without borrowing from provider state or network buffers.
//!
//! ## Error model
//! Endpoint policy, transport, decode, and contract failures are reported as
//! [`AnalysisError`]. The mock provider does not fail in practice.
//!
//! ## Example
//! ```rust
//! use legal_clarify_analysis::{AnalysisProvider, MockAnalysisProvider, RiskLevel};
//! use legal_clarify_core::DocumentFile;
//!
//! let provider = MockAnalysisProvider::with_seed(7);
//! let file = DocumentFile::new("lease.pdf", "application/pdf", 1024);
//! let result = provider.analyze(&file).unwrap();
//! assert!(matches!(result.risk_level, RiskLevel::Medium | RiskLevel::High));
//! ```

use std::fmt;
use std::sync::{Arc, Mutex};

use legal_clarify_core::DocumentFile;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Canonical schema version for the remote analysis contract.
pub const ANALYSIS_SCHEMA_VERSION_V1: &str = "v1";

/// Upper bound of [`AnalysisResult::overall_score`].
pub const MAX_OVERALL_SCORE: f64 = 10.0;

/// Coarse risk classification of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Low risk.
    Low,
    /// Medium risk.
    Medium,
    /// High risk.
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(label)
    }
}

/// Structured analysis of one legal document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Detected document category (for example "Rental Agreement").
    pub document_type: String,
    /// Overall risk classification.
    pub risk_level: RiskLevel,
    /// Favorability score in `[0, 10]`.
    pub overall_score: f64,
    /// Clauses that work against the reader, most important first.
    pub key_risks: Vec<String>,
    /// Clauses that protect the reader.
    pub protections: Vec<String>,
    /// Plain-language executive summary.
    pub simplified_summary: String,
    /// Suggested next steps.
    pub recommendations: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

/// Canned "Rental Agreement" result (Medium risk, score 7.2).
pub fn rental_agreement_template() -> AnalysisResult {
    AnalysisResult {
        document_type: "Rental Agreement".to_string(),
        risk_level: RiskLevel::Medium,
        overall_score: 7.2,
        key_risks: owned(&[
            "Security deposit non-refundable clause",
            "Automatic rent increase provision",
            "Limited maintenance responsibility",
        ]),
        protections: owned(&[
            "30-day notice requirement",
            "Right to quiet enjoyment",
            "Habitability guarantee",
        ]),
        simplified_summary: "This rental agreement contains standard terms with some concerning clauses. The security deposit is non-refundable, and rent can increase automatically. However, you have basic tenant protections including proper notice requirements and habitability rights.".to_string(),
        recommendations: owned(&[
            "Negotiate the security deposit terms",
            "Clarify maintenance responsibilities",
            "Request cap on rent increases",
        ]),
    }
}

/// Canned "Loan Contract" result (High risk, score 4.8).
pub fn loan_contract_template() -> AnalysisResult {
    AnalysisResult {
        document_type: "Loan Contract".to_string(),
        risk_level: RiskLevel::High,
        overall_score: 4.8,
        key_risks: owned(&[
            "Variable interest rate without cap",
            "Severe penalty clauses for late payment",
            "Personal guarantee requirement",
        ]),
        protections: owned(&[
            "Right to prepay without penalty",
            "Clear payment schedule",
            "Grace period for payments",
        ]),
        simplified_summary: "This loan contract has significant risks including uncapped variable rates and harsh penalties. The personal guarantee means your assets could be at risk if you default.".to_string(),
        recommendations: owned(&[
            "Negotiate interest rate cap",
            "Review penalty terms",
            "Consider removing personal guarantee",
        ]),
    }
}

/// The fixed template pool, in selection-index order.
pub fn canned_templates() -> [AnalysisResult; 2] {
    [rental_agreement_template(), loan_contract_template()]
}

/// Capability that turns a selected document into an analysis result.
///
/// The upload state machine depends only on this trait, never on which
/// variant is active.
pub trait AnalysisProvider: Send + Sync {
    /// Analyzes `document`.
    ///
    /// # Errors
    /// Returns [`AnalysisError`] when no result can be produced.
    fn analyze(&self, document: &DocumentFile) -> Result<AnalysisResult, AnalysisError>;
}

/// Provider that picks one canned template uniformly at random.
///
/// The document is ignored; results are not derived from file content.
#[derive(Debug)]
pub struct MockAnalysisProvider {
    rng: Mutex<StdRng>,
}

impl MockAnalysisProvider {
    /// Creates a provider seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a deterministic provider for tests and reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for MockAnalysisProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisProvider for MockAnalysisProvider {
    fn analyze(&self, document: &DocumentFile) -> Result<AnalysisResult, AnalysisError> {
        let index = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| AnalysisError::Unavailable("mock rng lock poisoned".to_string()))?;
            rng.random_range(0..2_usize)
        };

        let [rental, loan] = canned_templates();
        let result = if index == 0 { rental } else { loan };
        tracing::debug!(
            file = %document.name,
            document_type = %result.document_type,
            "mock analysis selected template"
        );
        Ok(result)
    }
}

/// Request sent to a remote analysis backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Contract version the client speaks.
    pub schema_version: String,
    /// Original file name.
    pub file_name: String,
    /// Declared media type.
    pub media_type: String,
    /// Size in bytes.
    pub size_bytes: u64,
}

impl AnalysisRequest {
    /// Builds a v1 request describing `document`.
    pub fn for_document(document: &DocumentFile) -> Self {
        Self {
            schema_version: ANALYSIS_SCHEMA_VERSION_V1.to_string(),
            file_name: document.name.clone(),
            media_type: document.media_type.clone(),
            size_bytes: document.size_bytes,
        }
    }
}

/// Versioned response envelope returned by a remote analysis backend.
///
/// Envelope fields are snake_case; the nested [`AnalysisResult`] keeps its
/// camelCase wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Response schema version.
    pub schema_version: String,
    /// Request identifier for traceability.
    pub request_id: String,
    /// Analysis payload.
    pub result: AnalysisResult,
}

/// Abstract transport used by [`RemoteAnalysisProvider`].
pub trait AnalysisTransport: Send + Sync {
    /// Sends `request` to `endpoint` and returns the raw JSON body.
    fn submit(&self, endpoint: &str, request: &AnalysisRequest) -> Result<String, AnalysisError>;
}

/// Provider backed by an external analysis service.
#[derive(Clone)]
pub struct RemoteAnalysisProvider {
    endpoint: String,
    transport: Arc<dyn AnalysisTransport>,
}

impl RemoteAnalysisProvider {
    /// Creates a provider after validating the endpoint.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidEndpoint`] when the URL does not parse
    /// or is not HTTPS.
    pub fn new(
        endpoint: impl Into<String>,
        transport: Arc<dyn AnalysisTransport>,
    ) -> Result<Self, AnalysisError> {
        let endpoint = endpoint.into();
        validate_analysis_endpoint(&endpoint)?;
        Ok(Self {
            endpoint,
            transport,
        })
    }

    /// Returns configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl fmt::Debug for RemoteAnalysisProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteAnalysisProvider")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl AnalysisProvider for RemoteAnalysisProvider {
    fn analyze(&self, document: &DocumentFile) -> Result<AnalysisResult, AnalysisError> {
        let request = AnalysisRequest::for_document(document);
        let raw = self.transport.submit(&self.endpoint, &request)?;
        let response = parse_analysis_response(&raw)?;
        tracing::info!(
            request_id = %response.request_id,
            document_type = %response.result.document_type,
            "remote analysis received"
        );
        Ok(response.result)
    }
}

/// Validates that an analysis endpoint is an HTTPS URL.
///
/// # Errors
/// Returns [`AnalysisError::InvalidEndpoint`] for unparsable or non-HTTPS URLs.
pub fn validate_analysis_endpoint(endpoint: &str) -> Result<(), AnalysisError> {
    let parsed = Url::parse(endpoint)
        .map_err(|error| AnalysisError::InvalidEndpoint(format!("invalid analysis url: {error}")))?;

    if parsed.scheme() != "https" {
        return Err(AnalysisError::InvalidEndpoint(
            "analysis endpoint must use https".to_string(),
        ));
    }

    Ok(())
}

/// Parses raw JSON into a validated analysis response.
///
/// # Errors
/// Returns [`AnalysisError::Decode`] for invalid JSON.
/// Returns [`AnalysisError::InvalidContract`] when the schema version is not
/// `v1`, the request id is blank, the document type is blank, or the score is
/// outside `[0, 10]`.
pub fn parse_analysis_response(raw: &str) -> Result<AnalysisResponse, AnalysisError> {
    let parsed: AnalysisResponse = serde_json::from_str(raw).map_err(AnalysisError::Decode)?;

    if parsed.schema_version != ANALYSIS_SCHEMA_VERSION_V1 {
        return Err(AnalysisError::InvalidContract(format!(
            "unsupported schema_version {:?}",
            parsed.schema_version
        )));
    }

    if parsed.request_id.trim().is_empty() {
        return Err(AnalysisError::InvalidContract(
            "request_id is empty".to_string(),
        ));
    }

    validate_result(&parsed.result)?;
    Ok(parsed)
}

/// Checks result-level invariants.
///
/// # Errors
/// Returns [`AnalysisError::InvalidContract`] on a blank document type or an
/// out-of-range score.
pub fn validate_result(result: &AnalysisResult) -> Result<(), AnalysisError> {
    if result.document_type.trim().is_empty() {
        return Err(AnalysisError::InvalidContract(
            "documentType is empty".to_string(),
        ));
    }

    if !(0.0..=MAX_OVERALL_SCORE).contains(&result.overall_score) {
        return Err(AnalysisError::InvalidContract(format!(
            "overallScore {} outside [0, {MAX_OVERALL_SCORE}]",
            result.overall_score
        )));
    }

    Ok(())
}

/// Analysis provider errors.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Endpoint violates security or URL requirements.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Transport failure from analysis backend.
    #[error("analysis transport failure: {0}")]
    Transport(String),
    /// JSON decode failure.
    #[error("analysis decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// Parsed payload violates contract invariants.
    #[error("analysis contract violation: {0}")]
    InvalidContract(String),
    /// Provider cannot serve requests.
    #[error("analysis provider unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    //! Unit tests for templates, the mock provider, and response parsing.

    use super::*;

    struct FixedTransport(String);

    impl AnalysisTransport for FixedTransport {
        fn submit(
            &self,
            _endpoint: &str,
            _request: &AnalysisRequest,
        ) -> Result<String, AnalysisError> {
            Ok(self.0.clone())
        }
    }

    fn document() -> DocumentFile {
        DocumentFile::new("loan.docx", "application/msword", 4_096)
    }

    #[test]
    fn templates_match_published_values() {
        let [rental, loan] = canned_templates();
        assert_eq!(rental.document_type, "Rental Agreement");
        assert_eq!(rental.risk_level, RiskLevel::Medium);
        assert_eq!(rental.overall_score, 7.2);
        assert_eq!(loan.document_type, "Loan Contract");
        assert_eq!(loan.risk_level, RiskLevel::High);
        assert_eq!(loan.overall_score, 4.8);
        for template in [&rental, &loan] {
            assert_eq!(template.key_risks.len(), 3);
            assert_eq!(template.protections.len(), 3);
            assert_eq!(template.recommendations.len(), 3);
        }
    }

    #[test]
    fn mock_provider_only_returns_templates_and_reaches_both() {
        let provider = MockAnalysisProvider::with_seed(42);
        let templates = canned_templates();
        let mut seen = [false, false];

        for _ in 0..64 {
            let result = provider.analyze(&document()).expect("mock never fails");
            let index = templates
                .iter()
                .position(|template| *template == result)
                .expect("result must be one of the templates");
            seen[index] = true;
        }

        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn result_serializes_with_camel_case_fields() {
        let value = serde_json::to_value(rental_agreement_template()).expect("serializes");
        assert_eq!(value["documentType"], "Rental Agreement");
        assert_eq!(value["riskLevel"], "Medium");
        assert!(value.get("simplifiedSummary").is_some());
    }

    #[test]
    fn response_envelope_is_snake_case_around_camel_case_result() {
        let value = serde_json::to_value(AnalysisResponse {
            schema_version: ANALYSIS_SCHEMA_VERSION_V1.to_string(),
            request_id: "req-3".to_string(),
            result: loan_contract_template(),
        })
        .expect("serializes");
        assert_eq!(value["schema_version"], "v1");
        assert_eq!(value["request_id"], "req-3");
        assert_eq!(value["result"]["overallScore"], 4.8);
        assert!(value["result"].get("overall_score").is_none());

        let request = serde_json::to_value(AnalysisRequest::for_document(&document()))
            .expect("serializes");
        assert_eq!(request["file_name"], "loan.docx");
        assert_eq!(request["size_bytes"], 4_096);
    }

    #[test]
    fn remote_provider_rejects_plain_http() {
        let transport = Arc::new(FixedTransport(String::new()));
        let error = RemoteAnalysisProvider::new("http://analysis.example.test/v1", transport)
            .expect_err("http must be rejected");
        assert!(matches!(error, AnalysisError::InvalidEndpoint(_)));
    }

    #[test]
    fn remote_provider_rejects_out_of_range_score() {
        let mut result = loan_contract_template();
        result.overall_score = 11.0;
        let body = serde_json::to_string(&AnalysisResponse {
            schema_version: ANALYSIS_SCHEMA_VERSION_V1.to_string(),
            request_id: "req-9".to_string(),
            result,
        })
        .expect("serializes");

        let provider = RemoteAnalysisProvider::new(
            "https://analysis.example.test/v1",
            Arc::new(FixedTransport(body)),
        )
        .expect("https endpoint is valid");

        let error = provider.analyze(&document()).expect_err("score out of range");
        assert!(matches!(error, AnalysisError::InvalidContract(_)));
    }
}
