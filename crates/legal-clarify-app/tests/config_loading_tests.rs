//! Integration tests for environment-driven configuration.

use std::collections::HashMap;

use legal_clarify_app::{AppConfig, AppError, ENV_ANALYSIS_ENDPOINT, ENV_RNG_SEED};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn config_loading_tests_defaults_to_unseeded_mock() {
    let config = AppConfig::from_lookup(lookup(&[])).expect("empty env is valid");
    assert_eq!(config, AppConfig::default());
}

#[test]
fn config_loading_tests_reads_seed_and_endpoint() {
    let config = AppConfig::from_lookup(lookup(&[
        (ENV_RNG_SEED, " 42 "),
        (ENV_ANALYSIS_ENDPOINT, "https://analysis.example.test/v1"),
    ]))
    .expect("values are valid");
    assert_eq!(config.rng_seed, Some(42));
    assert_eq!(
        config.analysis_endpoint.as_deref(),
        Some("https://analysis.example.test/v1")
    );
}

#[test]
fn config_loading_tests_rejects_non_numeric_seed() {
    let error = AppConfig::from_lookup(lookup(&[(ENV_RNG_SEED, "abc")]))
        .expect_err("seed must be numeric");
    assert!(matches!(error, AppError::Config(_)));
}

#[test]
fn config_loading_tests_blank_endpoint_is_unset() {
    let config = AppConfig::from_lookup(lookup(&[(ENV_ANALYSIS_ENDPOINT, "  ")]))
        .expect("blank is valid");
    assert_eq!(config.analysis_endpoint, None);
}
