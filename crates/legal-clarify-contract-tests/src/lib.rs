#![warn(missing_docs)]
//! # legal-clarify-contract-tests
//!
//! Helpers for checking JSON payloads against the frozen schemas under
//! `contracts/` at the workspace root.

use std::path::PathBuf;

use jsonschema::JSONSchema;
use serde_json::Value;

/// Path of `relative` under the workspace `contracts/` directory.
pub fn contract_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../contracts")
        .join(relative)
}

/// Reads and parses a JSON file under `contracts/`.
///
/// # Panics
/// Panics when the file is missing or not JSON; intended for tests only.
pub fn load_contract_json(relative: &str) -> Value {
    let path = contract_path(relative);
    let raw = std::fs::read_to_string(&path)
        .unwrap_or_else(|error| panic!("{} should be readable: {error}", path.display()));
    serde_json::from_str(&raw)
        .unwrap_or_else(|error| panic!("{} should be valid json: {error}", path.display()))
}

/// Compiles the schema stored at `relative`.
///
/// # Panics
/// Panics when the schema does not compile.
pub fn compile_contract(relative: &str) -> JSONSchema {
    let schema = load_contract_json(relative);
    JSONSchema::compile(&schema)
        .unwrap_or_else(|error| panic!("{relative} should compile: {error}"))
}
