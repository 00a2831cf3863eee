use std::fs;
use std::path::PathBuf;

// Injects the workspace `VERSION` file as `LEGAL_CLARIFY_VERSION`.
fn main() {
    let workspace_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"))
        .ancestors()
        .nth(2)
        .expect("workspace root above crates/legal-clarify-app")
        .to_path_buf();
    let version_file = workspace_root.join("VERSION");
    println!("cargo:rerun-if-changed={}", version_file.display());

    let contents = fs::read_to_string(&version_file).expect("read VERSION file");
    let version = contents.trim();
    let parts: Vec<&str> = version.split('.').collect();
    assert!(
        parts.len() == 3 && parts.iter().all(|part| part.parse::<u32>().is_ok()),
        "VERSION must be MAJOR.MINOR.PATCH, got {version:?}"
    );

    println!("cargo:rustc-env=LEGAL_CLARIFY_VERSION={version}");
}
