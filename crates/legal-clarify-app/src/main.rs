#![warn(missing_docs)]
//! # legal-clarify binary
//!
//! Headless entry point: runs the upload and analysis pipeline on a logical
//! clock and prints the outcome.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use legal_clarify_app::{AppConfig, SimulationReport, app_version, run_headless_simulation};
use legal_clarify_core::DocumentFile;
use legal_clarify_ui::AnalysisView;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "legal-clarify",
    version = legal_clarify_app::APP_VERSION,
    about = "LegalClarify document analysis shell"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simulate uploading and analyzing documents.
    Simulate {
        /// Document as `name:media_type:size_bytes`; repeatable.
        #[arg(long = "file", required = true, value_parser = parse_document)]
        files: Vec<DocumentFile>,
        /// Seed for the mock analysis provider.
        #[arg(long)]
        seed: Option<u64>,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the application version.
    Version,
}

fn parse_document(raw: &str) -> Result<DocumentFile, String> {
    let mut parts = raw.rsplitn(3, ':');
    let (Some(size), Some(media_type), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected name:media_type:size_bytes, got {raw:?}"));
    };
    let size_bytes = size
        .parse::<u64>()
        .map_err(|error| format!("invalid size {size:?}: {error}"))?;
    Ok(DocumentFile::new(name, media_type, size_bytes))
}

/// CLI entry point.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Version => {
            println!("legal-clarify {}", app_version());
            Ok(())
        }
        Command::Simulate { files, seed, json } => {
            let mut config = AppConfig::from_env().context("loading configuration")?;
            if seed.is_some() {
                config.rng_seed = seed;
            }

            let report = run_headless_simulation(config, files, None)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }

            if report.files.is_empty() {
                bail!("no file was accepted");
            }
            Ok(())
        }
    }
}

fn print_report(report: &SimulationReport) {
    for message in &report.rejected {
        println!("rejected: {message}");
    }
    for file in &report.files {
        println!("{:<32} {:>3}% {}", file.name, file.progress, file.status);
    }
    println!("finished at {} ms", report.finished_at_ms);

    let Some(result) = report.analysis.clone() else {
        return;
    };
    let view = AnalysisView::new(result);
    println!();
    println!(
        "{} | {} | {}",
        view.document_type(),
        view.risk_badge(),
        view.score_text()
    );
    println!("{}", view.executive_summary());
    for tab in legal_clarify_ui::AnalysisTab::ALL {
        let panel = view.panel(tab);
        println!();
        println!("{} ({})", panel.heading, panel.count);
        for item in panel.items {
            println!("  {}. {}", item.number, item.text);
        }
    }
}
