//! BBB Studio - report renderer for BBB permeability model metrics
//!
//! CLI entry point.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use bbb_studio::cli::render_diagnostic_report;
use bbb_studio::config::StudioConfig;
use bbb_studio::doctor::{diagnose_file, DiagnosticReport};
use bbb_studio::log::{init_tracing, RenderEntry, RenderHistory};
use bbb_studio::report::{render, ReportInput};
use bbb_studio::surface::Surface;

/// Report renderer for BBB permeability model metrics
///
/// Renders the Tab 4 evaluation metrics and the manuscript narrative from
/// built-in values or a precomputed results file.
#[derive(Parser, Debug)]
#[command(name = "bbb-studio", version, about)]
struct Cli {
    /// Path to a studio.toml configuration file (built-in page if omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the report once and print it to stdout
    Render {
        /// Results JSON file (overrides [results] path)
        #[arg(long)]
        results: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Surface::Terminal)]
        format: Surface,

        /// Append a line to <DIR>/renders.jsonl after rendering
        #[arg(long)]
        history_dir: Option<PathBuf>,
    },
    /// Check a results file for problems that would degrade the page
    Check {
        /// Results JSON file (overrides [results] path)
        #[arg(long)]
        results: Option<PathBuf>,
    },
    /// Serve the report over HTTP, rendering on every request
    Serve {
        /// Results JSON file (overrides [results] path)
        #[arg(long)]
        results: Option<PathBuf>,

        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8501")]
        addr: SocketAddr,
    },
}

/// Results file the check command should inspect.
fn results_to_check(config: &StudioConfig) -> Result<&Path> {
    config.results.path.as_deref().context(
        "No results file to check: pass --results or set [results] path in studio.toml",
    )
}

/// Exit status for a check: 1 if anything would degrade the page.
fn check_exit_code(report: &DiagnosticReport) -> i32 {
    i32::from(report.error_count() > 0)
}

fn run_render(config: &StudioConfig, format: Surface, history_dir: Option<&Path>) -> Result<()> {
    let input = ReportInput::resolve(config);
    let doc = render(config, &input).context("Failed to render report")?;
    let output = format
        .render(&doc)
        .with_context(|| format!("Failed to render {} output", format.name()))?;
    print!("{output}");

    if let Some(dir) = history_dir {
        let history = RenderHistory::new(dir).context("Failed to open render history")?;
        history
            .append(&RenderEntry::new(format, &input, &doc))
            .context("Failed to write render history")?;
    }

    Ok(())
}

fn run_check(config: &StudioConfig) -> Result<i32> {
    let path = results_to_check(config)?;
    let report = diagnose_file(config, path);
    print!(
        "{}",
        render_diagnostic_report(&path.display().to_string(), &report)
    );
    Ok(check_exit_code(&report))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config =
        StudioConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Render {
            results,
            format,
            history_dir,
        } => {
            let config = config.with_results_path(results);
            run_render(&config, format, history_dir.as_deref())
        }
        Command::Check { results } => {
            let config = config.with_results_path(results);
            let code = run_check(&config)?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Command::Serve { results, addr } => {
            let config = config.with_results_path(results);
            info!(
                results = %config
                    .results
                    .path
                    .as_deref()
                    .map_or_else(|| "manuscript values".to_string(), |p| p.display().to_string()),
                "starting report server"
            );
            bbb_studio::server::serve(config, addr).await
        }
    }
}
