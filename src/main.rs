// src/main.rs
// =============================================================================
// Entry point of the CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up tracing (diagnostics go to stderr, the report to stdout)
// 3. Validate the configuration and run the pipeline
// 4. Print the summary and exit (0 = all good, 1 = broken links, 2 = error)
// =============================================================================

mod checker;       // src/checker/ - extraction, classification, dedup, HTTP checks
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - explicit run configuration
mod error;         // src/error.rs - per-URL failure taxonomy
mod output;        // src/output.rs - summary banner
mod pipeline;      // src/pipeline.rs - stage orchestration
mod progress;      // src/progress.rs - progress callbacks
mod report;        // src/report.rs - broken-link aggregation
mod scan;          // src/scan/ - markdown discovery

#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links found
//   Err   = the run could not happen (bad config, unreadable root)
async fn run(cli: Cli) -> Result<i32> {
    let progress: &dyn progress::Progress = if cli.quiet {
        &progress::Silent
    } else {
        &progress::Console
    };
    let config = cli.into_config();
    config.validate()?;

    let summary = pipeline::run_pipeline(&config, progress).await?;
    output::print_summary(&summary);

    Ok(summary.exit_code())
}

// RUST_LOG wins over -v when it is set
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
