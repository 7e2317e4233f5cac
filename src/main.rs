// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap (usage errors exit with 2)
// 2. Set up logging on stderr
// 3. Open the input (file argument, or piped stdin)
// 4. Run the engine: fetch every URL with at most N workers, count the word
// 5. Print the total and exit (0 = done, 1 = runtime error)
//
// A URL that cannot be fetched is NOT a runtime error: it is reported on its
// own line and contributes zero. Only problems that stop the run from
// starting (unreadable input, HTTP client setup) exit with 1.
// =============================================================================

mod cli;
mod config;
mod engine;
mod error;
mod fetch;
mod input;
mod logging;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::Config;
use engine::Engine;
use fetch::HttpFetcher;
use report::{Console, Report, Silent};
use std::sync::Arc;

// The default #[tokio::main] runtime is multi-threaded, so workers run in
// parallel, not just interleaved on one thread.
#[tokio::main]
async fn main() {
    // On a usage error this prints the message and exits with code 2.
    // --help and --version exit with 0.
    let cli = Cli::try_parse().unwrap_or_else(|e| e.exit());

    logging::init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Runtime error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_cli(&cli).context("invalid arguments")?;

    // Open the input before anything else: if it fails, no worker is spawned.
    let input = input::open_input(cli.file.as_deref()).await?;

    let fetcher = HttpFetcher::new().context("failed to build HTTP client")?;

    let report: Arc<dyn Report> = if cli.json {
        Arc::new(Silent)
    } else {
        Arc::new(Console)
    };

    if !cli.json && !config.case_sensitive() {
        // Show the folded word so it is obvious what is being matched
        println!("{}", config.word());
    }

    let engine = Engine::new(config, Arc::new(fetcher), report).keep_reports(cli.json);
    let summary = engine.run(input).await;

    tracing::info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        peak_pending = summary.peak_pending,
        "run finished"
    );

    report::print_summary(&summary, cli.json)
}
