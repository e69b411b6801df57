//! Hostsift main entry point
//!
//! This is the command-line interface for the Hostsift subdomain scanner.

use clap::Parser;
use hostsift::config::{load_config, resolve_settings, ScanOverrides};
use hostsift::input::load_urls;
use hostsift::output::{log_statistics, write_results, ScanStatistics};
use hostsift::scanner::WorkerPool;
use hostsift::HostsiftError;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Hostsift: find subdomains referenced in live HTTP responses
///
/// Hostsift fetches every URL in a list, scans response headers and/or
/// bodies for hostnames ending in the target domain, and prints the
/// deduplicated matches.
#[derive(Parser, Debug)]
#[command(name = "hostsift")]
#[command(version)]
#[command(about = "Find subdomains referenced in live HTTP responses", long_about = None)]
struct Cli {
    /// Domain to filter subdomains (e.g., example.com)
    #[arg(short, long)]
    domain: Option<String>,

    /// File containing URLs to process, one per line
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    urls_file: PathBuf,

    /// File to save extracted subdomains (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Number of concurrent workers [default: 10]
    #[arg(short, long)]
    workers: Option<usize>,

    /// Mode: 'rb' (response body), 'rh' (response headers), or 'both' [default: both]
    #[arg(short, long)]
    mode: Option<String>,

    /// Per-request timeout in seconds [default: 10]
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Match subdomains case-insensitively
    #[arg(long)]
    ignore_case: bool,

    /// Only scan responses with a 2xx status
    #[arg(long)]
    success_only: bool,

    /// User-Agent header to send
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v per-URL diagnostics, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output and the progress bar
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Resolve configuration before touching the network
    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            Some(load_config(path).map_err(|e| {
                tracing::error!("Failed to load configuration: {}", e);
                HostsiftError::from(e)
            })?)
        }
        None => None,
    };

    let overrides = ScanOverrides {
        domain: cli.domain.clone(),
        mode: cli.mode.clone(),
        workers: cli.workers,
        timeout_secs: cli.timeout,
        ignore_case: cli.ignore_case,
        success_only: cli.success_only,
        user_agent: cli.user_agent.clone(),
    };
    let settings = resolve_settings(file_config.as_ref(), overrides).map_err(|e| {
        tracing::error!("{}", e);
        HostsiftError::from(e)
    })?;

    let urls = load_urls(&cli.urls_file).map_err(|e| {
        tracing::error!("Failed to read URLs: {}", e);
        e
    })?;
    tracing::info!("Loaded {} URLs from {}", urls.len(), cli.urls_file.display());

    let progress = build_progress_bar(urls.len(), progress_hidden(cli.verbose, cli.quiet));
    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let pool = WorkerPool::new(settings)?
        .with_progress(progress.clone())
        .with_cancellation(cancel);
    let report = pool.run(urls).await?;
    progress.finish_and_clear();

    log_statistics(&ScanStatistics::from_report(&report));

    let matches = report.sorted_matches();
    if let Err(e) = write_results(&matches, cli.output.as_deref()) {
        // Keep the results visible before they are lost with the process
        tracing::error!("{}; dumping {} matches to the log", e, matches.len());
        for m in &matches {
            tracing::warn!("{}", m);
        }
        return Err(e.into());
    }

    if !cli.quiet {
        eprintln!("Extraction complete.");
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hostsift=info,warn"),
            1 => EnvFilter::new("hostsift=debug,info"),
            _ => EnvFilter::new("hostsift=trace,debug"),
        }
    };

    // stdout is reserved for matches
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// The bar redraws over stderr, so it stays off whenever per-URL logs are on
fn progress_hidden(verbose: u8, quiet: bool) -> bool {
    quiet || verbose > 0
}

fn build_progress_bar(total: usize, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total as u64);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        Ok(style) => bar.set_style(style.progress_chars("#>-")),
        Err(e) => tracing::debug!("Falling back to default progress style: {}", e),
    }
    bar
}

/// Cancels the scan on Ctrl-C; URLs already in flight still finish
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing in-flight requests");
            cancel.cancel();
        }
    });
}
