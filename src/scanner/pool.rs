//! Worker pool - fetch, extract and merge orchestration
//!
//! The pool owns everything a run shares: the URL queue, the result set,
//! the progress counter, the run tracker and the cancellation token.
//! Workers only ever see them through an `Arc` handed over at spawn time.

use crate::config::{ScanMode, ScanSettings};
use crate::pattern::SubdomainMatcher;
use crate::scanner::extractor::extract;
use crate::scanner::fetcher::{build_http_client, fetch_url};
use crate::scanner::queue::UrlQueue;
use crate::scanner::sink::ResultSink;
use crate::state::{RunState, RunTracker, UrlOutcome};
use crate::{ConfigError, HostsiftError};
use indicatif::ProgressBar;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Outcome of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Deduplicated matches across every URL
    pub matches: HashSet<String>,

    /// Number of URLs queued
    pub total: usize,

    /// URLs taken from the queue, whatever their outcome
    pub attempted: usize,

    /// URLs whose response was scanned
    pub fetched: usize,

    /// URLs whose response was received but not scanned
    pub skipped: usize,

    /// URLs whose request failed
    pub failed: usize,

    /// True if the run stopped early on cancellation
    pub cancelled: bool,
}

impl ScanReport {
    /// Matches in lexicographic order
    pub fn sorted_matches(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.matches.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }
}

/// Per-outcome tallies, updated without touching the result set lock
#[derive(Debug, Default)]
struct OutcomeCounters {
    fetched: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
}

/// State shared by every worker in one run
struct WorkerContext {
    client: Client,
    matcher: Arc<SubdomainMatcher>,
    mode: ScanMode,
    success_only: bool,
    queue: UrlQueue,
    sink: ResultSink,
    outcomes: OutcomeCounters,
    attempted: Arc<AtomicUsize>,
    progress: ProgressBar,
    cancel: CancellationToken,
}

impl WorkerContext {
    /// Records one finished URL; the progress tick is always the last step
    fn record(&self, outcome: UrlOutcome) {
        let counter = match outcome {
            UrlOutcome::Fetched => &self.outcomes.fetched,
            UrlOutcome::Skipped => &self.outcomes.skipped,
            UrlOutcome::Failed => &self.outcomes.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        self.attempted.fetch_add(1, Ordering::Relaxed);
        self.progress.inc(1);
    }
}

/// Fixed-size pool of workers draining a URL queue
///
/// # Example
///
/// ```no_run
/// use hostsift::config::ScanSettings;
/// use hostsift::scanner::WorkerPool;
///
/// # async fn demo() -> hostsift::Result<()> {
/// let pool = WorkerPool::new(ScanSettings::for_domain("example.com"))?;
/// let report = pool.run(vec!["https://www.example.com/".to_string()]).await?;
/// for host in report.sorted_matches() {
///     println!("{}", host);
/// }
/// # Ok(())
/// # }
/// ```
pub struct WorkerPool {
    settings: ScanSettings,
    client: Client,
    matcher: Arc<SubdomainMatcher>,
    attempted: Arc<AtomicUsize>,
    progress: ProgressBar,
    cancel: CancellationToken,
    tracker: RunTracker,
}

impl WorkerPool {
    /// Creates a pool for the given settings
    ///
    /// Builds the matcher and HTTP client up front, so configuration
    /// problems surface before any request is made.
    pub fn new(settings: ScanSettings) -> Result<Self, HostsiftError> {
        if settings.workers < 1 {
            return Err(ConfigError::Validation(format!(
                "workers must be >= 1, got {}",
                settings.workers
            ))
            .into());
        }

        let matcher = SubdomainMatcher::with_case(&settings.domain, settings.ignore_case)?;
        let client = build_http_client(&settings)?;

        Ok(Self {
            settings,
            client,
            matcher: Arc::new(matcher),
            attempted: Arc::new(AtomicUsize::new(0)),
            progress: ProgressBar::hidden(),
            cancel: CancellationToken::new(),
            tracker: RunTracker::new(),
        })
    }

    /// Advances `bar` once per attempted URL; its length is set to the URL count
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = bar;
        self
    }

    /// Stops handing out URLs once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Live count of attempted URLs
    pub fn progress_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.attempted)
    }

    /// Handle on the run's lifecycle, valid after `run` consumes the pool
    pub fn run_tracker(&self) -> RunTracker {
        self.tracker.clone()
    }

    /// Runs every URL through fetch, extract and merge
    ///
    /// Returns only after every worker has finished. A URL that fails is
    /// logged and skipped; it never stops the run.
    pub async fn run<I>(self, urls: I) -> Result<ScanReport, HostsiftError>
    where
        I: IntoIterator<Item = String>,
    {
        let start_time = Instant::now();

        self.tracker.advance(RunState::Filling)?;
        let urls: Vec<String> = urls.into_iter().collect();
        let total = urls.len();
        let queue = UrlQueue::with_capacity(total);
        for url in urls {
            queue.push(url);
        }
        queue.close();
        self.progress.set_length(total as u64);

        self.tracker.advance(RunState::Draining)?;
        let workers = self.settings.workers;
        tracing::info!(
            "Scanning {} URLs for *.{} with {} workers (mode: {})",
            total,
            self.settings.domain,
            workers,
            self.settings.mode
        );

        let ctx = Arc::new(WorkerContext {
            client: self.client.clone(),
            matcher: Arc::clone(&self.matcher),
            mode: self.settings.mode,
            success_only: self.settings.success_only,
            queue,
            sink: ResultSink::new(),
            outcomes: OutcomeCounters::default(),
            attempted: Arc::clone(&self.attempted),
            progress: self.progress.clone(),
            cancel: self.cancel.clone(),
        });

        let mut handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let ctx = Arc::clone(&ctx);
            handles.push(tokio::spawn(async move {
                worker_loop(worker_id, &ctx).await;
            }));
        }

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("Worker task failed: {}", e);
            }
        }

        self.tracker.advance(RunState::Done)?;

        let attempted = self.attempted.load(Ordering::Relaxed);
        let report = ScanReport {
            matches: ctx.sink.snapshot(),
            total,
            attempted,
            fetched: ctx.outcomes.fetched.load(Ordering::Relaxed),
            skipped: ctx.outcomes.skipped.load(Ordering::Relaxed),
            failed: ctx.outcomes.failed.load(Ordering::Relaxed),
            cancelled: self.cancel.is_cancelled() && attempted < total,
        };

        tracing::info!(
            "Scan finished in {:?}: {}/{} URLs attempted, {} failed, {} unique matches",
            start_time.elapsed(),
            report.attempted,
            report.total,
            report.failed,
            report.matches.len()
        );

        Ok(report)
    }
}

/// Pulls URLs until the queue is exhausted or the run is cancelled
async fn worker_loop(worker_id: usize, ctx: &WorkerContext) {
    loop {
        if ctx.cancel.is_cancelled() {
            tracing::debug!("Worker {} stopping: scan cancelled", worker_id);
            break;
        }

        let Some(url) = ctx.queue.pop() else {
            break;
        };

        let outcome = process_url(ctx, &url).await;
        tracing::trace!("Worker {} {}: {}", worker_id, outcome, url);
        ctx.record(outcome);
    }
}

/// Fetches one URL and merges whatever it yields
async fn process_url(ctx: &WorkerContext, url: &str) -> UrlOutcome {
    tracing::debug!("Processing: {}", url);

    let response = match fetch_url(&ctx.client, url).await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("Failed to fetch {}: {}", url, e);
            return UrlOutcome::Failed;
        }
    };

    if ctx.success_only && !response.is_success() {
        tracing::debug!("Skipping {}: status {}", url, response.status);
        return UrlOutcome::Skipped;
    }

    let status = response.status;
    let mode = ctx.mode;
    let matcher = Arc::clone(&ctx.matcher);
    // Regex scanning is CPU-bound and runs on the blocking pool
    let scanned = tokio::task::spawn_blocking(move || extract(&response, mode, &matcher)).await;
    let found = match scanned {
        Ok(found) => found,
        Err(e) => {
            tracing::error!("Extraction task failed for {}: {}", url, e);
            return UrlOutcome::Failed;
        }
    };

    let found_count = found.len();
    let added = ctx.sink.merge(found);
    tracing::debug!(
        "Fetched {} ({}): {} matches, {} new",
        url,
        status,
        found_count,
        added
    );

    UrlOutcome::Fetched
}
