//! Scanner module: the concurrent fetch-extract-aggregate pipeline
//!
//! This module contains:
//! - HTTP fetching with a fixed timeout and fixed request headers
//! - Match extraction from response headers and/or body
//! - The shared deduplicating result set
//! - The URL queue and the worker pool that drains it

mod extractor;
mod fetcher;
mod pool;
mod queue;
mod sink;

pub use extractor::{extract, extract_from_body, extract_from_headers};
pub use fetcher::{build_http_client, fetch_url, ResponseView};
pub use pool::{ScanReport, WorkerPool};
pub use queue::UrlQueue;
pub use sink::ResultSink;

use crate::config::ScanSettings;
use crate::HostsiftError;

/// Runs a complete scan with no progress bar and no cancellation
///
/// # Arguments
///
/// * `urls` - URLs to fetch
/// * `settings` - Resolved scan settings
///
/// # Returns
///
/// * `Ok(ScanReport)` - Every URL was attempted
/// * `Err(HostsiftError)` - The pool could not be set up
pub async fn run_scan<I>(urls: I, settings: ScanSettings) -> Result<ScanReport, HostsiftError>
where
    I: IntoIterator<Item = String>,
{
    WorkerPool::new(settings)?.run(urls).await
}
