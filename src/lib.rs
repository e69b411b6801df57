//! Hostsift: subdomain discovery from live HTTP traffic
//!
//! This crate fetches a list of URLs concurrently, scans response headers
//! and/or bodies for hostnames ending in a target domain, and collects the
//! deduplicated set of matches.

pub mod config;
pub mod input;
pub mod output;
pub mod pattern;
pub mod scanner;
pub mod state;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Hostsift operations
#[derive(Debug, Error)]
pub enum HostsiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read URL list {}: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write results to {}: {source}", .path.display())]
    SinkWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid run transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::RunState,
        to: state::RunState,
    },
}

/// Configuration-specific errors
///
/// All of these are raised before any request is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid mode '{0}': use 'rb', 'rh', or 'both'")]
    InvalidMode(String),

    #[error("Invalid target domain: {0}")]
    InvalidDomain(String),
}

/// Per-URL fetch failures
///
/// These never abort a run; the worker that hits one logs it and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build request for {url}: {reason}")]
    RequestBuild { url: String, reason: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {source}")]
    Connect { url: String, source: reqwest::Error },

    #[error("Transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },
}

impl FetchError {
    /// The URL that failed
    pub fn url(&self) -> &str {
        match self {
            Self::RequestBuild { url, .. }
            | Self::Timeout { url }
            | Self::Connect { url, .. }
            | Self::Transport { url, .. } => url,
        }
    }
}

/// Result type alias for Hostsift operations
pub type Result<T> = std::result::Result<T, HostsiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{ScanMode, ScanSettings};
pub use pattern::SubdomainMatcher;
pub use scanner::{run_scan, ScanReport, WorkerPool};
pub use state::{RunState, RunTracker};
