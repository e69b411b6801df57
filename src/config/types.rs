use crate::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default number of concurrent workers
pub const DEFAULT_WORKERS: usize = 10;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// User-Agent sent with every request unless overridden
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/95.0.4638.69 Safari/537.36";

/// Accept header sent with every request unless overridden
pub const DEFAULT_ACCEPT: &str = "*/*";

/// Which parts of a response are scanned for matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanMode {
    /// Response body only (`rb`)
    Body,
    /// Response header values only (`rh`)
    Headers,
    /// Both headers and body (`both`)
    #[default]
    Both,
}

impl ScanMode {
    /// Returns true if header values should be scanned
    pub fn scans_headers(&self) -> bool {
        matches!(self, Self::Headers | Self::Both)
    }

    /// Returns true if the body should be scanned
    pub fn scans_body(&self) -> bool {
        matches!(self, Self::Body | Self::Both)
    }

    /// The selector string used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Body => "rb",
            Self::Headers => "rh",
            Self::Both => "both",
        }
    }
}

impl FromStr for ScanMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rb" => Ok(Self::Body),
            "rh" => Ok(Self::Headers),
            "both" => Ok(Self::Both),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// On-disk TOML configuration
///
/// Every key is optional; anything left out falls back to the command line
/// or the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub scan: ScanSection,
    #[serde(default)]
    pub http: HttpSection,
}

/// `[scan]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanSection {
    /// Target domain (e.g., "example.com")
    pub domain: Option<String>,

    /// Mode selector: "rb", "rh", or "both"
    pub mode: Option<String>,

    /// Number of concurrent workers
    pub workers: Option<usize>,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    /// Match hostnames case-insensitively
    #[serde(rename = "ignore-case")]
    pub ignore_case: Option<bool>,

    /// Only scan responses with a 2xx status
    #[serde(rename = "success-only")]
    pub success_only: Option<bool>,
}

/// `[http]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    /// User-Agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: Option<String>,

    /// Accept header value
    pub accept: Option<String>,
}

/// Values supplied on the command line
///
/// `None` means "not given", so the file or default value applies.
#[derive(Debug, Clone, Default)]
pub struct ScanOverrides {
    pub domain: Option<String>,
    pub mode: Option<String>,
    pub workers: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub ignore_case: bool,
    pub success_only: bool,
    pub user_agent: Option<String>,
}

/// Fully resolved and validated settings consumed by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    /// Target domain, matched literally
    pub domain: String,

    /// Which response surfaces to scan
    pub mode: ScanMode,

    /// Number of concurrent workers (at least 1)
    pub workers: usize,

    /// Per-request timeout
    pub timeout: Duration,

    /// Case-insensitive matching
    pub ignore_case: bool,

    /// Skip scanning of non-2xx responses
    pub success_only: bool,

    /// User-Agent header value
    pub user_agent: String,

    /// Accept header value
    pub accept: String,
}

impl ScanSettings {
    /// Settings for `domain` with every other value at its default
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            mode: ScanMode::default(),
            workers: DEFAULT_WORKERS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            ignore_case: false,
            success_only: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
        }
    }
}
