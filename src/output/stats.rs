//! Run statistics derived from a finished scan

use crate::scanner::ScanReport;

/// Summary numbers for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStatistics {
    /// URLs queued
    pub total: usize,

    /// URLs attempted
    pub attempted: usize,

    /// URLs whose response was scanned
    pub fetched: usize,

    /// URLs whose response was skipped
    pub skipped: usize,

    /// URLs whose request failed
    pub failed: usize,

    /// Distinct matches found
    pub unique_matches: usize,

    /// Run stopped early
    pub cancelled: bool,
}

impl ScanStatistics {
    pub fn from_report(report: &ScanReport) -> Self {
        Self {
            total: report.total,
            attempted: report.attempted,
            fetched: report.fetched,
            skipped: report.skipped,
            failed: report.failed,
            unique_matches: report.matches.len(),
            cancelled: report.cancelled,
        }
    }

    /// Fetched URLs as a percentage of attempted URLs
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        (self.fetched as f64 / self.attempted as f64) * 100.0
    }
}

/// Logs run statistics at info level
pub fn log_statistics(stats: &ScanStatistics) {
    tracing::info!(
        "URLs: {} total, {} attempted, {} fetched, {} skipped, {} failed ({:.1}% success)",
        stats.total,
        stats.attempted,
        stats.fetched,
        stats.skipped,
        stats.failed,
        stats.success_rate()
    );
    tracing::info!("Unique matches: {}", stats.unique_matches);

    if stats.cancelled {
        tracing::warn!(
            "Scan was cancelled; {} URLs were never attempted",
            stats.total - stats.attempted
        );
    }
}
