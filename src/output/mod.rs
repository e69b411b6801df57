//! Output module for delivering scan results
//!
//! This module handles:
//! - Writing the final match list to stdout or a file
//! - Summarising a finished run

pub mod stats;
mod traits;
mod writer;

pub use stats::{log_statistics, ScanStatistics};
pub use traits::ResultWriter;
pub use writer::{write_results, FileWriter, StdoutWriter};
