//! Configuration module for Hostsift
//!
//! Settings come from three layers, highest precedence first: command-line
//! overrides, an optional TOML file, and built-in defaults. The merged result
//! is validated into a [`ScanSettings`] before any request is made.
//!
//! # Example
//!
//! ```no_run
//! use hostsift::config::{load_config, resolve_settings, ScanOverrides};
//! use std::path::Path;
//!
//! let file = load_config(Path::new("hostsift.toml")).unwrap();
//! let settings = resolve_settings(Some(&file), ScanOverrides::default()).unwrap();
//! println!("Scanning for *.{} with {} workers", settings.domain, settings.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    FileConfig, HttpSection, ScanMode, ScanOverrides, ScanSection, ScanSettings,
    DEFAULT_ACCEPT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, DEFAULT_WORKERS,
};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::resolve_settings;
