//! Pattern module for Hostsift
//!
//! This module builds the subdomain matcher for a target domain and checks
//! that the target domain is usable before anything is compiled.

mod domain;
mod matcher;

pub use domain::validate_target_domain;
pub use matcher::SubdomainMatcher;
