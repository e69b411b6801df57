use crate::config::types::{
    FileConfig, ScanMode, ScanOverrides, ScanSettings, DEFAULT_ACCEPT, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT, DEFAULT_WORKERS,
};
use crate::pattern::validate_target_domain;
use crate::ConfigError;
use std::time::Duration;

/// Merges command-line overrides over an optional file config and validates
/// the result
///
/// # Arguments
///
/// * `file` - Parsed TOML configuration, if one was given
/// * `overrides` - Values from the command line
///
/// # Returns
///
/// * `Ok(ScanSettings)` - Settings ready for the scanner
/// * `Err(ConfigError)` - A required value is missing or a value is invalid
pub fn resolve_settings(
    file: Option<&FileConfig>,
    overrides: ScanOverrides,
) -> Result<ScanSettings, ConfigError> {
    let defaults = FileConfig::default();
    let file = file.unwrap_or(&defaults);

    let domain = overrides
        .domain
        .or_else(|| file.scan.domain.clone())
        .ok_or_else(|| ConfigError::Validation("target domain is required".to_string()))?;
    validate_target_domain(&domain)?;

    let mode = match overrides.mode.as_deref().or(file.scan.mode.as_deref()) {
        Some(selector) => selector.parse::<ScanMode>()?,
        None => ScanMode::default(),
    };

    let workers = overrides
        .workers
        .or(file.scan.workers)
        .unwrap_or(DEFAULT_WORKERS);
    validate_workers(workers)?;

    let timeout_secs = overrides
        .timeout_secs
        .or(file.scan.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    validate_timeout(timeout_secs)?;

    let user_agent = overrides
        .user_agent
        .or_else(|| file.http.user_agent.clone())
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
    validate_header_value("user-agent", &user_agent)?;

    let accept = file
        .http
        .accept
        .clone()
        .unwrap_or_else(|| DEFAULT_ACCEPT.to_string());
    validate_header_value("accept", &accept)?;

    Ok(ScanSettings {
        domain,
        mode,
        workers,
        timeout: Duration::from_secs(timeout_secs),
        ignore_case: overrides.ignore_case || file.scan.ignore_case.unwrap_or(false),
        success_only: overrides.success_only || file.scan.success_only.unwrap_or(false),
        user_agent,
        accept,
    })
}

/// Validates the worker count
fn validate_workers(workers: usize) -> Result<(), ConfigError> {
    if workers < 1 {
        return Err(ConfigError::Validation(format!(
            "workers must be >= 1, got {}",
            workers
        )));
    }
    Ok(())
}

/// Validates the per-request timeout
fn validate_timeout(timeout_secs: u64) -> Result<(), ConfigError> {
    if timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout must be >= 1s, got {}s",
            timeout_secs
        )));
    }
    Ok(())
}

/// Validates a fixed request header value
fn validate_header_value(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
    }

    if value.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "{} contains control characters",
            name
        )));
    }

    Ok(())
}
