use crate::ConfigError;

/// Validates the target domain a matcher is built from
///
/// The domain is used as a literal suffix, so any character is allowed
/// except whitespace, which can never be part of a match.
///
/// # Examples
///
/// ```
/// use hostsift::pattern::validate_target_domain;
///
/// assert!(validate_target_domain("example.com").is_ok());
/// assert!(validate_target_domain("").is_err());
/// assert!(validate_target_domain("example .com").is_err());
/// ```
pub fn validate_target_domain(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidDomain(
            "target domain cannot be empty".to_string(),
        ));
    }

    if domain.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidDomain(format!(
            "'{}' contains whitespace",
            domain
        )));
    }

    Ok(())
}
