use crate::pattern::validate_target_domain;
use crate::ConfigError;
use regex::{Regex, RegexBuilder};

/// Finds hostnames that end in a target domain
///
/// A match is one or more `label.` segments, where a label is made of ASCII
/// letters, digits and hyphens, followed immediately by the literal target
/// domain. The target domain is escaped, so characters such as `.` or `+`
/// in it only ever match themselves.
///
/// Case folding is ASCII-only for labels and for ASCII target domains, so
/// characters like the Kelvin sign (U+212A) never stand in for `k`.
///
/// The matcher holds no mutable state and can be shared freely between
/// workers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SubdomainMatcher {
    regex: Regex,
}

impl SubdomainMatcher {
    /// Builds a case-sensitive matcher for `domain`
    ///
    /// # Examples
    ///
    /// ```
    /// use hostsift::pattern::SubdomainMatcher;
    ///
    /// let matcher = SubdomainMatcher::new("example.com").unwrap();
    /// assert_eq!(
    ///     matcher.find_all("see https://api.example.com/v1"),
    ///     vec!["api.example.com"]
    /// );
    /// assert!(matcher.find_all("example.com").is_empty());
    /// ```
    pub fn new(domain: &str) -> Result<Self, ConfigError> {
        Self::with_case(domain, false)
    }

    /// Builds a matcher, optionally ignoring case
    pub fn with_case(domain: &str, ignore_case: bool) -> Result<Self, ConfigError> {
        validate_target_domain(domain)?;

        let regex = RegexBuilder::new(&build_pattern(domain))
            .case_insensitive(ignore_case)
            .build()
            .map_err(|e| ConfigError::InvalidDomain(format!("{}: {}", domain, e)))?;

        Ok(Self { regex })
    }

    /// Returns every non-overlapping match in `text`, left to right
    ///
    /// Matches keep their original casing.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.find_iter(text).collect()
    }

    /// Lazily iterates over matches in `text`
    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> impl Iterator<Item = &'t str> + 'r
    where
        't: 'r,
    {
        self.regex.find_iter(text).map(|m| m.as_str())
    }
}

// Non-ASCII literals are rejected outside Unicode mode, so only an ASCII
// domain goes inside the `(?-u:...)` group.
fn build_pattern(domain: &str) -> String {
    let escaped = regex::escape(domain);
    if domain.is_ascii() {
        format!(r"(?-u:([a-zA-Z0-9-]+\.)+{})", escaped)
    } else {
        format!(r"(?-u:([a-zA-Z0-9-]+\.)+){}", escaped)
    }
}
