//! Match extraction from fetched responses

use crate::config::ScanMode;
use crate::pattern::SubdomainMatcher;
use crate::scanner::fetcher::ResponseView;
use reqwest::header::HeaderMap;
use std::collections::HashSet;

/// Extracts the distinct matches from one response
///
/// Header values are scanned one at a time; the body is scanned as a
/// single string. A body that failed to read contributes nothing.
pub fn extract(
    response: &ResponseView,
    mode: ScanMode,
    matcher: &SubdomainMatcher,
) -> HashSet<String> {
    let mut found = HashSet::new();

    if mode.scans_headers() {
        found.extend(extract_from_headers(&response.headers, matcher));
    }

    if mode.scans_body() {
        match &response.body {
            Ok(body) => found.extend(extract_from_body(body, matcher)),
            Err(e) => tracing::debug!("Body read failed for {}: {}", response.url, e),
        }
    }

    found
}

/// Scans every value of every header independently
pub fn extract_from_headers(headers: &HeaderMap, matcher: &SubdomainMatcher) -> HashSet<String> {
    let mut found = HashSet::new();
    // `iter` yields one entry per value, so repeated headers are all visited
    for (_name, value) in headers.iter() {
        let value = String::from_utf8_lossy(value.as_bytes());
        found.extend(matcher.find_iter(&value).map(str::to_string));
    }
    found
}

/// Scans the whole body as one string
pub fn extract_from_body(body: &str, matcher: &SubdomainMatcher) -> HashSet<String> {
    matcher.find_iter(body).map(str::to_string).collect()
}
