//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scanner, including:
//! - Building the shared HTTP client with fixed request headers
//! - Issuing a single GET per URL under the configured timeout
//! - Reading the body to completion before the response is released
//! - Classifying request failures

use crate::config::ScanSettings;
use crate::{ConfigError, FetchError, HostsiftError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use url::Url;

/// Everything the extractor needs from one response
///
/// The body has already been read in full; a failed read is kept as an
/// error message so header extraction can still go ahead.
#[derive(Debug)]
pub struct ResponseView {
    /// Final URL after redirects
    pub url: String,
    /// HTTP status code (never checked by the fetcher itself)
    pub status: u16,
    /// All response headers, including repeated names
    pub headers: HeaderMap,
    /// Body text, or the reason it could not be read
    pub body: Result<String, String>,
}

impl ResponseView {
    /// Returns true for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Builds an HTTP client with the configured headers and timeout
///
/// # Arguments
///
/// * `settings` - The resolved scan settings
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(HostsiftError)` - A header value was invalid or the client failed to build
///
/// # Example
///
/// ```no_run
/// use hostsift::config::ScanSettings;
/// use hostsift::scanner::build_http_client;
///
/// let settings = ScanSettings::for_domain("example.com");
/// let client = build_http_client(&settings).unwrap();
/// ```
pub fn build_http_client(settings: &ScanSettings) -> Result<Client, HostsiftError> {
    let mut headers = HeaderMap::new();
    let accept = HeaderValue::from_str(&settings.accept)
        .map_err(|e| ConfigError::Validation(format!("Invalid accept header: {}", e)))?;
    headers.insert(ACCEPT, accept);

    let client = Client::builder()
        .user_agent(settings.user_agent.as_str())
        .default_headers(headers)
        .timeout(settings.timeout)
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches a URL and reads its body to completion
///
/// Any response that arrives is returned, whatever its status code. Only a
/// request that cannot be built or sent is an error.
///
/// | Condition | Result |
/// |-----------|--------|
/// | Malformed URL / unsupported scheme | `FetchError::RequestBuild` |
/// | Timeout before headers | `FetchError::Timeout` |
/// | Connection refused, DNS, TLS | `FetchError::Connect` |
/// | Other transport failure | `FetchError::Transport` |
/// | Body read fails | `Ok` with `body: Err(..)` |
pub async fn fetch_url(client: &Client, url: &str) -> Result<ResponseView, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::RequestBuild {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status().as_u16();
    let final_url = response.url().to_string();
    let headers = response.headers().clone();

    // Consumes the response, so the connection is released either way
    let body = match response.bytes().await {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => Err(e.to_string()),
    };

    Ok(ResponseView {
        url: final_url,
        status,
        headers,
        body,
    })
}

/// Maps a reqwest send error onto a fetch failure
fn classify_error(url: &str, e: reqwest::Error) -> FetchError {
    let url = url.to_string();
    if e.is_builder() {
        FetchError::RequestBuild {
            url,
            reason: e.to_string(),
        }
    } else if e.is_timeout() {
        FetchError::Timeout { url }
    } else if e.is_connect() {
        FetchError::Connect { url, source: e }
    } else {
        FetchError::Transport { url, source: e }
    }
}
