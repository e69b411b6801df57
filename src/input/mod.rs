//! URL list loading

use crate::HostsiftError;
use std::path::Path;

/// Reads a URL list, one URL per line
///
/// Lines are trimmed; blank lines and lines starting with `#` are skipped.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - URLs in file order
/// * `Err(HostsiftError::SourceRead)` - The file could not be read
pub fn load_urls(path: &Path) -> Result<Vec<String>, HostsiftError> {
    let content = std::fs::read_to_string(path).map_err(|source| HostsiftError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_url_list(&content))
}

/// Splits URL list text into URLs
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
