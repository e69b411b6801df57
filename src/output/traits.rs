//! Result writer trait

use crate::HostsiftError;

/// Destination for the final match list
///
/// Implementations write one match per line, newline-terminated, in the
/// order given.
pub trait ResultWriter {
    /// Writes every match
    ///
    /// # Arguments
    ///
    /// * `matches` - The matches to write
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Every line was written and flushed
    /// * `Err(HostsiftError::SinkWrite)` - The destination could not be written
    fn write_matches(&mut self, matches: &[&str]) -> Result<(), HostsiftError>;

    /// Human-readable name of the destination, for log lines
    fn destination(&self) -> String;
}
