use std::fmt;

/// What happened to one URL taken from the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlOutcome {
    /// Response received and scanned
    Fetched,

    /// Response received but not scanned (non-2xx with success-only set)
    Skipped,

    /// Request could not be built or sent
    Failed,
}

impl UrlOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetched => "fetched",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for UrlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(UrlOutcome::Fetched.to_string(), "fetched");
        assert_eq!(UrlOutcome::Skipped.to_string(), "skipped");
        assert_eq!(UrlOutcome::Failed.to_string(), "failed");
    }
}
