//! Error types for the feed clients.

use thiserror::Error;

/// Errors that can occur while fetching one of the upstream feeds.
///
/// The refresh orchestrator only distinguishes two classes: network failures
/// (upstream unreachable or timed out) and payload-shape failures. The
/// [`is_network`](Self::is_network) classifier makes that split explicit.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The upstream endpoint could not be reached, timed out, or returned a
    /// transport-level failure.
    #[error("Feed network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The upstream responded, but the payload was not shaped as expected.
    #[error("Invalid feed payload: {0}")]
    InvalidFormat(String),
}

impl FeedError {
    /// True for failures where the upstream was unreachable or unresponsive.
    ///
    /// A non-success HTTP status and a timeout both land here: from the
    /// pipeline's point of view the source was unavailable either way.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_format_is_not_network() {
        let err = FeedError::InvalidFormat("expected a JSON array".to_string());
        assert!(!err.is_network());
    }

    #[test]
    fn error_display() {
        let err = FeedError::InvalidFormat("rates is not an object".to_string());
        assert_eq!(
            format!("{}", err),
            "Invalid feed payload: rates is not an object"
        );
    }
}
