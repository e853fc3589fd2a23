//! Unified error types for reelscore.
//!
//! Display strings carry an upper-snake code prefix so log lines can be
//! grepped by failure class.

/// Unified error types for the scrape pipeline and dataset I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., an empty title).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// A URL could not be built or joined.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("CLIENT_BUILD: {0}")]
    ClientBuild(String),

    /// The server answered with a non-success status.
    #[error("FETCH_FAILED: failed to fetch HTML from {url}: {reason}")]
    Fetch { url: String, status: u16, reason: String },

    /// The request never produced a response (DNS, TLS, connection reset, timeout).
    #[error("NETWORK_ERROR: {url}: {message}")]
    Network { url: String, message: String },

    /// A detail page was missing a field the source cannot do without.
    #[error("EXTRACT_FAILED: {0}")]
    ExtractFailed(String),

    /// Serializing records to JSON failed.
    #[error("DATASET_ENCODE: {0}")]
    DatasetEncode(String),

    /// Writing the dataset file failed.
    #[error("DATASET_WRITE: {0}")]
    DatasetWrite(String),

    /// Reading the dataset file failed.
    #[error("DATASET_READ: {0}")]
    DatasetRead(String),

    /// The dataset file is not a JSON array of objects.
    #[error("DATASET_PARSE: {0}")]
    DatasetParse(String),
}

impl Error {
    /// HTTP status code for fetch failures, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Fetch {
            url: "https://www.rottentomatoes.com/m/toy_story".to_string(),
            status: 404,
            reason: "Not Found".to_string(),
        };
        let text = err.to_string();
        assert!(text.starts_with("FETCH_FAILED"));
        assert!(text.contains("https://www.rottentomatoes.com/m/toy_story"));
        assert!(text.contains("Not Found"));
    }

    #[test]
    fn test_error_status() {
        let err = Error::Fetch { url: "https://example.com/".into(), status: 503, reason: "Service Unavailable".into() };
        assert_eq!(err.status(), Some(503));
        assert_eq!(Error::ExtractFailed("no score".into()).status(), None);
    }
}
