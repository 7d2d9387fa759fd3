// crates/search/src/error.rs
use thiserror::Error;

/// Errors from a single exchange with the job-search API.
///
/// Every variant's `Display` is the detail text shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to build search request: {0}")]
    RequestBuild(String),

    #[error("Search cancelled {stage}")]
    Cancelled { stage: &'static str },

    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Jooble API error (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Failed to read response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("Failed to decode Jooble response: {message}. Response: {body}")]
    Decode { message: String, body: String },

    #[error("Jooble API returned an error: {message} (code {code})")]
    Api { code: i64, message: String },
}

impl ClientError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled { .. })
    }
}

/// Errors rejected synchronously when starting an online search.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search term cannot be empty")]
    EmptyTerm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        let err = ClientError::Status {
            status: 403,
            body: "forbidden".into(),
        };
        assert_eq!(err.to_string(), "Jooble API error (HTTP 403): forbidden");

        let err = ClientError::Api {
            code: 7,
            message: "bad key".into(),
        };
        assert_eq!(err.to_string(), "Jooble API returned an error: bad key (code 7)");

        let err = ClientError::Cancelled {
            stage: "while awaiting response",
        };
        assert!(err.is_cancelled());
        assert_eq!(err.to_string(), "Search cancelled while awaiting response");
    }
}
