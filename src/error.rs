//! Error types surfaced by a search

use thiserror::Error;

/// Failure of a single upstream request.
///
/// These only reach the caller when the search was served by exactly one
/// upstream request; fan-out searches absorb them per request.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Criteria could not be turned into a well-formed upstream URL
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network or TLS failure from the underlying HTTP client
    #[error("transport failure: {0}")]
    TransportFailure(#[from] reqwest::Error),

    /// Upstream answered with no body at all
    #[error("upstream returned an empty response body")]
    EmptyResponseBody,

    /// Body was not a valid business-search envelope
    #[error("failed to decode upstream response (HTTP {status}): {source}")]
    DecodeFailure {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl SearchError {
    /// Stable short name, used for metrics and API error payloads
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::InvalidRequest(_) => "invalid_request",
            SearchError::TransportFailure(_) => "transport_failure",
            SearchError::EmptyResponseBody => "empty_response_body",
            SearchError::DecodeFailure { .. } => "decode_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            SearchError::InvalidRequest("bad".into()).kind(),
            "invalid_request"
        );
        assert_eq!(SearchError::EmptyResponseBody.kind(), "empty_response_body");

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SearchError::DecodeFailure { status: 200, source };
        assert_eq!(err.kind(), "decode_failure");
        assert!(err.to_string().contains("HTTP 200"));
    }
}
