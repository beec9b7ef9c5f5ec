//! Search error types.
//!
//! This module defines the error types that can occur while talking to the
//! search engine, and which of them are worth retrying.

use thiserror::Error;

/// HTTP statuses that signal a temporarily unavailable cluster.
const TRANSIENT_STATUSES: [u16; 4] = [429, 502, 503, 504];

/// Errors that can occur during search engine operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Failed to reach the search engine (I/O, DNS, refused connection).
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request timed out.
    #[error("Timeout error: {0}")]
    TimeoutError(String),

    /// The cluster answered with a status that asks the client to come back later.
    #[error("Search engine unavailable (status {status}): {body}")]
    Unavailable { status: u16, body: String },

    /// The cluster refused the request (bad request, auth failure, ...).
    #[error("Request rejected (status {status}): {body}")]
    RequestRejected { status: u16, body: String },

    /// The client could not build the request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Bulk indexing operation failed as a whole.
    #[error("Bulk index error: {0}")]
    BulkIndexError(String),

    /// Failed to create the search index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to parse response from search engine.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize data for the search engine.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SearchError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a timeout error.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::TimeoutError(msg.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a bulk index error.
    pub fn bulk_index(msg: impl Into<String>) -> Self {
        Self::BulkIndexError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Classify a non-success HTTP response.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        if TRANSIENT_STATUSES.contains(&status) {
            Self::Unavailable { status, body }
        } else {
            Self::RequestRejected { status, body }
        }
    }

    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SearchError::ConnectionError(_)
            | SearchError::TimeoutError(_)
            | SearchError::Unavailable { .. } => true,
            SearchError::RequestRejected { .. }
            | SearchError::InvalidRequest(_)
            | SearchError::BulkIndexError(_)
            | SearchError::IndexCreationError(_)
            | SearchError::ParseError(_)
            | SearchError::SerializationError(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_are_transient() {
        assert!(SearchError::connection("refused").is_transient());
        assert!(SearchError::timeout("30s elapsed").is_transient());
    }

    #[test]
    fn test_from_status() {
        assert!(SearchError::from_status(503, "busy").is_transient());
        assert!(SearchError::from_status(429, "slow down").is_transient());

        let rejected = SearchError::from_status(400, "malformed");
        assert!(!rejected.is_transient());
        assert!(matches!(rejected, SearchError::RequestRejected { status: 400, .. }));

        assert!(!SearchError::from_status(401, "auth").is_transient());
    }

    #[test]
    fn test_payload_errors_are_fatal() {
        assert!(!SearchError::parse("not json").is_transient());
        assert!(!SearchError::serialization("nan").is_transient());
        assert!(!SearchError::invalid_request("relative URL without a base").is_transient());
    }
}
