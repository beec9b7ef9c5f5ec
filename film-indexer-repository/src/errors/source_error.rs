//! Relational source error types.

use thiserror::Error;

/// Errors that can occur while reading film works from the database.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to connect to the database.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The extraction query failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// A row did not have the expected shape.
    #[error("Decode error: {0}")]
    DecodeError(String),
}

impl SourceError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }
}

impl From<sqlx::Error> for SourceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_) => Self::DecodeError(err.to_string()),
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => Self::ConnectionError(err.to_string()),
            _ => Self::QueryError(err.to_string()),
        }
    }
}
