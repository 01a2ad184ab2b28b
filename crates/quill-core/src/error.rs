//! Domain-level error types.

use thiserror::Error;

/// Message returned when a post is submitted without a title or content.
pub const MISSING_FIELDS: &str = "Title and Content are required.";

/// Domain errors - failures of the publish flow.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error(transparent)]
    Storage(#[from] RepoError),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Cannot decode column {column} as {expected}")]
    Decode {
        column: &'static str,
        expected: &'static str,
    },

    #[error("Unsupported database backend: {0}")]
    Unsupported(String),
}

/// Errors raised while triggering a downstream rebuild.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Webhook request failed: {0}")]
    Transport(String),

    #[error("Webhook responded with status {0}")]
    Status(u16),
}
