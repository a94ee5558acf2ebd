use std::time::Duration;

use thiserror::Error;

/// Failure kinds surfaced by corpus loading, index construction and queries.
///
/// An `Unmatched` query outcome is not represented here; it is a regular
/// [`QueryResult`](crate::types::QueryResult) variant.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Embedding timed out after {0:?}")]
    EmbeddingTimeout(Duration),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    pub fn corpus_not_loaded() -> Self {
        Self::Configuration("corpus not loaded".to_string())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::InvalidConfig(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
