//! Error types for the vidsearch crate.
//!
//! All errors use stable string messages suitable for display to API
//! callers and programmatic handling. Per-source failures during a search
//! are absorbed by the orchestrator and never cross the request boundary;
//! only [`SearchError::InvalidRequest`] and [`SearchError::UnknownSource`]
//! surface to callers.

/// Errors that can occur during search aggregation operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request failed validation before any I/O was performed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A toggle or lookup referenced a slug that is not registered.
    #[error("unknown source: {0}")]
    UnknownSource(String),

    /// An HTTP fetch exhausted its attempt budget for one source.
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// A source's listing markup could not be processed.
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),

    /// Invalid configuration or client construction failure.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for vidsearch results.
pub type Result<T> = std::result::Result<T, SearchError>;
