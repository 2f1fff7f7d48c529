use thiserror::Error;

/// Errors produced by [`ClusteringEngine`](super::ClusteringEngine) operations.
///
/// Both variants are caller errors. A failed call never mutates engine state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusteringError {
    /// A numeric argument is outside its documented bound.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// An operation was called before its prerequisites exist.
    #[error("not ready: {0}")]
    NotReady(String),
}

impl ClusteringError {
    /// Short machine-readable label used by the HTTP layer.
    pub fn kind(&self) -> &'static str {
        match self {
            ClusteringError::InvalidArgument(_) => "invalid_argument",
            ClusteringError::NotReady(_) => "not_ready",
        }
    }

    /// The message without the variant prefix.
    pub fn detail(&self) -> &str {
        match self {
            ClusteringError::InvalidArgument(msg) | ClusteringError::NotReady(msg) => msg,
        }
    }
}
