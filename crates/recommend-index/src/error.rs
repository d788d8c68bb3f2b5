//! Recommendation error types.

use thiserror::Error;

/// Failure reported by a catalog owner when asked for the current profiles.
#[derive(Debug, Error)]
pub enum CatalogSourceError {
    /// The catalog could not be read (database down, file missing, ...)
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during recommendation operations.
#[derive(Debug, Error)]
pub enum RecommendationError {
    /// Caller passed an out-of-range argument (k == 0, threshold > 1, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Query issued against an index that holds no agents.
    ///
    /// `AgentRecommender` turns this into an empty result; it only escapes
    /// from direct [`IndexSnapshot`](crate::IndexSnapshot) scoring.
    #[error("Recommendation index is untrained")]
    UntrainedIndex,

    /// Catalog could not be loaded for a rebuild
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogSourceError),
}
