//! Routing error kinds.

use thiserror::Error;

/// Failures a navigation can run into. None of them is fatal to the page:
/// fetch failures degrade to in-place error markup, a missing container
/// aborts the single navigation with a logged warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The fragment endpoint answered with a non-success status.
    #[error("fragment request returned HTTP {0}")]
    FetchFailed(u16),

    /// The request never produced a response (network failure, CORS, ...).
    #[error("fragment request failed: {0}")]
    RequestFailed(String),

    /// The id has no DOM container and is not a creatable review id.
    #[error("no container for section '{0}' and it is not a review id")]
    ContainerMissing(String),
}
