//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted by the session layer.
///
/// Phase/ordering violations are deliberately *not* errors: intents that
/// arrive in an unsupported phase (or during the feedback window) are
/// ignored by returning `None`/`false` from the engine. Only conditions the
/// caller must react to surface here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// The question bank is empty or not yet loaded; the caller should wait.
    #[error("question bank is not loaded yet")]
    NotReady,

    #[error("a session is already active")]
    AlreadyStarted,

    #[error("session state lock poisoned")]
    Poisoned,

    #[error(transparent)]
    Storage(#[from] StorageError),
}
