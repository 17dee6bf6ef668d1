//! Account lifecycle error types.

use thiserror::Error;

/// Errors raised by account lifecycle transitions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    /// The account is closed; no further mutation is permitted.
    #[error("Account is closed and cannot be modified")]
    Closed,
}
