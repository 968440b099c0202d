use thiserror::Error;

/// A status-specific payload was requested while the state was in a
/// different status.
///
/// This indicates a reducer/view mismatch, not a runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("status mismatch: expected `{expected}`, found `{actual}`")]
pub struct StatusMismatch {
    pub expected: &'static str,
    pub actual: &'static str,
}

/// Errors returned by a [`LoopHandle`](super::LoopHandle).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoopError {
    /// The driver task is gone (shut down or handle dropped).
    #[error("loop '{name}' is no longer running")]
    Closed { name: &'static str },
}
