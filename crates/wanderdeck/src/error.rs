//! # Session Error Types
//!
//! All errors that can occur while driving a session.

use thiserror::Error;
use wanderdeck_review::ReviewError;

/// Errors that can occur while driving a session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Invalid or unreadable configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The scheduler rejected or failed to record a review.
    #[error(transparent)]
    Review(#[from] ReviewError),

    /// An answer was given while no review was open.
    #[error("no review is open")]
    NoActiveReview,
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
