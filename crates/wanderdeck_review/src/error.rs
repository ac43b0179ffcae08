//! # Review Error Types
//!
//! All errors that can occur in the review system.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the review system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// A review grade outside `0..=5`. Nothing was changed.
    #[error("invalid grade {0}: expected 0..=5")]
    InvalidGrade(i64),

    /// Writing the progress file failed.
    ///
    /// The in-memory state already reflects the review and stays valid;
    /// only durability is lost.
    #[error("failed to persist review progress to {path}: {reason}")]
    PersistFailure {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// Reading the progress file failed.
    ///
    /// Callers opening a scheduler treat this as "no prior history".
    #[error("failed to load review progress from {path}: {reason}")]
    LoadFailure {
        /// Source that could not be read.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },
}

/// Result type for review operations.
pub type ReviewResult<T> = Result<T, ReviewError>;
