//! # Review Grades
//!
//! Recall quality on the SM-2 scale:
//!
//! | Grade | Meaning |
//! |---|---|
//! | 0-2 | Failed recall (lapse) |
//! | 3 | Recalled with serious difficulty |
//! | 4 | Recalled after hesitation |
//! | 5 | Perfect recall |

use crate::error::{ReviewError, ReviewResult};

/// A validated recall grade in `0..=5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Grade(u8);

impl Grade {
    /// Highest grade.
    pub const MAX: u8 = 5;
    /// Lowest passing grade.
    pub const PASS_THRESHOLD: u8 = 3;
    /// Perfect recall.
    pub const PERFECT: Self = Self(5);

    /// Validates a raw grade.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidGrade`] if `value` is outside `0..=5`.
    pub fn new(value: i64) -> ReviewResult<Self> {
        match u8::try_from(value) {
            Ok(grade) if grade <= Self::MAX => Ok(Self(grade)),
            _ => Err(ReviewError::InvalidGrade(value)),
        }
    }

    /// Returns the raw grade.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns whether this grade counts as successful recall.
    #[inline]
    #[must_use]
    pub const fn is_pass(self) -> bool {
        self.0 >= Self::PASS_THRESHOLD
    }

    /// Distance from a perfect grade (`5 - grade`).
    #[inline]
    #[must_use]
    pub const fn shortfall(self) -> u8 {
        Self::MAX - self.0
    }
}

impl TryFrom<i64> for Grade {
    type Error = ReviewError;

    fn try_from(value: i64) -> ReviewResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<i32> for Grade {
    type Error = ReviewError;

    fn try_from(value: i32) -> ReviewResult<Self> {
        Self::new(i64::from(value))
    }
}
