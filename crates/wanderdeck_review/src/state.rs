//! # Review State
//!
//! Per-item SM-2 record and the single transition that mutates it.
//!
//! ## Transition Rules
//!
//! | Grade | interval | ease | reps | lapses |
//! |---|---|---|---|---|
//! | pass, reps = 0 | 1 | SM-2 update | +1 | = |
//! | pass, reps = 1 | 6 | SM-2 update | +1 | = |
//! | pass, reps >= 2 | floor(interval * ease) | SM-2 update | +1 | = |
//! | fail | 1 | -0.2 | 0 | +1 |
//!
//! Ease never drops below [`MIN_EASE`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::grade::Grade;

/// Ease assigned to a never-reviewed item.
pub const INITIAL_EASE: f64 = 2.5;
/// Lowest ease an item can reach.
pub const MIN_EASE: f64 = 1.3;
/// Ease lost on a failed review.
pub const LAPSE_EASE_PENALTY: f64 = 0.2;
/// Interval after the first successful review.
pub const FIRST_INTERVAL_DAYS: u32 = 1;
/// Interval after the second successful review.
pub const SECOND_INTERVAL_DAYS: u32 = 6;

/// Scheduling record for one item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    /// Days until the next review.
    pub interval: u32,
    /// Interval growth multiplier, never below [`MIN_EASE`].
    pub ease: f64,
    /// Consecutive successful reviews.
    pub reps: u32,
    /// Failed reviews over the item's lifetime.
    pub lapses: u32,
    /// When the item next becomes due.
    #[serde(rename = "due_date", with = "timestamp")]
    pub due_at: DateTime<Utc>,
    /// When the item was last reviewed, if ever.
    #[serde(rename = "last_reviewed", with = "timestamp::option", default)]
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl ReviewState {
    /// Default state for an item first seen at `now`: due immediately.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            interval: 0,
            ease: INITIAL_EASE,
            reps: 0,
            lapses: 0,
            due_at: now,
            last_reviewed_at: None,
        }
    }

    /// Returns whether the item is due at `now`.
    #[inline]
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }

    /// Returns whether the item has never been reviewed.
    #[inline]
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.last_reviewed_at.is_none()
    }

    /// Applies one graded review at `now`.
    pub fn apply(&mut self, grade: Grade, now: DateTime<Utc>) {
        if grade.is_pass() {
            self.interval = match self.reps {
                0 => FIRST_INTERVAL_DAYS,
                1 => SECOND_INTERVAL_DAYS,
                _ => grown_interval(self.interval, self.ease),
            };
            let shortfall = f64::from(grade.shortfall());
            self.ease = (self.ease + 0.1 - shortfall * (0.08 + shortfall * 0.02)).max(MIN_EASE);
            self.reps = self.reps.saturating_add(1);
        } else {
            self.interval = FIRST_INTERVAL_DAYS;
            self.lapses = self.lapses.saturating_add(1);
            self.reps = 0;
            self.ease = (self.ease - LAPSE_EASE_PENALTY).max(MIN_EASE);
        }

        self.due_at = now
            .checked_add_signed(Duration::days(i64::from(self.interval)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.last_reviewed_at = Some(now);
    }

    /// Restores invariants on a record read from outside.
    ///
    /// Hand-edited or older files may carry an ease below the floor (or NaN).
    pub(crate) fn normalize(&mut self) {
        self.ease = self.ease.max(MIN_EASE);
    }
}

/// `floor(interval * ease)`, saturating at `u32::MAX`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn grown_interval(interval: u32, ease: f64) -> u32 {
    let grown = (f64::from(interval) * ease).floor();
    if grown >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        grown as u32
    }
}

/// Timestamp encoding for the progress file.
///
/// Writes RFC 3339 in UTC. Reads RFC 3339 with any offset, or a naive
/// `YYYY-MM-DDTHH:MM:SS[.ffffff]` which is taken to be UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|at| at.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
                    .map(|naive| Utc.from_utc_datetime(&naive))
            })
    }

    pub fn format(at: &DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            at: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match at {
                Some(at) => serializer.serialize_some(&super::format(at)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| super::parse(&raw).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(value: i64) -> Grade {
        Grade::new(value).expect("valid grade")
    }

    fn t0() -> DateTime<Utc> {
        timestamp::parse("2024-03-01T09:00:00Z").expect("timestamp")
    }

    #[test]
    fn test_new_state_is_due_now() {
        let state = ReviewState::new(t0());
        assert_eq!(state.interval, 0);
        assert!((state.ease - INITIAL_EASE).abs() < f64::EPSILON);
        assert!(state.is_due(t0()));
        assert!(state.is_new());
    }

    #[test]
    fn test_first_passes_follow_fixed_intervals() {
        let mut state = ReviewState::new(t0());

        state.apply(grade(4), t0());
        assert_eq!(state.interval, 1);
        assert_eq!(state.reps, 1);
        assert_eq!(state.due_at, t0() + Duration::days(1));
        assert_eq!(state.last_reviewed_at, Some(t0()));

        state.apply(grade(4), t0());
        assert_eq!(state.interval, 6);
        assert_eq!(state.reps, 2);
    }

    #[test]
    fn test_ease_update_by_grade() {
        // 5 => +0.1, 4 => +0.0, 3 => -0.14
        for (value, expected) in [(5, 2.6), (4, 2.5), (3, 2.36)] {
            let mut state = ReviewState::new(t0());
            state.apply(grade(value), t0());
            assert!((state.ease - expected).abs() < 1e-9, "grade {value}: ease {}", state.ease);
        }
    }

    #[test]
    fn test_third_pass_multiplies_by_ease() {
        let mut state = ReviewState::new(t0());
        state.reps = 2;
        state.interval = 6;
        state.ease = 2.5;

        state.apply(grade(4), t0());
        assert_eq!(state.interval, 15);
    }

    #[test]
    fn test_fail_resets_progress() {
        let mut state = ReviewState::new(t0());
        state.reps = 4;
        state.interval = 40;
        state.ease = 2.0;

        state.apply(grade(1), t0());
        assert_eq!(state.reps, 0);
        assert_eq!(state.interval, 1);
        assert_eq!(state.lapses, 1);
        assert!((state.ease - 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_huge_interval_saturates_due_date() {
        let mut state = ReviewState::new(t0());
        state.reps = 10;
        state.interval = u32::MAX / 2;

        state.apply(grade(5), t0());
        assert_eq!(state.interval, u32::MAX);
        assert_eq!(state.due_at, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_normalize_restores_ease_floor() {
        let mut state = ReviewState::new(t0());
        state.ease = f64::NAN;
        state.normalize();
        assert!((state.ease - MIN_EASE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut state = ReviewState::new(t0());
        state.apply(grade(5), t0());

        let json: serde_json::Value = serde_json::to_value(&state).expect("serialize");
        assert_eq!(json["due_date"], "2024-03-02T09:00:00Z");
        assert_eq!(json["last_reviewed"], "2024-03-01T09:00:00Z");
        assert_eq!(json["interval"], 1);
    }

    #[test]
    fn test_reads_naive_timestamps_as_utc() {
        let json = r#"{
            "interval": 6, "ease": 2.36, "reps": 2, "lapses": 0,
            "due_date": "2024-03-07T09:00:00.123456",
            "last_reviewed": null
        }"#;
        let state: ReviewState = serde_json::from_str(json).expect("deserialize");

        assert_eq!(state.interval, 6);
        assert_eq!(state.last_reviewed_at, None);
        assert_eq!(
            state.due_at,
            timestamp::parse("2024-03-07T09:00:00.123456Z").expect("timestamp")
        );
    }

    #[test]
    fn test_reads_offset_timestamps() {
        let at = timestamp::parse("2024-03-01T11:00:00+02:00").expect("timestamp");
        assert_eq!(at, t0());
    }
}
