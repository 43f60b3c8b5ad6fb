// SPDX-License-Identifier: MIT
//! UTC calendar-day normalization.
//!
//! Streak math never compares raw timestamps — two events belong to the
//! same study day iff their [`day_floor`] values are equal, and the gap
//! between two days is always a whole number of days.

use chrono::{DateTime, Utc};

/// Milliseconds in one calendar day.
const MS_PER_DAY: i64 = 86_400_000;

/// Reduce a timestamp to its UTC calendar date with the time-of-day zeroed.
///
/// Pure and total — idempotent on already-normalized values.
pub fn day_floor(ts: DateTime<Utc>) -> DateTime<Utc> {
    let ms = ts.timestamp_millis();
    DateTime::from_timestamp_millis(ms - ms.rem_euclid(MS_PER_DAY))
        .unwrap_or(ts)
}

/// Whole days elapsed from `earlier` to `later`: floor(elapsed ms / 86,400,000).
///
/// Negative when `later` precedes `earlier`. Both arguments are normalized
/// internally, so callers may pass raw timestamps.
pub fn day_distance(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    let delta_ms = day_floor(later).timestamp_millis() - day_floor(earlier).timestamp_millis();
    delta_ms.div_euclid(MS_PER_DAY)
}

/// True iff both timestamps fall on the same UTC calendar day.
pub fn same_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    day_floor(a) == day_floor(b)
}
