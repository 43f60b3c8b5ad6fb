// SPDX-License-Identifier: MIT
//! Streak engine — consecutive-day bookkeeping for study completions.
//!
//! [`apply_completion`] implements the full date logic (first-ever, same-day
//! repeat, consecutive day, gap reset). [`apply_uncompletion`] is a
//! deliberately lightweight correction: a floored decrement that never
//! touches `longest_streak` or `last_completed_at` — undo is not a
//! time-travel operation and no attempt is made to reconstruct prior
//! date state.

use chrono::{DateTime, Utc};

use crate::calendar::{day_distance, day_floor};

/// Streak counters for one user, as loaded from the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreakState {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// UTC-midnight-normalized day of the most recent completion event.
    /// `None` until the first completion ever.
    pub last_completed_at: Option<DateTime<Utc>>,
    /// Distinct calendar days with at least one completion logged.
    pub total_days_studied: u32,
}

/// A fixed streak-length celebration threshold.
///
/// Surfaced as a one-time response signal when a completion lands the
/// streak exactly on the threshold. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakMilestone {
    pub days: u32,
    pub id: &'static str,
    pub title: &'static str,
}

pub const STREAK_MILESTONES: [StreakMilestone; 5] = [
    StreakMilestone { days: 3, id: "streak_3", title: "3 days in a row — building a habit!" },
    StreakMilestone { days: 7, id: "streak_7", title: "A full week of study!" },
    StreakMilestone { days: 14, id: "streak_14", title: "Two weeks strong!" },
    StreakMilestone { days: 21, id: "streak_21", title: "21 days — a habit formed!" },
    StreakMilestone { days: 30, id: "streak_30", title: "A whole month of faithfulness!" },
];

/// Outcome of applying one completion event.
#[derive(Debug, Clone, PartialEq)]
pub struct StreakUpdate {
    pub streak: StreakState,
    /// True when this event is the first completion logged on this calendar
    /// day — only then does `total_days_studied` advance.
    pub new_day: bool,
    /// Set when the resulting `current_streak` exactly hits a threshold.
    pub milestone: Option<StreakMilestone>,
}

/// Apply a day-completion event at wall-clock time `now`.
///
/// The clock is a parameter so tests can pin it; production callers pass
/// `Utc::now()`.
pub fn apply_completion(state: &StreakState, now: DateTime<Utc>) -> StreakUpdate {
    let today = day_floor(now);
    let mut next = state.clone();

    let new_day = match state.last_completed_at {
        None => {
            // First-ever completion.
            next.current_streak = 1;
            true
        }
        Some(last) => {
            match day_distance(today, day_floor(last)) {
                0 => {
                    // Already logged a completion today. A zero streak can
                    // still occur here after an undo; snap it back to 1.
                    if next.current_streak == 0 {
                        next.current_streak = 1;
                    }
                    false
                }
                1 => {
                    next.current_streak += 1;
                    true
                }
                // Gap (>1) — and a negative delta means the clock moved
                // backwards, which gets the same reset treatment.
                _ => {
                    next.current_streak = 1;
                    true
                }
            }
        }
    };

    next.longest_streak = next.longest_streak.max(next.current_streak);
    next.last_completed_at = Some(today);
    if new_day {
        next.total_days_studied += 1;
    }

    // A same-day repeat that left the streak untouched must not re-surface
    // the celebration it already triggered.
    let milestone = if new_day || next.current_streak != state.current_streak {
        STREAK_MILESTONES
            .iter()
            .find(|m| m.days == next.current_streak)
            .copied()
    } else {
        None
    };

    StreakUpdate { streak: next, new_day, milestone }
}

/// Apply an un-completion event (a day being unmarked).
///
/// Floored decrements only; the longest-ever record survives an undo.
pub fn apply_uncompletion(state: &StreakState) -> StreakState {
    let mut next = state.clone();
    next.current_streak = next.current_streak.saturating_sub(1);
    next.total_days_studied = next.total_days_studied.saturating_sub(1);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn state(current: u32, longest: u32, last: Option<&str>, days: u32) -> StreakState {
        StreakState {
            current_streak: current,
            longest_streak: longest,
            last_completed_at: last.map(|s| ts(s)),
            total_days_studied: days,
        }
    }

    #[test]
    fn first_ever_completion_starts_at_one() {
        let up = apply_completion(&StreakState::default(), ts("2024-03-15T09:00:00Z"));
        assert_eq!(up.streak.current_streak, 1);
        assert_eq!(up.streak.longest_streak, 1);
        assert_eq!(up.streak.total_days_studied, 1);
        assert!(up.new_day);
        assert_eq!(up.streak.last_completed_at, Some(ts("2024-03-15T00:00:00Z")));
    }

    #[test]
    fn same_day_repeat_leaves_streak_alone() {
        let s = state(4, 9, Some("2024-03-15T00:00:00Z"), 20);
        let up = apply_completion(&s, ts("2024-03-15T22:00:00Z"));
        assert_eq!(up.streak.current_streak, 4);
        assert_eq!(up.streak.total_days_studied, 20);
        assert!(!up.new_day);
    }

    #[test]
    fn same_day_repeat_after_undo_snaps_to_one() {
        // Undo on the same day can leave current_streak at 0; a re-completion
        // that day must restore 1, not stay at 0.
        let s = state(0, 9, Some("2024-03-15T00:00:00Z"), 20);
        let up = apply_completion(&s, ts("2024-03-15T23:00:00Z"));
        assert_eq!(up.streak.current_streak, 1);
        assert!(!up.new_day);
    }

    #[test]
    fn same_day_repeat_does_not_resurface_milestone() {
        // The first completion of the day at streak 7 already celebrated;
        // a repeat completion the same day stays quiet.
        let s = state(7, 10, Some("2024-03-15T00:00:00Z"), 20);
        let up = apply_completion(&s, ts("2024-03-15T21:00:00Z"));
        assert_eq!(up.streak.current_streak, 7);
        assert!(up.milestone.is_none());
    }

    #[test]
    fn consecutive_day_increments() {
        // 25 hours later but still the next calendar day.
        let s = state(6, 10, Some("2024-03-15T00:00:00Z"), 30);
        let up = apply_completion(&s, ts("2024-03-16T01:00:00Z"));
        assert_eq!(up.streak.current_streak, 7);
        assert_eq!(up.streak.longest_streak, 10, "7 < 10, longest unchanged");
        assert!(up.new_day);
        assert_eq!(up.streak.total_days_studied, 31);
        assert_eq!(up.milestone.unwrap().days, 7);
    }

    #[test]
    fn gap_resets_to_one_never_zero() {
        let s = state(12, 12, Some("2024-03-10T00:00:00Z"), 40);
        let up = apply_completion(&s, ts("2024-03-15T08:00:00Z"));
        assert_eq!(up.streak.current_streak, 1);
        assert_eq!(up.streak.longest_streak, 12);
        assert!(up.new_day);
    }

    #[test]
    fn clock_going_backwards_treated_as_gap() {
        let s = state(5, 5, Some("2024-03-15T00:00:00Z"), 5);
        let up = apply_completion(&s, ts("2024-03-13T12:00:00Z"));
        assert_eq!(up.streak.current_streak, 1);
    }

    #[test]
    fn new_record_raises_longest() {
        let s = state(10, 10, Some("2024-03-15T00:00:00Z"), 10);
        let up = apply_completion(&s, ts("2024-03-16T07:00:00Z"));
        assert_eq!(up.streak.current_streak, 11);
        assert_eq!(up.streak.longest_streak, 11);
    }

    #[test]
    fn milestone_only_on_exact_threshold() {
        let s = state(3, 8, Some("2024-03-15T00:00:00Z"), 10);
        let up = apply_completion(&s, ts("2024-03-16T07:00:00Z"));
        assert_eq!(up.streak.current_streak, 4);
        assert!(up.milestone.is_none());
    }

    #[test]
    fn uncompletion_floors_at_zero_and_keeps_longest() {
        let s = state(1, 10, Some("2024-03-15T00:00:00Z"), 1);
        let after = apply_uncompletion(&s);
        assert_eq!(after.current_streak, 0);
        assert_eq!(after.total_days_studied, 0);
        assert_eq!(after.longest_streak, 10);
        assert_eq!(after.last_completed_at, s.last_completed_at);

        let again = apply_uncompletion(&after);
        assert_eq!(again.current_streak, 0);
        assert_eq!(again.total_days_studied, 0);
    }

    proptest! {
        /// For any event sequence: current ≤ longest, current ≥ 0 (by type),
        /// and longest never decreases.
        #[test]
        fn invariants_hold_over_random_sequences(
            events in proptest::collection::vec((any::<bool>(), 0i64..4), 0..60)
        ) {
            let mut s = StreakState::default();
            let mut now = ts("2024-01-01T12:00:00Z");
            let mut prev_longest = 0u32;

            for (complete, day_advance) in events {
                now += Duration::days(day_advance);
                if complete {
                    s = apply_completion(&s, now).streak;
                } else {
                    s = apply_uncompletion(&s);
                }
                prop_assert!(s.current_streak <= s.longest_streak);
                prop_assert!(s.longest_streak >= prev_longest);
                prev_longest = s.longest_streak;
            }
        }
    }
}
