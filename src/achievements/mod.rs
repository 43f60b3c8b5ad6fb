// SPDX-License-Identifier: MIT
//! Achievement evaluation — pure rule set over a user's cumulative
//! statistics snapshot.
//!
//! Unlocking is monotonic and detects *crossings* only: an achievement is
//! newly unlocked iff it is not already unlocked, its condition holds
//! against the new snapshot, and it did **not** hold against the previous
//! snapshot. The third condition stops persistently-true conditions from
//! re-firing on unrelated updates. Categories are organizational only —
//! every condition is evaluated independently and several may fire from a
//! single event.

pub mod catalog;

use serde::Serialize;

pub use catalog::CATALOG;

/// Cumulative per-user statistics, shaped after the streak record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_plans_completed: u32,
    pub total_7day_completed: u32,
    pub total_21day_completed: u32,
    pub total_days_studied: u32,
    pub total_verses_from_plans: u32,
    pub total_prayers_from_plans: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Streak,
    Completion,
    Engagement,
    Depth,
}

/// Predicate kind over a [`StatsSnapshot`], with its threshold parameter.
///
/// A fixed enum instead of boxed closures keeps the catalog a plain const
/// table while preserving extensibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    CurrentStreakAtLeast(u32),
    LongestStreakAtLeast(u32),
    PlansCompletedAtLeast(u32),
    SevenDayPlansAtLeast(u32),
    TwentyOneDayPlansAtLeast(u32),
    DaysStudiedAtLeast(u32),
    VersesSavedAtLeast(u32),
    PrayersGeneratedAtLeast(u32),
}

impl Condition {
    /// The snapshot metric this condition reads.
    fn metric(&self, s: &StatsSnapshot) -> u32 {
        match *self {
            Condition::CurrentStreakAtLeast(_) => s.current_streak,
            Condition::LongestStreakAtLeast(_) => s.longest_streak,
            Condition::PlansCompletedAtLeast(_) => s.total_plans_completed,
            Condition::SevenDayPlansAtLeast(_) => s.total_7day_completed,
            Condition::TwentyOneDayPlansAtLeast(_) => s.total_21day_completed,
            Condition::DaysStudiedAtLeast(_) => s.total_days_studied,
            Condition::VersesSavedAtLeast(_) => s.total_verses_from_plans,
            Condition::PrayersGeneratedAtLeast(_) => s.total_prayers_from_plans,
        }
    }

    fn threshold(&self) -> u32 {
        match *self {
            Condition::CurrentStreakAtLeast(n)
            | Condition::LongestStreakAtLeast(n)
            | Condition::PlansCompletedAtLeast(n)
            | Condition::SevenDayPlansAtLeast(n)
            | Condition::TwentyOneDayPlansAtLeast(n)
            | Condition::DaysStudiedAtLeast(n)
            | Condition::VersesSavedAtLeast(n)
            | Condition::PrayersGeneratedAtLeast(n) => n,
        }
    }

    /// Whether the condition holds for the snapshot.
    pub fn met(&self, s: &StatsSnapshot) -> bool {
        self.metric(s) >= self.threshold()
    }

    /// `(progress, total)` for the "almost there" display.
    ///
    /// A zero threshold yields `(0, 0)` rather than dividing by zero.
    pub fn progress(&self, s: &StatsSnapshot) -> (u32, u32) {
        let total = self.threshold();
        if total == 0 {
            return (0, 0);
        }
        (self.metric(s).min(total), total)
    }
}

/// One row of the static achievement catalog.
#[derive(Debug, Clone, Copy)]
pub struct AchievementDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tier: Tier,
    pub category: Category,
    pub condition: Condition,
}

/// Achievements that transitioned from not-met to met.
///
/// Returns catalog entries whose id is absent from `already_unlocked`,
/// whose condition holds on `curr`, and whose condition did not hold on
/// `prev`. Calling this with `prev == curr` always returns nothing.
pub fn newly_unlocked<'a>(
    prev: &StatsSnapshot,
    curr: &StatsSnapshot,
    already_unlocked: &[String],
) -> Vec<&'a AchievementDef> {
    CATALOG
        .iter()
        .filter(|a| !already_unlocked.iter().any(|id| id == a.id))
        .filter(|a| a.condition.met(curr) && !a.condition.met(prev))
        .collect()
}

/// A not-yet-unlocked achievement with its progress toward the threshold.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementProgress {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tier: Tier,
    pub category: Category,
    pub progress: u32,
    pub total: u32,
    /// Clamped 0–100.
    pub percent: u32,
}

/// The `limit` closest not-yet-unlocked achievements, highest
/// progress-ratio first. Entries whose progress is not derivable rank last
/// with `(0, 0)`.
pub fn next_achievements(
    snapshot: &StatsSnapshot,
    already_unlocked: &[String],
    limit: usize,
) -> Vec<AchievementProgress> {
    let mut out: Vec<AchievementProgress> = CATALOG
        .iter()
        .filter(|a| !already_unlocked.iter().any(|id| id == a.id))
        .filter(|a| !a.condition.met(snapshot))
        .map(|a| {
            let (progress, total) = a.condition.progress(snapshot);
            let percent = if total == 0 { 0 } else { (progress * 100 / total).min(100) };
            AchievementProgress {
                id: a.id,
                title: a.title,
                description: a.description,
                tier: a.tier,
                category: a.category,
                progress,
                total,
                percent,
            }
        })
        .collect();

    // Highest exact ratio first — the integer percent is display-only and
    // too coarse (293/365 and 4/5 both floor to 80). Cross-multiplying
    // avoids floats; `(0, 0)` entries count as ratio zero. Stable order
    // breaks ties by catalog position.
    let ratio = |p: &AchievementProgress| -> (u64, u64) {
        if p.total == 0 { (0, 1) } else { (p.progress as u64, p.total as u64) }
    };
    out.sort_by(|a, b| {
        let (ap, at) = ratio(a);
        let (bp, bt) = ratio(b);
        (bp * at).cmp(&(ap * bt))
    });
    out.truncate(limit);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(days: u32, current: u32, plans: u32) -> StatsSnapshot {
        StatsSnapshot {
            current_streak: current,
            longest_streak: current,
            total_plans_completed: plans,
            total_days_studied: days,
            ..Default::default()
        }
    }

    #[test]
    fn crossing_unlocks_once() {
        let prev = snap(2, 2, 0);
        let curr = snap(3, 3, 0);
        let fresh = newly_unlocked(&prev, &curr, &[]);
        assert!(fresh.iter().any(|a| a.id == "streak_starter"));
    }

    #[test]
    fn persistently_true_condition_does_not_refire() {
        // Condition true in both snapshots: no crossing, nothing fires even
        // though the id is not in the unlocked list.
        let s = snap(10, 5, 0);
        assert!(newly_unlocked(&s, &s, &[]).is_empty());
    }

    #[test]
    fn already_unlocked_ids_are_skipped() {
        let prev = snap(2, 2, 0);
        let curr = snap(3, 3, 0);
        let fresh = newly_unlocked(&prev, &curr, &["streak_starter".to_string()]);
        assert!(!fresh.iter().any(|a| a.id == "streak_starter"));
    }

    #[test]
    fn multiple_achievements_fire_from_one_event() {
        // Completing the final day of a first 7-day plan crosses both the
        // first-plan and first-7-day-plan thresholds at once.
        let prev = StatsSnapshot { total_days_studied: 6, ..Default::default() };
        let curr = StatsSnapshot {
            total_days_studied: 7,
            total_plans_completed: 1,
            total_7day_completed: 1,
            ..Default::default()
        };
        let fresh = newly_unlocked(&prev, &curr, &[]);
        assert!(fresh.iter().any(|a| a.id == "first_plan"));
        assert!(fresh.iter().any(|a| a.id == "week_walker"));
    }

    #[test]
    fn next_achievements_orders_by_ratio() {
        // 6/7 days studied (86%) should outrank 2/3 streak (66%).
        let s = StatsSnapshot { total_days_studied: 6, current_streak: 2, longest_streak: 2, ..Default::default() };
        let next = next_achievements(&s, &[], 3);
        assert!(!next.is_empty());
        assert!(next.windows(2).all(|w| w[0].percent >= w[1].percent));
        assert_eq!(next[0].id, "seven_days");
        assert_eq!(next[0].progress, 6);
        assert_eq!(next[0].total, 7);
    }

    #[test]
    fn equal_display_percents_rank_by_exact_ratio() {
        // 293/365 days (80.3%) must outrank 4/5 plans (80.0%) even though
        // both floor to a displayed 80.
        let s = StatsSnapshot {
            current_streak: 1,
            longest_streak: 1,
            total_plans_completed: 4,
            total_7day_completed: 4,
            total_days_studied: 293,
            ..Default::default()
        };
        let next = next_achievements(&s, &[], 2);
        assert_eq!(next[0].id, "year_of_study");
        assert_eq!(next[1].id, "five_plans");
        assert_eq!(next[0].percent, 80);
        assert_eq!(next[1].percent, 80);
    }

    #[test]
    fn next_achievements_respects_limit_and_excludes_met() {
        let s = snap(100, 30, 5);
        let next = next_achievements(&s, &[], 4);
        assert!(next.len() <= 4);
        for a in &next {
            assert!(a.percent < 100);
        }
    }

    #[test]
    fn catalog_ids_are_unique() {
        let mut ids: Vec<_> = CATALOG.iter().map(|a| a.id).collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}
