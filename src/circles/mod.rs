// SPDX-License-Identifier: MIT
//! Circle milestone evaluation — the group-scoped analogue of
//! achievements, keyed to statistics aggregated across a study circle.
//!
//! Unlike the per-user achievement diff, [`new_milestones`] is a plain
//! set-difference of satisfied milestones between two stats snapshots.
//! Circle counters are monotonically non-decreasing in practice, so no
//! "previously false" guard is needed; if reversible circle stats are ever
//! introduced this must grow the same three-condition guard the
//! achievement evaluator has.

pub mod milestones;

use serde::Serialize;

pub use milestones::MILESTONES;

/// Circle-wide aggregate statistics, computed on demand from the members'
/// plans and shared content — never stored directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CircleStats {
    pub total_days_completed: u64,
    /// Mean plan progress across members, 0–100.
    pub average_progress: u64,
    pub total_reflections: u64,
    pub total_prayers: u64,
    pub total_verses: u64,
    /// Distinct calendar days on which any member completed a study day.
    pub active_days: u64,
    pub member_count: u64,
    pub completed_studies: u64,
    /// The longest streak ever held by any member.
    pub longest_streak: u64,
    pub total_comments: u64,
    pub total_support: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneCategory {
    Days,
    Progress,
    Reflections,
    Prayers,
    Verses,
    ActiveDays,
    Members,
    Studies,
    Streak,
    Comments,
    Support,
}

impl MilestoneCategory {
    /// The stats metric this category is measured against.
    pub fn metric(&self, stats: &CircleStats) -> u64 {
        match self {
            MilestoneCategory::Days => stats.total_days_completed,
            MilestoneCategory::Progress => stats.average_progress,
            MilestoneCategory::Reflections => stats.total_reflections,
            MilestoneCategory::Prayers => stats.total_prayers,
            MilestoneCategory::Verses => stats.total_verses,
            MilestoneCategory::ActiveDays => stats.active_days,
            MilestoneCategory::Members => stats.member_count,
            MilestoneCategory::Studies => stats.completed_studies,
            MilestoneCategory::Streak => stats.longest_streak,
            MilestoneCategory::Comments => stats.total_comments,
            MilestoneCategory::Support => stats.total_support,
        }
    }
}

/// One row of the static milestone catalog. The `threshold` gates the
/// milestone and doubles as the denominator for progress display.
#[derive(Debug, Clone, Copy)]
pub struct MilestoneDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: MilestoneCategory,
    pub threshold: u64,
}

impl MilestoneDef {
    pub fn satisfied(&self, stats: &CircleStats) -> bool {
        self.category.metric(stats) >= self.threshold
    }
}

/// Every milestone the stats currently satisfy.
pub fn satisfied_milestones<'a>(stats: &CircleStats) -> Vec<&'a MilestoneDef> {
    MILESTONES.iter().filter(|m| m.satisfied(stats)).collect()
}

/// Milestones satisfied by `curr` but not by `prev` — the set-difference
/// unlock check run whenever circle stats are recomputed.
pub fn new_milestones<'a>(prev: &CircleStats, curr: &CircleStats) -> Vec<&'a MilestoneDef> {
    MILESTONES
        .iter()
        .filter(|m| m.satisfied(curr) && !m.satisfied(prev))
        .collect()
}

/// The nearest incomplete milestone with its clamped progress percent.
#[derive(Debug, Clone, Serialize)]
pub struct NextMilestone {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: MilestoneCategory,
    pub threshold: u64,
    pub progress: u64,
    /// Clamped 0–100.
    pub percent: u64,
}

/// The single nearest incomplete milestone, sorted by threshold ascending,
/// optionally restricted to one category. `None` when everything (in the
/// category) is already satisfied.
pub fn next_milestone(
    stats: &CircleStats,
    category: Option<MilestoneCategory>,
) -> Option<NextMilestone> {
    let mut candidates: Vec<&MilestoneDef> = MILESTONES
        .iter()
        .filter(|m| category.map_or(true, |c| m.category == c))
        .filter(|m| !m.satisfied(stats))
        .collect();
    candidates.sort_by_key(|m| m.threshold);

    candidates.first().map(|m| {
        let progress = m.category.metric(stats);
        let percent = if m.threshold == 0 {
            100
        } else {
            (progress * 100 / m.threshold).min(100)
        };
        NextMilestone {
            id: m.id,
            title: m.title,
            description: m.description,
            category: m.category,
            threshold: m.threshold,
            progress,
            percent,
        }
    })
}
