// SPDX-License-Identifier: MIT
//! Progress orchestrator — the request-level coordinator for one
//! (user, plan, day) mutation.
//!
//! Validate → load → mutate → persist → respond, with every step for a
//! given (user, plan) pair serialized behind a keyed async mutex so a
//! read-then-write never interleaves with another request for the same
//! plan. Counter drift across *processes* sharing the store remains
//! possible (no version column to compare-and-swap on); see DESIGN.md.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use crate::achievements::{self, StatsSnapshot};
use crate::engagement::{self, DaySignals};
use crate::error::ApiError;
use crate::storage::{DayRow, Storage, StreakRow};
use crate::streak::{self, StreakMilestone, StreakState};

// ─── Keyed locks ──────────────────────────────────────────────────────────────

/// Per-key async mutexes. One lock per (user, plan) pair, created lazily
/// and never evicted — the key space is bounded by active users.
#[derive(Default)]
pub struct KeyedLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            map.entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

// ─── Wire types ───────────────────────────────────────────────────────────────

/// `PATCH /plans/{plan_id}/days/{day_number}` body.
///
/// Engagement flags are optional on purpose: an absent field means "leave
/// unchanged", which is distinct from an explicit `false`. The flags are
/// monotonic — even an explicit `false` never resets one that is already
/// set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayUpdateRequest {
    pub completed: bool,
    #[serde(default)]
    pub engagement: Option<EngagementUpdate>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EngagementUpdate {
    #[serde(default)]
    pub verse_saved: Option<bool>,
    #[serde(default)]
    pub prayer_generated: Option<bool>,
    #[serde(default)]
    pub chat_engaged: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ProgressSummary {
    pub completed_days: u32,
    pub total_days: u32,
    pub percent_complete: u32,
    pub engagement_score: u32,
}

#[derive(Debug, Serialize)]
pub struct StreakSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub new_milestone: Option<MilestoneSignal>,
}

/// Response-time celebration signal — never persisted.
#[derive(Debug, Serialize)]
pub struct MilestoneSignal {
    pub id: &'static str,
    pub days: u32,
    pub title: &'static str,
}

impl From<StreakMilestone> for MilestoneSignal {
    fn from(m: StreakMilestone) -> Self {
        Self { id: m.id, days: m.days, title: m.title }
    }
}

#[derive(Debug, Serialize)]
pub struct UnlockedAchievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tier: achievements::Tier,
    pub category: achievements::Category,
}

#[derive(Debug, Serialize)]
pub struct DayUpdateResponse {
    pub day: DayRow,
    pub progress: ProgressSummary,
    pub streak: StreakSummary,
    pub new_achievements: Vec<UnlockedAchievement>,
    pub plan_completed: bool,
}

// ─── Row/domain conversions ───────────────────────────────────────────────────

fn streak_state_of(row: &StreakRow) -> StreakState {
    StreakState {
        current_streak: row.current_streak.max(0) as u32,
        longest_streak: row.longest_streak.max(0) as u32,
        last_completed_at: row
            .last_completed_at
            .as_deref()
            .and_then(|s| s.parse::<DateTime<Utc>>().ok()),
        total_days_studied: row.total_days_studied.max(0) as u32,
    }
}

fn write_streak_state(state: &StreakState, row: &mut StreakRow) {
    row.current_streak = state.current_streak as i64;
    row.longest_streak = state.longest_streak as i64;
    row.last_completed_at = state.last_completed_at.map(|t| t.to_rfc3339());
    row.total_days_studied = state.total_days_studied as i64;
}

fn snapshot_of(row: &StreakRow) -> StatsSnapshot {
    StatsSnapshot {
        current_streak: row.current_streak.max(0) as u32,
        longest_streak: row.longest_streak.max(0) as u32,
        total_plans_completed: row.total_plans_completed.max(0) as u32,
        total_7day_completed: row.total_7day_completed.max(0) as u32,
        total_21day_completed: row.total_21day_completed.max(0) as u32,
        total_days_studied: row.total_days_studied.max(0) as u32,
        total_verses_from_plans: row.total_verses_from_plans.max(0) as u32,
        total_prayers_from_plans: row.total_prayers_from_plans.max(0) as u32,
    }
}

fn signals_of(day: &DayRow) -> DaySignals {
    DaySignals {
        completed: day.completed,
        verse_saved: day.verse_saved,
        prayer_generated: day.prayer_generated,
        chat_engaged: day.chat_engaged,
    }
}

// ─── The orchestrator ─────────────────────────────────────────────────────────

/// Apply one completion/un-completion event to a plan day.
///
/// `now` is injected for testability; production callers pass `Utc::now()`.
pub async fn apply_day_update(
    storage: &Storage,
    locks: &KeyedLocks,
    user_id: &str,
    plan_id: &str,
    day_number: u32,
    req: &DayUpdateRequest,
    now: DateTime<Utc>,
) -> Result<DayUpdateResponse, ApiError> {
    if day_number == 0 {
        return Err(ApiError::InvalidPayload("day_number must be at least 1".into()));
    }

    let _guard = locks.acquire(&format!("{user_id}:{plan_id}")).await;

    // ── Validate ────────────────────────────────────────────────────────
    let plan = storage
        .get_plan(plan_id)
        .await?
        .filter(|p| p.user_id == user_id && p.deleted_at.is_none())
        .ok_or_else(|| ApiError::NotFound("plan not found".into()))?;
    if plan.status != "active" {
        return Err(ApiError::NotFound("plan is not active".into()));
    }

    // ── Load ────────────────────────────────────────────────────────────
    let mut days = storage.list_days(plan_id).await?;
    let day_idx = days
        .iter()
        .position(|d| d.day_number == day_number as i64)
        .ok_or(ApiError::InvalidDay(day_number))?;
    let mut streak_row = storage.ensure_streak(user_id).await?;
    let already_unlocked = streak_row.achievement_ids();
    let prev_snapshot = snapshot_of(&streak_row);

    // ── Mutate (in memory) ──────────────────────────────────────────────
    let was_completed = days[day_idx].completed;
    {
        let day = &mut days[day_idx];
        day.completed = req.completed;
        day.completed_at = req.completed.then(|| now.to_rfc3339());

        if let Some(upd) = req.engagement {
            // Monotonic flags: only an explicit `true` lands; `false` and
            // absent both mean "leave unchanged".
            if upd.verse_saved == Some(true) && !day.verse_saved {
                day.verse_saved = true;
                streak_row.total_verses_from_plans += 1;
            }
            if upd.prayer_generated == Some(true) && !day.prayer_generated {
                day.prayer_generated = true;
                streak_row.total_prayers_from_plans += 1;
            }
            if upd.chat_engaged == Some(true) {
                day.chat_engaged = true;
            }
        }
    }

    let mut new_milestone = None;
    if req.completed {
        // Every completion event runs the full date logic; a same-day
        // repeat is absorbed by the delta == 0 branch.
        let update = streak::apply_completion(&streak_state_of(&streak_row), now);
        new_milestone = update.milestone.map(MilestoneSignal::from);
        write_streak_state(&update.streak, &mut streak_row);
        if update.new_day {
            debug!(user_id, total_days = streak_row.total_days_studied, "new study day logged");
        }
    } else if was_completed {
        let after = streak::apply_uncompletion(&streak_state_of(&streak_row));
        write_streak_state(&after, &mut streak_row);
    }

    let signals: Vec<DaySignals> = days.iter().map(signals_of).collect();
    let engagement_score = engagement::plan_score(&signals);
    let completed_days = days.iter().filter(|d| d.completed).count() as u32;
    let total_days = days.len() as u32;
    let all_complete = completed_days == total_days;

    // Plan completion is decided before the achievement diff so that
    // plan-completion achievements fire in the same response as the day
    // event that caused them. The status itself never reverts.
    let newly_completed = all_complete && plan.status == "active";
    if newly_completed {
        streak_row.total_plans_completed += 1;
        match plan.duration {
            7 => streak_row.total_7day_completed += 1,
            21 => streak_row.total_21day_completed += 1,
            other => warn!(plan_id, duration = other, "plan has non-standard duration"),
        }
    }

    let new_snapshot = snapshot_of(&streak_row);
    let fresh = achievements::newly_unlocked(&prev_snapshot, &new_snapshot, &already_unlocked);

    // Best-effort achievement-list persistence, gated by the startup
    // capability probe. The response carries the computed unlocks either
    // way — it is the source of truth for the UI.
    let achievement_ids = if fresh.is_empty() {
        None
    } else if storage.supports_achievement_persistence() {
        let mut ids = already_unlocked;
        ids.extend(fresh.iter().map(|a| a.id.to_string()));
        Some(ids)
    } else {
        warn!(
            user_id,
            count = fresh.len(),
            "achievement unlocks computed but not persisted (column unsupported)"
        );
        None
    };

    // ── Persist — one transaction so day and streak move together ───────
    let fired = storage
        .persist_day_update(
            &days[day_idx],
            &streak_row,
            newly_completed.then_some(plan_id),
            achievement_ids.as_deref(),
        )
        .await?;
    if fired {
        info!(user_id, plan_id, duration = plan.duration, "plan completed");
    }

    // ── Respond ─────────────────────────────────────────────────────────
    Ok(DayUpdateResponse {
        day: days[day_idx].clone(),
        progress: ProgressSummary {
            completed_days,
            total_days,
            percent_complete: if total_days == 0 { 0 } else { completed_days * 100 / total_days },
            engagement_score,
        },
        streak: StreakSummary {
            current_streak: streak_row.current_streak.max(0) as u32,
            longest_streak: streak_row.longest_streak.max(0) as u32,
            new_milestone,
        },
        new_achievements: fresh
            .into_iter()
            .map(|a| UnlockedAchievement {
                id: a.id,
                title: a.title,
                description: a.description,
                tier: a.tier,
                category: a.category,
            })
            .collect(),
        plan_completed: all_complete,
    })
}

/// Read-side plan overview used by `GET /plans/{id}`.
pub async fn plan_overview(
    storage: &Storage,
    user_id: &str,
    plan_id: &str,
) -> Result<(crate::storage::PlanRow, Vec<DayRow>, ProgressSummary), ApiError> {
    let plan = storage
        .get_plan(plan_id)
        .await?
        .filter(|p| p.user_id == user_id && p.deleted_at.is_none())
        .ok_or_else(|| ApiError::NotFound("plan not found".into()))?;
    let days = storage.list_days(plan_id).await?;
    let signals: Vec<DaySignals> = days.iter().map(signals_of).collect();
    let completed_days = days.iter().filter(|d| d.completed).count() as u32;
    let total_days = days.len() as u32;
    let summary = ProgressSummary {
        completed_days,
        total_days,
        percent_complete: if total_days == 0 { 0 } else { completed_days * 100 / total_days },
        engagement_score: engagement::plan_score(&signals),
    };
    Ok((plan, days, summary))
}

/// Read-side streak overview used by `GET /streaks/me`: the streak record
/// plus the "almost there" achievement list.
pub async fn streak_overview(
    storage: &Storage,
    user_id: &str,
    next_limit: usize,
) -> Result<(StreakRow, Vec<achievements::AchievementProgress>), ApiError> {
    let row = storage.ensure_streak(user_id).await?;
    let next = achievements::next_achievements(&snapshot_of(&row), &row.achievement_ids(), next_limit);
    Ok((row, next))
}
