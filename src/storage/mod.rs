// SPDX-License-Identifier: MIT
//! SQLite persistence for plans, days, streaks, and circles.
//!
//! WAL journal mode, idempotent inline schema creation, and an at-startup
//! capability probe for the `unlocked_achievements` column so the
//! orchestrator's best-effort achievement write is an explicit flag rather
//! than a runtime catch-and-ignore.

use anyhow::{anyhow, Context as _, Result};
use chrono::Utc;
use sqlx::{sqlite::SqliteConnectOptions, ConnectOptions, SqlitePool};
use std::{path::Path, str::FromStr};
use uuid::Uuid;

use crate::circles::CircleStats;

/// Default timeout for individual SQLite queries.
const QUERY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Execute a future with the standard query timeout.
async fn with_timeout<T>(fut: impl std::future::Future<Output = Result<T>>) -> Result<T> {
    match tokio::time::timeout(QUERY_TIMEOUT, fut).await {
        Ok(result) => result,
        Err(_) => Err(anyhow!(
            "database query timed out after {}s",
            QUERY_TIMEOUT.as_secs()
        )),
    }
}

// ─── Row types ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct PlanRow {
    pub id: String,
    pub user_id: String,
    pub title: Option<String>,
    /// 7 or 21.
    pub duration: i64,
    /// 'active' | 'completed'. Transitions active → completed exactly once.
    pub status: String,
    pub deleted_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct DayRow {
    pub id: String,
    pub plan_id: String,
    pub day_number: i64,
    pub completed: bool,
    /// RFC3339, NULL iff not completed.
    pub completed_at: Option<String>,
    pub verse_saved: bool,
    pub prayer_generated: bool,
    pub chat_engaged: bool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StreakRow {
    pub user_id: String,
    pub current_streak: i64,
    pub longest_streak: i64,
    /// RFC3339, UTC-midnight-normalized day of the last completion event.
    pub last_completed_at: Option<String>,
    pub total_plans_completed: i64,
    pub total_7day_completed: i64,
    pub total_21day_completed: i64,
    pub total_days_studied: i64,
    pub total_verses_from_plans: i64,
    pub total_prayers_from_plans: i64,
    /// JSON array of achievement ids. NULL on stores whose schema predates
    /// the column (see the capability probe).
    pub unlocked_achievements: Option<String>,
    pub updated_at: String,
}

impl StreakRow {
    /// Parse the persisted achievement-id list; tolerates NULL and garbage.
    pub fn achievement_ids(&self) -> Vec<String> {
        self.unlocked_achievements
            .as_deref()
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct CircleRow {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

// ─── Storage ──────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
    supports_achievements: bool,
}

impl Storage {
    pub async fn new(data_dir: &Path) -> Result<Self> {
        Self::new_with_slow_query(data_dir, 0).await
    }

    /// Create storage with slow-query logging enabled.
    ///
    /// `slow_query_ms` is the threshold in milliseconds — queries exceeding
    /// it are logged at WARN level. Set to 0 to disable.
    pub async fn new_with_slow_query(data_dir: &Path, slow_query_ms: u64) -> Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;
        let db_path = data_dir.join("selahd.db");
        let mut opts =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", db_path.display()))?
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .create_if_missing(true);

        if slow_query_ms > 0 {
            opts = opts.log_slow_statements(
                log::LevelFilter::Warn,
                std::time::Duration::from_millis(slow_query_ms),
            );
        }

        let pool = SqlitePool::connect_with(opts).await?;
        Self::migrate(&pool).await?;
        let supports_achievements = Self::probe_achievement_column(&pool).await?;
        if !supports_achievements {
            tracing::warn!(
                "study_streaks.unlocked_achievements column missing — \
                 achievement unlocks will be returned but not persisted"
            );
        }
        Ok(Self { pool, supports_achievements })
    }

    /// Return a clone of the connection pool (cheap — Arc-backed).
    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Whether the store can persist the unlocked-achievement list.
    /// Resolved once at startup; the orchestrator consults this instead of
    /// swallowing write errors.
    pub fn supports_achievement_persistence(&self) -> bool {
        self.supports_achievements
    }

    async fn migrate(pool: &SqlitePool) -> Result<()> {
        let ddl = [
            "CREATE TABLE IF NOT EXISTS study_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT,
                duration INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'active',
                deleted_at TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            "CREATE INDEX IF NOT EXISTS idx_plans_user ON study_plans(user_id)",
            "CREATE TABLE IF NOT EXISTS study_days (
                id TEXT PRIMARY KEY,
                plan_id TEXT NOT NULL,
                day_number INTEGER NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0,
                completed_at TEXT,
                verse_saved INTEGER NOT NULL DEFAULT 0,
                prayer_generated INTEGER NOT NULL DEFAULT 0,
                chat_engaged INTEGER NOT NULL DEFAULT 0,
                UNIQUE(plan_id, day_number)
            )",
            "CREATE TABLE IF NOT EXISTS study_streaks (
                user_id TEXT PRIMARY KEY,
                current_streak INTEGER NOT NULL DEFAULT 0,
                longest_streak INTEGER NOT NULL DEFAULT 0,
                last_completed_at TEXT,
                total_plans_completed INTEGER NOT NULL DEFAULT 0,
                total_7day_completed INTEGER NOT NULL DEFAULT 0,
                total_21day_completed INTEGER NOT NULL DEFAULT 0,
                total_days_studied INTEGER NOT NULL DEFAULT 0,
                total_verses_from_plans INTEGER NOT NULL DEFAULT 0,
                total_prayers_from_plans INTEGER NOT NULL DEFAULT 0,
                unlocked_achievements TEXT,
                updated_at TEXT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS circles (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS circle_members (
                circle_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                joined_at TEXT NOT NULL,
                PRIMARY KEY (circle_id, user_id)
            )",
            "CREATE TABLE IF NOT EXISTS circle_posts (
                id TEXT PRIMARY KEY,
                circle_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                kind TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS circle_comments (
                id TEXT PRIMARY KEY,
                post_id TEXT NOT NULL,
                circle_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS circle_reactions (
                id TEXT PRIMARY KEY,
                post_id TEXT NOT NULL,
                circle_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        ];
        for stmt in ddl {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .context("failed to create schema")?;
        }

        // Stores created before achievements shipped lack the
        // unlocked_achievements column. They are deliberately not migrated
        // here: the capability probe detects them and the orchestrator
        // degrades to return-but-don't-persist for unlocks.
        Ok(())
    }

    async fn probe_achievement_column(pool: &SqlitePool) -> Result<bool> {
        let cols: Vec<(i64, String, String, i64, Option<String>, i64)> =
            sqlx::query_as("PRAGMA table_info(study_streaks)")
                .fetch_all(pool)
                .await?;
        Ok(cols.iter().any(|(_, name, ..)| name == "unlocked_achievements"))
    }

    /// SELECT column list for streak rows, degrading to a NULL literal when
    /// the achievements column is absent so `query_as` still maps.
    fn streak_columns(&self) -> &'static str {
        if self.supports_achievements {
            "user_id, current_streak, longest_streak, last_completed_at,
             total_plans_completed, total_7day_completed, total_21day_completed,
             total_days_studied, total_verses_from_plans, total_prayers_from_plans,
             unlocked_achievements, updated_at"
        } else {
            "user_id, current_streak, longest_streak, last_completed_at,
             total_plans_completed, total_7day_completed, total_21day_completed,
             total_days_studied, total_verses_from_plans, total_prayers_from_plans,
             NULL AS unlocked_achievements, updated_at"
        }
    }

    // ─── Plans & days ─────────────────────────────────────────────────────────

    /// Create a plan and its dense 1..duration day rows in one transaction.
    pub async fn create_plan(
        &self,
        user_id: &str,
        title: Option<&str>,
        duration: u32,
    ) -> Result<PlanRow> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO study_plans (id, user_id, title, duration, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, 'active', ?, ?)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(title)
        .bind(duration as i64)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;
        for day_number in 1..=duration {
            sqlx::query(
                "INSERT INTO study_days (id, plan_id, day_number) VALUES (?, ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&id)
            .bind(day_number as i64)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        self.get_plan(&id)
            .await?
            .ok_or_else(|| anyhow!("plan not found after insert"))
    }

    pub async fn get_plan(&self, plan_id: &str) -> Result<Option<PlanRow>> {
        Ok(sqlx::query_as("SELECT * FROM study_plans WHERE id = ?")
            .bind(plan_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn list_plans(&self, user_id: &str) -> Result<Vec<PlanRow>> {
        with_timeout(async {
            Ok(sqlx::query_as(
                "SELECT * FROM study_plans
                 WHERE user_id = ? AND deleted_at IS NULL
                 ORDER BY created_at DESC",
            )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?)
        })
        .await
    }

    pub async fn list_days(&self, plan_id: &str) -> Result<Vec<DayRow>> {
        Ok(sqlx::query_as(
            "SELECT * FROM study_days WHERE plan_id = ? ORDER BY day_number ASC",
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?)
    }

    /// Write back a day's completion state and engagement flags.
    pub async fn update_day(&self, day: &DayRow) -> Result<()> {
        sqlx::query(
            "UPDATE study_days
             SET completed = ?, completed_at = ?, verse_saved = ?,
                 prayer_generated = ?, chat_engaged = ?
             WHERE id = ?",
        )
        .bind(day.completed)
        .bind(&day.completed_at)
        .bind(day.verse_saved)
        .bind(day.prayer_generated)
        .bind(day.chat_engaged)
        .bind(&day.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Persist one day-update event atomically: the day row, the streak
    /// counters, the optional plan completion, and the optional
    /// achievement-id list all commit together or not at all.
    ///
    /// Returns whether the plan transition fired. The guarded WHERE makes
    /// the transition fire at most once — a repeat (or a lost cross-process
    /// race) affects zero rows and returns false.
    pub async fn persist_day_update(
        &self,
        day: &DayRow,
        streak: &StreakRow,
        completed_plan_id: Option<&str>,
        unlocked_achievements: Option<&[String]>,
    ) -> Result<bool> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE study_days
             SET completed = ?, completed_at = ?, verse_saved = ?,
                 prayer_generated = ?, chat_engaged = ?
             WHERE id = ?",
        )
        .bind(day.completed)
        .bind(&day.completed_at)
        .bind(day.verse_saved)
        .bind(day.prayer_generated)
        .bind(day.chat_engaged)
        .bind(&day.id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE study_streaks
             SET current_streak = ?, longest_streak = ?, last_completed_at = ?,
                 total_plans_completed = ?, total_7day_completed = ?,
                 total_21day_completed = ?, total_days_studied = ?,
                 total_verses_from_plans = ?, total_prayers_from_plans = ?,
                 updated_at = ?
             WHERE user_id = ?",
        )
        .bind(streak.current_streak)
        .bind(streak.longest_streak)
        .bind(&streak.last_completed_at)
        .bind(streak.total_plans_completed)
        .bind(streak.total_7day_completed)
        .bind(streak.total_21day_completed)
        .bind(streak.total_days_studied)
        .bind(streak.total_verses_from_plans)
        .bind(streak.total_prayers_from_plans)
        .bind(&now)
        .bind(&streak.user_id)
        .execute(&mut *tx)
        .await?;

        let mut plan_fired = false;
        if let Some(plan_id) = completed_plan_id {
            let result = sqlx::query(
                "UPDATE study_plans SET status = 'completed', updated_at = ?
                 WHERE id = ? AND status = 'active' AND deleted_at IS NULL",
            )
            .bind(&now)
            .bind(plan_id)
            .execute(&mut *tx)
            .await?;
            plan_fired = result.rows_affected() > 0;
        }

        // Callers pass None on stores without the column (capability probe).
        if let Some(ids) = unlocked_achievements {
            let json = serde_json::to_string(ids)?;
            sqlx::query(
                "UPDATE study_streaks SET unlocked_achievements = ? WHERE user_id = ?",
            )
            .bind(&json)
            .bind(&streak.user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(plan_fired)
    }

    /// Soft-delete a plan. Soft-deleted plans are invisible to the
    /// orchestrator's validation step.
    pub async fn soft_delete_plan(&self, plan_id: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "UPDATE study_plans SET deleted_at = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&now)
        .bind(&now)
        .bind(plan_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // ─── Streaks ──────────────────────────────────────────────────────────────

    /// Fetch the user's streak record, creating a zeroed one on first use.
    pub async fn ensure_streak(&self, user_id: &str) -> Result<StreakRow> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO study_streaks (user_id, updated_at) VALUES (?, ?)
             ON CONFLICT(user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(&now)
        .execute(&self.pool)
        .await?;
        self.get_streak(user_id)
            .await?
            .ok_or_else(|| anyhow!("streak not found after upsert"))
    }

    pub async fn get_streak(&self, user_id: &str) -> Result<Option<StreakRow>> {
        let sql = format!(
            "SELECT {} FROM study_streaks WHERE user_id = ?",
            self.streak_columns()
        );
        Ok(sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Write back all streak counters. The achievement list is persisted
    /// only through [`Storage::persist_day_update`].
    pub async fn save_streak(&self, row: &StreakRow) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "UPDATE study_streaks
             SET current_streak = ?, longest_streak = ?, last_completed_at = ?,
                 total_plans_completed = ?, total_7day_completed = ?,
                 total_21day_completed = ?, total_days_studied = ?,
                 total_verses_from_plans = ?, total_prayers_from_plans = ?,
                 updated_at = ?
             WHERE user_id = ?",
        )
        .bind(row.current_streak)
        .bind(row.longest_streak)
        .bind(&row.last_completed_at)
        .bind(row.total_plans_completed)
        .bind(row.total_7day_completed)
        .bind(row.total_21day_completed)
        .bind(row.total_days_studied)
        .bind(row.total_verses_from_plans)
        .bind(row.total_prayers_from_plans)
        .bind(&now)
        .bind(&row.user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // ─── Circles ──────────────────────────────────────────────────────────────

    pub async fn create_circle(&self, name: &str) -> Result<CircleRow> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        sqlx::query("INSERT INTO circles (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(name)
            .bind(&now)
            .execute(&self.pool)
            .await?;
        self.get_circle(&id)
            .await?
            .ok_or_else(|| anyhow!("circle not found after insert"))
    }

    pub async fn get_circle(&self, circle_id: &str) -> Result<Option<CircleRow>> {
        Ok(sqlx::query_as("SELECT * FROM circles WHERE id = ?")
            .bind(circle_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn add_circle_member(&self, circle_id: &str, user_id: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO circle_members (circle_id, user_id, joined_at) VALUES (?, ?, ?)
             ON CONFLICT(circle_id, user_id) DO NOTHING",
        )
        .bind(circle_id)
        .bind(user_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Share content in a circle. `kind`: `"reflection"` | `"prayer"` | `"verse"`.
    pub async fn create_circle_post(
        &self,
        circle_id: &str,
        user_id: &str,
        kind: &str,
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO circle_posts (id, circle_id, user_id, kind, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(circle_id)
        .bind(user_id)
        .bind(kind)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    pub async fn add_circle_comment(
        &self,
        post_id: &str,
        circle_id: &str,
        user_id: &str,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO circle_comments (id, post_id, circle_id, user_id, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(post_id)
        .bind(circle_id)
        .bind(user_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Record a "support" tap on a post.
    pub async fn add_circle_support(
        &self,
        post_id: &str,
        circle_id: &str,
        user_id: &str,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO circle_reactions (id, post_id, circle_id, user_id, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(post_id)
        .bind(circle_id)
        .bind(user_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Compute circle-wide statistics on demand from the members' plans and
    /// shared content. Returns `None` when the circle does not exist.
    /// Read-only — no mutation side effects.
    pub async fn circle_stats(&self, circle_id: &str) -> Result<Option<CircleStats>> {
        if self.get_circle(circle_id).await?.is_none() {
            return Ok(None);
        }

        with_timeout(async {
            let member_count: (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM circle_members WHERE circle_id = ?",
            )
            .bind(circle_id)
            .fetch_one(&self.pool)
            .await?;

            let total_days_completed: (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM study_days d
                 JOIN study_plans p ON p.id = d.plan_id
                 JOIN circle_members m ON m.user_id = p.user_id
                 WHERE m.circle_id = ? AND d.completed = 1 AND p.deleted_at IS NULL",
            )
            .bind(circle_id)
            .fetch_one(&self.pool)
            .await?;

            // Distinct UTC dates on which any member completed a study day.
            let active_days: (i64,) = sqlx::query_as(
                "SELECT COUNT(DISTINCT date(d.completed_at)) FROM study_days d
                 JOIN study_plans p ON p.id = d.plan_id
                 JOIN circle_members m ON m.user_id = p.user_id
                 WHERE m.circle_id = ? AND d.completed = 1
                   AND d.completed_at IS NOT NULL AND p.deleted_at IS NULL",
            )
            .bind(circle_id)
            .fetch_one(&self.pool)
            .await?;

            // Mean per-plan completion percentage across members' live plans.
            let average_progress: (Option<f64>,) = sqlx::query_as(
                "SELECT AVG(pct) FROM (
                     SELECT CAST(SUM(d.completed) AS REAL) * 100.0 / p.duration AS pct
                     FROM study_plans p
                     JOIN study_days d ON d.plan_id = p.id
                     JOIN circle_members m ON m.user_id = p.user_id
                     WHERE m.circle_id = ? AND p.deleted_at IS NULL
                     GROUP BY p.id
                 )",
            )
            .bind(circle_id)
            .fetch_one(&self.pool)
            .await?;

            let completed_studies: (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM study_plans p
                 JOIN circle_members m ON m.user_id = p.user_id
                 WHERE m.circle_id = ? AND p.status = 'completed' AND p.deleted_at IS NULL",
            )
            .bind(circle_id)
            .fetch_one(&self.pool)
            .await?;

            let longest_streak: (Option<i64>,) = sqlx::query_as(
                "SELECT MAX(s.longest_streak) FROM study_streaks s
                 JOIN circle_members m ON m.user_id = s.user_id
                 WHERE m.circle_id = ?",
            )
            .bind(circle_id)
            .fetch_one(&self.pool)
            .await?;

            let posts_by_kind = |kind: &'static str| {
                let pool = self.pool.clone();
                let circle_id = circle_id.to_string();
                async move {
                    let row: (i64,) = sqlx::query_as(
                        "SELECT COUNT(*) FROM circle_posts WHERE circle_id = ? AND kind = ?",
                    )
                    .bind(&circle_id)
                    .bind(kind)
                    .fetch_one(&pool)
                    .await?;
                    Ok::<i64, anyhow::Error>(row.0)
                }
            };
            let total_reflections = posts_by_kind("reflection").await?;
            let total_prayers = posts_by_kind("prayer").await?;
            let total_verses = posts_by_kind("verse").await?;

            let total_comments: (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM circle_comments WHERE circle_id = ?",
            )
            .bind(circle_id)
            .fetch_one(&self.pool)
            .await?;

            let total_support: (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM circle_reactions WHERE circle_id = ?",
            )
            .bind(circle_id)
            .fetch_one(&self.pool)
            .await?;

            Ok(Some(CircleStats {
                total_days_completed: total_days_completed.0 as u64,
                average_progress: average_progress.0.unwrap_or(0.0).round() as u64,
                total_reflections: total_reflections as u64,
                total_prayers: total_prayers as u64,
                total_verses: total_verses as u64,
                active_days: active_days.0 as u64,
                member_count: member_count.0 as u64,
                completed_studies: completed_studies.0 as u64,
                longest_streak: longest_streak.0.unwrap_or(0) as u64,
                total_comments: total_comments.0 as u64,
                total_support: total_support.0 as u64,
            }))
        })
        .await
    }
}
