//! Circle statistics aggregation over a real SQLite store in a TempDir.

use chrono::{DateTime, Duration, Utc};
use selahd::circles::{self, MilestoneCategory};
use selahd::progress::{apply_day_update, DayUpdateRequest, KeyedLocks};
use selahd::storage::Storage;
use tempfile::TempDir;

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn complete() -> DayUpdateRequest {
    DayUpdateRequest { completed: true, engagement: None }
}

/// Mark the first `count` days of a plan completed, all stamped with the
/// same calendar date, bypassing the orchestrator. Aggregation tests only
/// care about the rows, not the streak bookkeeping.
async fn mark_days(storage: &Storage, plan_id: &str, count: usize, stamp: &str) {
    let days = storage.list_days(plan_id).await.unwrap();
    for day in days.into_iter().take(count) {
        let mut day = day;
        day.completed = true;
        day.completed_at = Some(stamp.to_string());
        storage.update_day(&day).await.unwrap();
    }
}

#[tokio::test]
async fn stats_aggregate_members_plans_and_posts() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path()).await.unwrap();
    let locks = KeyedLocks::new();

    let circle = storage.create_circle("Morning Light").await.unwrap();
    storage.add_circle_member(&circle.id, "alice").await.unwrap();
    storage.add_circle_member(&circle.id, "bob").await.unwrap();
    // Joining twice is a no-op.
    storage.add_circle_member(&circle.id, "bob").await.unwrap();

    // Alice: 3 of 7 days, May 1–3.
    let alice_plan = storage.create_plan("alice", Some("Psalms"), 7).await.unwrap();
    let mut now = ts("2024-05-01T08:00:00Z");
    for day in 1..=3 {
        apply_day_update(&storage, &locks, "alice", &alice_plan.id, day, &complete(), now)
            .await
            .unwrap();
        now += Duration::days(1);
    }

    // Bob: a full 7-day plan, May 1–7.
    let bob_plan = storage.create_plan("bob", None, 7).await.unwrap();
    let mut now = ts("2024-05-01T09:00:00Z");
    for day in 1..=7 {
        apply_day_update(&storage, &locks, "bob", &bob_plan.id, day, &complete(), now)
            .await
            .unwrap();
        now += Duration::days(1);
    }

    // Carol is not a member; her work must not leak into the stats.
    let carol_plan = storage.create_plan("carol", None, 7).await.unwrap();
    mark_days(&storage, &carol_plan.id, 7, "2024-05-01T10:00:00Z").await;

    let post = storage.create_circle_post(&circle.id, "alice", "reflection").await.unwrap();
    storage.create_circle_post(&circle.id, "bob", "reflection").await.unwrap();
    storage.create_circle_post(&circle.id, "bob", "prayer").await.unwrap();
    storage.create_circle_post(&circle.id, "alice", "verse").await.unwrap();
    storage.add_circle_comment(&post, &circle.id, "bob").await.unwrap();
    storage.add_circle_comment(&post, &circle.id, "alice").await.unwrap();
    storage.add_circle_support(&post, &circle.id, "bob").await.unwrap();

    let stats = storage.circle_stats(&circle.id).await.unwrap().unwrap();
    assert_eq!(stats.member_count, 2);
    assert_eq!(stats.total_days_completed, 10);
    // Alice's 3 dates are a subset of Bob's 7.
    assert_eq!(stats.active_days, 7);
    // Mean of 3/7 (≈42.9%) and 7/7 rounds to 71.
    assert_eq!(stats.average_progress, 71);
    assert_eq!(stats.completed_studies, 1);
    assert_eq!(stats.longest_streak, 7);
    assert_eq!(stats.total_reflections, 2);
    assert_eq!(stats.total_prayers, 1);
    assert_eq!(stats.total_verses, 1);
    assert_eq!(stats.total_comments, 2);
    assert_eq!(stats.total_support, 1);
}

#[tokio::test]
async fn century_club_fires_when_the_hundredth_day_lands() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path()).await.unwrap();

    let circle = storage.create_circle("Long Haul").await.unwrap();
    storage.add_circle_member(&circle.id, "alice").await.unwrap();

    // Five 21-day plans give 105 day rows; fill the first 99.
    let mut plan_ids = Vec::new();
    for _ in 0..5 {
        plan_ids.push(storage.create_plan("alice", None, 21).await.unwrap().id);
    }
    let stamp = "2024-05-01T08:00:00Z";
    for id in plan_ids.iter().take(4) {
        mark_days(&storage, id, 21, stamp).await;
    }
    mark_days(&storage, &plan_ids[4], 15, stamp).await;

    let before = storage.circle_stats(&circle.id).await.unwrap().unwrap();
    assert_eq!(before.total_days_completed, 99);

    let next = circles::next_milestone(&before, Some(MilestoneCategory::Days)).unwrap();
    assert_eq!(next.id, "century_club");
    assert_eq!(next.progress, 99);
    assert_eq!(next.percent, 99);

    // One more day crosses the line.
    let days = storage.list_days(&plan_ids[4]).await.unwrap();
    let mut day = days[15].clone();
    day.completed = true;
    day.completed_at = Some(stamp.to_string());
    storage.update_day(&day).await.unwrap();

    let after = storage.circle_stats(&circle.id).await.unwrap().unwrap();
    assert_eq!(after.total_days_completed, 100);

    let fired = circles::new_milestones(&before, &after);
    assert_eq!(fired.len(), 1, "only the crossed milestone fires");
    assert_eq!(fired[0].id, "century_club");
}

#[tokio::test]
async fn unknown_circle_yields_none_and_empty_circle_yields_zeros() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path()).await.unwrap();

    assert!(storage.circle_stats("missing").await.unwrap().is_none());

    let circle = storage.create_circle("Fresh Start").await.unwrap();
    let stats = storage.circle_stats(&circle.id).await.unwrap().unwrap();
    assert_eq!(stats, circles::CircleStats::default());

    // With nothing satisfied, the nearest milestone overall is the
    // lowest-threshold entry in the catalog.
    let next = circles::next_milestone(&stats, None).unwrap();
    assert_eq!(next.id, "growing_circle");
    assert_eq!(next.percent, 0);
}
