// SPDX-License-Identifier: MIT
//! The static achievement catalog.
//!
//! Entries are never removed — unlocked ids persisted against old catalog
//! versions must keep resolving. Order within the table has no effect on
//! evaluation.

use super::{AchievementDef, Category, Condition, Tier};

pub const CATALOG: &[AchievementDef] = &[
    // ─── Streak ──────────────────────────────────────────────────────────
    AchievementDef {
        id: "streak_starter",
        title: "Streak Starter",
        description: "Study 3 days in a row",
        tier: Tier::Bronze,
        category: Category::Streak,
        condition: Condition::CurrentStreakAtLeast(3),
    },
    AchievementDef {
        id: "week_of_fire",
        title: "Week of Fire",
        description: "Keep a 7-day streak alive",
        tier: Tier::Silver,
        category: Category::Streak,
        condition: Condition::CurrentStreakAtLeast(7),
    },
    AchievementDef {
        id: "fortnight_faithful",
        title: "Fortnight Faithful",
        description: "Keep a 14-day streak alive",
        tier: Tier::Gold,
        category: Category::Streak,
        condition: Condition::CurrentStreakAtLeast(14),
    },
    AchievementDef {
        id: "unbroken_month",
        title: "Unbroken Month",
        description: "Keep a 30-day streak alive",
        tier: Tier::Platinum,
        category: Category::Streak,
        condition: Condition::CurrentStreakAtLeast(30),
    },
    AchievementDef {
        id: "personal_best",
        title: "Personal Best",
        description: "Reach a longest streak of 21 days",
        tier: Tier::Gold,
        category: Category::Streak,
        condition: Condition::LongestStreakAtLeast(21),
    },
    // ─── Completion ──────────────────────────────────────────────────────
    AchievementDef {
        id: "first_plan",
        title: "First Steps",
        description: "Complete your first study plan",
        tier: Tier::Bronze,
        category: Category::Completion,
        condition: Condition::PlansCompletedAtLeast(1),
    },
    AchievementDef {
        id: "week_walker",
        title: "Week Walker",
        description: "Complete a 7-day plan",
        tier: Tier::Bronze,
        category: Category::Completion,
        condition: Condition::SevenDayPlansAtLeast(1),
    },
    AchievementDef {
        id: "deep_diver",
        title: "Deep Diver",
        description: "Complete a 21-day plan",
        tier: Tier::Silver,
        category: Category::Completion,
        condition: Condition::TwentyOneDayPlansAtLeast(1),
    },
    AchievementDef {
        id: "five_plans",
        title: "Steady Scholar",
        description: "Complete 5 study plans",
        tier: Tier::Gold,
        category: Category::Completion,
        condition: Condition::PlansCompletedAtLeast(5),
    },
    AchievementDef {
        id: "ten_plans",
        title: "Devoted Disciple",
        description: "Complete 10 study plans",
        tier: Tier::Platinum,
        category: Category::Completion,
        condition: Condition::PlansCompletedAtLeast(10),
    },
    // ─── Engagement ──────────────────────────────────────────────────────
    AchievementDef {
        id: "seven_days",
        title: "A Week in the Word",
        description: "Study on 7 different days",
        tier: Tier::Bronze,
        category: Category::Engagement,
        condition: Condition::DaysStudiedAtLeast(7),
    },
    AchievementDef {
        id: "thirty_days",
        title: "Thirty Days Deep",
        description: "Study on 30 different days",
        tier: Tier::Silver,
        category: Category::Engagement,
        condition: Condition::DaysStudiedAtLeast(30),
    },
    AchievementDef {
        id: "hundred_days",
        title: "Hundredfold",
        description: "Study on 100 different days",
        tier: Tier::Gold,
        category: Category::Engagement,
        condition: Condition::DaysStudiedAtLeast(100),
    },
    AchievementDef {
        id: "year_of_study",
        title: "Year of Study",
        description: "Study on 365 different days",
        tier: Tier::Platinum,
        category: Category::Engagement,
        condition: Condition::DaysStudiedAtLeast(365),
    },
    // ─── Depth ───────────────────────────────────────────────────────────
    AchievementDef {
        id: "verse_keeper",
        title: "Verse Keeper",
        description: "Save 10 verses from your plans",
        tier: Tier::Bronze,
        category: Category::Depth,
        condition: Condition::VersesSavedAtLeast(10),
    },
    AchievementDef {
        id: "verse_treasury",
        title: "Verse Treasury",
        description: "Save 50 verses from your plans",
        tier: Tier::Gold,
        category: Category::Depth,
        condition: Condition::VersesSavedAtLeast(50),
    },
    AchievementDef {
        id: "prayer_warrior",
        title: "Prayer Warrior",
        description: "Generate 10 prayers from your plans",
        tier: Tier::Bronze,
        category: Category::Depth,
        condition: Condition::PrayersGeneratedAtLeast(10),
    },
    AchievementDef {
        id: "prayer_pillar",
        title: "Pillar of Prayer",
        description: "Generate 50 prayers from your plans",
        tier: Tier::Gold,
        category: Category::Depth,
        condition: Condition::PrayersGeneratedAtLeast(50),
    },
];
