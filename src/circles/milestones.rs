// SPDX-License-Identifier: MIT
//! The static circle milestone catalog.

use super::{MilestoneCategory, MilestoneDef};

pub const MILESTONES: &[MilestoneDef] = &[
    // ─── Collective study days ───────────────────────────────────────────
    MilestoneDef {
        id: "century_club",
        title: "Century Club",
        description: "100 study days completed together",
        category: MilestoneCategory::Days,
        threshold: 100,
    },
    MilestoneDef {
        id: "five_hundred_days",
        title: "Five Hundred Strong",
        description: "500 study days completed together",
        category: MilestoneCategory::Days,
        threshold: 500,
    },
    MilestoneDef {
        id: "thousand_days",
        title: "A Thousand Days",
        description: "1,000 study days completed together",
        category: MilestoneCategory::Days,
        threshold: 1000,
    },
    // ─── Membership ──────────────────────────────────────────────────────
    MilestoneDef {
        id: "growing_circle",
        title: "Growing Circle",
        description: "3 members gathered",
        category: MilestoneCategory::Members,
        threshold: 3,
    },
    MilestoneDef {
        id: "full_table",
        title: "Full Table",
        description: "12 members gathered",
        category: MilestoneCategory::Members,
        threshold: 12,
    },
    // ─── Shared content ──────────────────────────────────────────────────
    MilestoneDef {
        id: "first_reflections",
        title: "Open Hearts",
        description: "25 reflections shared",
        category: MilestoneCategory::Reflections,
        threshold: 25,
    },
    MilestoneDef {
        id: "reflection_river",
        title: "River of Reflection",
        description: "100 reflections shared",
        category: MilestoneCategory::Reflections,
        threshold: 100,
    },
    MilestoneDef {
        id: "prayer_circle",
        title: "Prayer Circle",
        description: "50 prayers lifted together",
        category: MilestoneCategory::Prayers,
        threshold: 50,
    },
    MilestoneDef {
        id: "verse_vault",
        title: "Verse Vault",
        description: "75 verses saved by the circle",
        category: MilestoneCategory::Verses,
        threshold: 75,
    },
    // ─── Faithfulness ────────────────────────────────────────────────────
    MilestoneDef {
        id: "forty_active_days",
        title: "Forty Days Together",
        description: "Active on 40 different days",
        category: MilestoneCategory::ActiveDays,
        threshold: 40,
    },
    MilestoneDef {
        id: "circle_streak_14",
        title: "Kindled Flame",
        description: "A member carried a 14-day streak",
        category: MilestoneCategory::Streak,
        threshold: 14,
    },
    MilestoneDef {
        id: "ten_studies",
        title: "Ten Studies Finished",
        description: "10 plans completed across the circle",
        category: MilestoneCategory::Studies,
        threshold: 10,
    },
    MilestoneDef {
        id: "halfway_everywhere",
        title: "Halfway Everywhere",
        description: "Average plan progress above 50%",
        category: MilestoneCategory::Progress,
        threshold: 50,
    },
    // ─── Encouragement ───────────────────────────────────────────────────
    MilestoneDef {
        id: "hundred_comments",
        title: "Rich Conversation",
        description: "100 comments exchanged",
        category: MilestoneCategory::Comments,
        threshold: 100,
    },
    MilestoneDef {
        id: "support_shower",
        title: "Shower of Support",
        description: "200 supports given",
        category: MilestoneCategory::Support,
        threshold: 200,
    },
];
