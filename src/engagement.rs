// SPDX-License-Identifier: MIT
//! Engagement scoring — weighted per-day completeness and the plan-level
//! aggregate.
//!
//! Weights are fixed product constants, not configuration: completing the
//! day is worth 40 points, each of the three enrichment signals 20. The
//! plan score is always recomputed from full plan state so it self-corrects
//! when individual day flags change out of order.

/// The four boolean signals scored for one study day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaySignals {
    pub completed: bool,
    pub verse_saved: bool,
    pub prayer_generated: bool,
    pub chat_engaged: bool,
}

const COMPLETED_WEIGHT: u32 = 40;
const SIGNAL_WEIGHT: u32 = 20;

/// Score one day: 0–100.
pub fn day_score(day: &DaySignals) -> u32 {
    let mut score = 0;
    if day.completed {
        score += COMPLETED_WEIGHT;
    }
    if day.verse_saved {
        score += SIGNAL_WEIGHT;
    }
    if day.prayer_generated {
        score += SIGNAL_WEIGHT;
    }
    if day.chat_engaged {
        score += SIGNAL_WEIGHT;
    }
    score
}

/// Plan-level engagement score: the arithmetic mean of day scores, rounded
/// to the nearest integer. Empty plans score 0.
pub fn plan_score(days: &[DaySignals]) -> u32 {
    if days.is_empty() {
        return 0;
    }
    let total: u32 = days.iter().map(day_score).sum();
    // round(total / len) in integer math
    (total + days.len() as u32 / 2) / days.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(completed: bool, verse: bool, prayer: bool, chat: bool) -> DaySignals {
        DaySignals { completed, verse_saved: verse, prayer_generated: prayer, chat_engaged: chat }
    }

    #[test]
    fn completed_only_scores_forty() {
        assert_eq!(day_score(&day(true, false, false, false)), 40);
    }

    #[test]
    fn all_signals_score_hundred() {
        assert_eq!(day_score(&day(true, true, true, true)), 100);
    }

    #[test]
    fn signals_without_completion_still_count() {
        // Only `completed` is required for *completion* credit; the other
        // weights apply independently.
        assert_eq!(day_score(&day(false, true, true, false)), 40);
        assert_eq!(day_score(&DaySignals::default()), 0);
    }

    #[test]
    fn plan_score_is_rounded_mean() {
        // One fully engaged day out of seven: 100/7 = 14.28… → 14.
        let mut days = vec![DaySignals::default(); 7];
        days[0] = day(true, true, true, true);
        assert_eq!(plan_score(&days), 14);

        // 40 + 100 over two days → 70.
        assert_eq!(plan_score(&[day(true, false, false, false), day(true, true, true, true)]), 70);
    }

    #[test]
    fn plan_score_rounds_half_up() {
        // 100 + 40 + 40 + 40 + 40 + 40 over 6 days = 300/6 = 50 exactly,
        // then a trickier one: 100 + 40 over 3 days = 46.67 → 47.
        let days = [day(true, true, true, true), day(true, false, false, false), DaySignals::default()];
        assert_eq!(plan_score(&days), 47);
    }

    #[test]
    fn empty_plan_scores_zero() {
        assert_eq!(plan_score(&[]), 0);
    }
}
