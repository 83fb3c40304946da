// ABOUTME: Daily streak computation over workout calendar dates
// ABOUTME: Counts the leading run of consecutive days in newest-first order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;

/// Maximum distance in days between two dates of the same streak
const MAX_STREAK_GAP_DAYS: i64 = 1;

/// Streak calculations
pub struct StreakCalculator;

impl StreakCalculator {
    /// Length of the most recent run of consecutive workout days
    ///
    /// Dates are sorted newest-first and deduplicated; the run ends at the
    /// first gap wider than one day. The run is anchored at the newest
    /// workout date, not at today: a run that ended last week still counts.
    /// No dates yields 0.
    #[must_use]
    pub fn current_daily_streak(dates: &[NaiveDate]) -> u32 {
        let mut distinct = dates.to_vec();
        distinct.sort_unstable_by(|a, b| b.cmp(a));
        distinct.dedup();

        if distinct.is_empty() {
            return 0;
        }

        let gap = distinct
            .windows(2)
            .position(|pair| (pair[0] - pair[1]).num_days() > MAX_STREAK_GAP_DAYS);

        let length = gap.map_or(distinct.len(), |offset| offset + 1);
        u32::try_from(length).unwrap_or(u32::MAX)
    }
}
