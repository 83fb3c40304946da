// ABOUTME: Linear run-rate projection of annual workout minutes
// ABOUTME: Single-point estimate plus a cumulative per-day series for charting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of days in `year`
#[must_use]
pub fn days_in_year(year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, 12, 31).map_or(365, |last| last.ordinal())
}

/// Minutes projected for the whole year at the current run rate
#[must_use]
pub fn eoy_estimate(accumulated_minutes: f64, day_of_year: u32, days_in_year: u32) -> f64 {
    if day_of_year == 0 {
        return 0.0;
    }
    accumulated_minutes / f64::from(day_of_year) * f64::from(days_in_year)
}

/// Run-rate estimate as of `date`
#[must_use]
pub fn eoy_estimate_on(accumulated_minutes: f64, date: NaiveDate) -> f64 {
    eoy_estimate(accumulated_minutes, date.ordinal(), days_in_year(date.year()))
}

/// One day of the cumulative minutes series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Calendar day
    pub date: NaiveDate,
    /// Minutes accumulated through the end of `date`
    pub cumulative_minutes: f64,
    /// Run-rate estimate as of `date`
    pub eoy_estimate: f64,
}

/// Cumulative minutes per workout day of `year`, one point per date
///
/// `sessions` pairs each workout's calendar date with its minutes; sessions
/// outside `year` are ignored.
#[must_use]
pub fn projection_series(sessions: &[(NaiveDate, f64)], year: i32) -> Vec<ProjectionPoint> {
    let mut in_year: Vec<_> = sessions
        .iter()
        .copied()
        .filter(|(date, _)| date.year() == year)
        .collect();
    in_year.sort_by_key(|(date, _)| *date);

    let mut series: Vec<ProjectionPoint> = Vec::new();
    let mut total = 0.0;
    for (date, minutes) in in_year {
        total += minutes;
        let point = ProjectionPoint {
            date,
            cumulative_minutes: total,
            eoy_estimate: eoy_estimate_on(total, date),
        };
        match series.last_mut() {
            Some(last) if last.date == date => *last = point,
            _ => series.push(point),
        }
    }
    series
}
