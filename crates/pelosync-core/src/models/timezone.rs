// ABOUTME: Timezone a workout's timestamps are rendered in
// ABOUTME: Prefers the service's IANA zone name, falling back to the device clock offset, then UTC
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, FixedOffset, Offset, Utc};
use chrono_tz::Tz;
use std::str::FromStr;
use tracing::warn;

/// Zone of the device that recorded a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutTimezone {
    /// IANA zone reported in the workout's `timezone` field
    Named(Tz),
    /// Offset implied by `device_time_created_at - created`
    Fixed(FixedOffset),
}

impl Default for WorkoutTimezone {
    fn default() -> Self {
        Self::Fixed(Utc.fix())
    }
}

impl WorkoutTimezone {
    /// Resolve from the zone name, else the device clock, else UTC
    ///
    /// Unknown zone names are logged and fall through to the device clock.
    #[must_use]
    pub fn resolve(name: Option<&str>, created: i64, device_time_created_at: Option<i64>) -> Self {
        if let Some(name) = name {
            match Tz::from_str(name) {
                Ok(tz) => return Self::Named(tz),
                Err(_) => warn!(timezone = name, "unknown workout timezone, using device clock"),
            }
        }
        device_time_created_at
            .and_then(|device| i32::try_from(device - created).ok())
            .and_then(FixedOffset::east_opt)
            .map_or_else(Self::default, Self::Fixed)
    }

    /// Unix seconds rendered in this zone
    #[must_use]
    pub fn at(self, secs: i64) -> Option<DateTime<FixedOffset>> {
        let instant = DateTime::<Utc>::from_timestamp(secs, 0)?;
        Some(match self {
            Self::Named(tz) => instant.with_timezone(&tz).fixed_offset(),
            Self::Fixed(offset) => instant.with_timezone(&offset),
        })
    }

    /// Offset in effect at `secs`; named zones follow daylight saving
    #[must_use]
    pub fn offset_at(self, secs: i64) -> FixedOffset {
        self.at(secs).map_or_else(|| Utc.fix(), |time| *time.offset())
    }

    /// IANA name for named zones
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::Named(tz) => Some(tz.name()),
            Self::Fixed(_) => None,
        }
    }
}
