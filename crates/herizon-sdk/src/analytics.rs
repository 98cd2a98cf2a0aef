//! Cycle analytics
//!
//! Pure derivation of display-ready indicators from a tracking record and
//! the current instant. Nothing here is cached: every call recomputes from the
//! snapshot it is given.

use crate::error::{Result, SdkError};
use crate::types::{CyclePhase, SleepQuality, TrackingRecord};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Fixed heuristic fertile window (cycle days, inclusive). Not adaptive to
/// cycle length.
pub const FERTILE_WINDOW: std::ops::RangeInclusive<u32> = 11..=17;

/// Cycle day after which a luteal-phase record is flagged as PMS-likely
pub const PMS_AFTER_DAY: u32 = 21;

/// Minimum sleep, in hours, for a good night to count as well rested
pub const RESTED_MIN_HOURS: f64 = 7.0;

/// Predicted start of the next period: last start plus one cycle.
///
/// `None` when the result falls outside chrono's representable range.
pub fn predict_next_period(
    last_period_start: DateTime<Utc>,
    cycle_days: u32,
) -> Option<DateTime<Utc>> {
    last_period_start.checked_add_signed(Duration::days(i64::from(cycle_days)))
}

/// Derived indicators for one record at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    /// 1-indexed day within the current cycle, always in `[1, cycle length]`
    pub cycle_day: u32,
    pub cycle_duration_days: u32,
    pub days_until_next_period: u32,
    pub fertile_window: bool,
    pub pms_likely: bool,
    pub well_rested: bool,
}

impl Insights {
    pub fn fertility_status(&self) -> &'static str {
        if self.fertile_window {
            "Active"
        } else {
            "Inactive"
        }
    }

    pub fn pms_likelihood(&self) -> &'static str {
        if self.pms_likely {
            "High"
        } else {
            "Low"
        }
    }

    pub fn rest_status(&self) -> &'static str {
        if self.well_rested {
            "Well Rested"
        } else {
            "Need More Rest"
        }
    }

    /// Fraction of the cycle elapsed, in `(0, 1]`
    pub fn cycle_progress(&self) -> f64 {
        f64::from(self.cycle_day) / f64::from(self.cycle_duration_days)
    }
}

/// Day of the cycle `now` falls on.
///
/// Whole days are floored, so instants before the recorded start wrap around
/// into the previous cycle instead of producing a day outside the range.
pub fn cycle_day(record: &TrackingRecord, now: DateTime<Utc>) -> Result<u32> {
    let cycle = record.cycle_duration_days;
    if cycle == 0 {
        return Err(SdkError::InvalidRecord(
            "cycle duration must be greater than zero".to_string(),
        ));
    }

    let elapsed_days = (now - record.last_period_start)
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY);
    let day = elapsed_days.rem_euclid(i64::from(cycle)) + 1;

    // rem_euclid keeps `day` in 1..=cycle, which fits u32
    Ok(day as u32)
}

/// Derive every indicator for `record` as of `now`
pub fn derive_insights(record: &TrackingRecord, now: DateTime<Utc>) -> Result<Insights> {
    let cycle_day = cycle_day(record, now)?;

    Ok(Insights {
        cycle_day,
        cycle_duration_days: record.cycle_duration_days,
        days_until_next_period: record.cycle_duration_days - cycle_day,
        fertile_window: FERTILE_WINDOW.contains(&cycle_day),
        pms_likely: record.current_phase == CyclePhase::Luteal && cycle_day > PMS_AFTER_DAY,
        well_rested: record.sleep_quality == SleepQuality::Good
            && record.sleep_duration_hours >= RESTED_MIN_HOURS,
    })
}
