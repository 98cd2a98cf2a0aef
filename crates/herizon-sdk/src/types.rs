//! Tracking record and acquisition types
//!
//! Field names on the wire follow the tracking service (`cycleDuration`,
//! `lastPeriodStart`, ...). Dates are accepted either as `YYYY-MM-DD` or as
//! RFC 3339 timestamps; numeric fields are accepted as numbers or numeric
//! strings, since older submissions stored raw form values.

use crate::analytics::predict_next_period;
use crate::error::FetchError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Mood intensity reported by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum MoodSeverity {
    Low,
    Medium,
    High,
}

impl MoodSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for MoodSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            // "Moderate" is what older records carry for the middle level
            "medium" | "moderate" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown mood severity: {other}")),
        }
    }
}

impl TryFrom<String> for MoodSeverity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for MoodSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-symptom severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SymptomSeverity {
    None,
    Mild,
    Moderate,
    Severe,
}

/// Self-reported sleep quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SleepQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

/// Menstrual-cycle phase, assigned by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CyclePhase {
    Follicular,
    Ovulation,
    Luteal,
    Menstrual,
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Follicular => "Follicular",
            Self::Ovulation => "Ovulation",
            Self::Luteal => "Luteal",
            Self::Menstrual => "Menstrual",
        };
        f.write_str(name)
    }
}

/// The canonical per-user cycle snapshot.
///
/// Held as an immutable value: a new acquisition replaces the whole record,
/// fields are never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingRecord {
    #[serde(rename = "cycleDuration", deserialize_with = "wire::u32_lenient")]
    pub cycle_duration_days: u32,
    #[serde(rename = "lastPeriodStart", deserialize_with = "wire::date_lenient")]
    pub last_period_start: DateTime<Utc>,
    #[serde(rename = "lastPeriodDuration", deserialize_with = "wire::u32_lenient")]
    pub last_period_duration_days: u32,
    #[serde(default)]
    pub mood_types: BTreeSet<String>,
    pub mood_severity: MoodSeverity,
    #[serde(rename = "moodDate", deserialize_with = "wire::date_lenient")]
    pub mood_observed: DateTime<Utc>,
    #[serde(default)]
    pub symptoms: BTreeSet<String>,
    #[serde(default)]
    pub symptom_severities: BTreeMap<String, SymptomSeverity>,
    #[serde(rename = "symptomDate", deserialize_with = "wire::date_lenient")]
    pub symptom_observed: DateTime<Utc>,
    #[serde(rename = "sleepDuration", deserialize_with = "wire::f64_lenient")]
    pub sleep_duration_hours: f64,
    pub sleep_quality: SleepQuality,
    #[serde(rename = "nextPeriodPrediction", deserialize_with = "wire::date_lenient")]
    pub next_period_predicted: DateTime<Utc>,
    pub current_phase: CyclePhase,
}

impl TrackingRecord {
    /// Plausible stand-in record shown when no endpoint could be reached
    pub fn synthetic(now: DateTime<Utc>) -> Self {
        let cycle_duration_days = 28;
        let last_period_start = now - Duration::days(15);

        let symptom_severities = BTreeMap::from([
            ("Cramps".to_string(), SymptomSeverity::Severe),
            ("Bloating".to_string(), SymptomSeverity::Moderate),
            ("Headache".to_string(), SymptomSeverity::Mild),
        ]);

        Self {
            cycle_duration_days,
            last_period_start,
            last_period_duration_days: 5,
            mood_types: ["Happy", "Anxious", "Irritable"]
                .into_iter()
                .map(String::from)
                .collect(),
            mood_severity: MoodSeverity::Medium,
            mood_observed: now,
            symptoms: symptom_severities.keys().cloned().collect(),
            symptom_severities,
            symptom_observed: now,
            sleep_duration_hours: 7.5,
            sleep_quality: SleepQuality::Good,
            next_period_predicted: predict_next_period(last_period_start, cycle_duration_days)
                .unwrap_or(last_period_start),
            current_phase: CyclePhase::Luteal,
        }
    }

    /// Check the record's structural invariants
    pub fn validate(&self) -> std::result::Result<(), String> {
        check_cycle_days(self.cycle_duration_days)?;
        check_period_days(self.last_period_duration_days)?;
        check_sleep_hours(self.sleep_duration_hours)
    }
}

/// Accepted cycle lengths, in days
pub const CYCLE_DAYS_RANGE: std::ops::RangeInclusive<u32> = 1..=120;

/// Accepted period lengths, in days
pub const PERIOD_DAYS_RANGE: std::ops::RangeInclusive<u32> = 1..=30;

pub(crate) fn check_cycle_days(days: u32) -> std::result::Result<(), String> {
    if CYCLE_DAYS_RANGE.contains(&days) {
        Ok(())
    } else {
        Err(format!(
            "cycle duration {} is outside {}-{} days",
            days,
            CYCLE_DAYS_RANGE.start(),
            CYCLE_DAYS_RANGE.end()
        ))
    }
}

pub(crate) fn check_period_days(days: u32) -> std::result::Result<(), String> {
    if PERIOD_DAYS_RANGE.contains(&days) {
        Ok(())
    } else {
        Err(format!(
            "period duration {} is outside {}-{} days",
            days,
            PERIOD_DAYS_RANGE.start(),
            PERIOD_DAYS_RANGE.end()
        ))
    }
}

pub(crate) fn check_sleep_hours(hours: f64) -> std::result::Result<(), String> {
    // NaN fails `contains`
    if (0.0..=24.0).contains(&hours) {
        Ok(())
    } else {
        Err(format!("sleep duration {hours} is outside 0-24 hours"))
    }
}

/// Record body as served by `GET /api/period/periodtracking/{userId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayload {
    #[serde(flatten)]
    pub record: TrackingRecord,
    #[serde(default, deserialize_with = "wire::opt_u32_lenient")]
    pub water_intake_count: Option<u32>,
}

/// Response envelope of the record endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordEnvelope {
    pub period_tracking_data: RecordPayload,
}

/// A record fetched from one endpoint, with its embedded counters
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedRecord {
    pub record: TrackingRecord,
    pub water_intake_count: u32,
}

impl From<RecordEnvelope> for FetchedRecord {
    fn from(envelope: RecordEnvelope) -> Self {
        let payload = envelope.period_tracking_data;
        Self {
            record: payload.record,
            water_intake_count: payload.water_intake_count.unwrap_or(0),
        }
    }
}

/// Which tier of the cascade produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSource {
    Primary,
    Secondary,
    Local,
    Synthetic,
}

impl DataSource {
    /// Tag for the endpoint at `index` in a registry of `len` entries.
    ///
    /// The first entry is the primary, the last of several is the local
    /// address, everything in between is secondary.
    pub fn for_rank(index: usize, len: usize) -> Self {
        if index == 0 {
            Self::Primary
        } else if index + 1 == len {
            Self::Local
        } else {
            Self::Secondary
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic)
    }
}

/// Outcome of one cascade run; always carries a usable record
#[derive(Debug, Clone, PartialEq)]
pub struct AcquisitionResult {
    pub record: TrackingRecord,
    pub source: DataSource,
    /// Human-readable degradation notice, absent on success
    pub advisory: Option<String>,
    /// Water glasses already logged today, zero when synthetic
    pub water_intake_count: u32,
    /// Some endpoint answered "no record yet"; the user belongs in the intake flow
    pub intake_required: bool,
    /// Classified failures in the order they occurred
    pub failures: Vec<FetchError>,
}

mod wire {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(i64),
        Float(f64),
        Text(String),
    }

    impl Number {
        fn as_f64(&self) -> Result<f64, String> {
            match self {
                Number::Int(n) => Ok(*n as f64),
                Number::Float(n) => Ok(*n),
                Number::Text(s) => s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| format!("not a number: {s:?}")),
            }
        }

        fn as_u32(&self) -> Result<u32, String> {
            match self {
                Number::Int(n) => u32::try_from(*n).map_err(|_| format!("out of range: {n}")),
                Number::Float(n) if n.fract() == 0.0 && *n >= 0.0 && *n <= u32::MAX as f64 => {
                    Ok(*n as u32)
                }
                Number::Float(n) => Err(format!("not a whole number: {n}")),
                Number::Text(s) => s
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| format!("not a whole number: {s:?}")),
            }
        }
    }

    pub fn u32_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        Number::deserialize(d)?.as_u32().map_err(D::Error::custom)
    }

    pub fn opt_u32_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        match Option::<Number>::deserialize(d)? {
            Some(n) => n.as_u32().map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }

    pub fn f64_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Number::deserialize(d)?.as_f64().map_err(D::Error::custom)
    }

    pub fn date_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {raw:?}")))
    }

    fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}
