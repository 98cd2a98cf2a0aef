//! Intake draft and its submission payload

use crate::analytics::predict_next_period;
use crate::catalog;
use crate::error::{Result, SdkError};
use crate::types::{
    check_cycle_days, check_period_days, check_sleep_hours, MoodSeverity, SleepQuality,
    SymptomSeverity,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Fields collected so far by the intake wizard.
///
/// Everything the user types is optional until submission; navigation does
/// not require any field to be filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardDraft {
    #[serde(default)]
    pub cycle_duration_days: Option<u32>,
    #[serde(default)]
    pub last_period_start: Option<NaiveDate>,
    #[serde(default)]
    pub last_period_duration_days: Option<u32>,
    #[serde(default)]
    pub mood_types: BTreeSet<String>,
    #[serde(default)]
    pub mood_severity: Option<MoodSeverity>,
    #[serde(default = "today")]
    pub mood_date: NaiveDate,
    #[serde(default)]
    pub symptoms: BTreeSet<String>,
    #[serde(default)]
    pub symptom_severities: BTreeMap<String, SymptomSeverity>,
    #[serde(default = "today")]
    pub symptom_date: NaiveDate,
    #[serde(default)]
    pub sleep_duration_hours: Option<f64>,
    #[serde(default)]
    pub sleep_quality: Option<SleepQuality>,
    /// Derived from start date and cycle length, never typed in
    #[serde(skip_deserializing)]
    pub next_period_predicted: Option<NaiveDate>,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl WizardDraft {
    /// Empty draft with observation dates defaulting to `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            cycle_duration_days: None,
            last_period_start: None,
            last_period_duration_days: None,
            mood_types: BTreeSet::new(),
            mood_severity: None,
            mood_date: today,
            symptoms: BTreeSet::new(),
            symptom_severities: BTreeMap::new(),
            symptom_date: today,
            sleep_duration_hours: None,
            sleep_quality: None,
            next_period_predicted: None,
        }
    }

    /// Recompute the predicted next period from the current cycle fields
    pub(crate) fn refresh_prediction(&mut self) {
        self.next_period_predicted = match (self.last_period_start, self.cycle_duration_days) {
            (Some(start), Some(days)) => start
                .and_hms_opt(0, 0, 0)
                .and_then(|dt| predict_next_period(dt.and_utc(), days))
                .map(|next| next.date_naive()),
            _ => None,
        };
    }

    /// Apply the field-handler rules to a draft built elsewhere (e.g. a file)
    pub fn validate(&self) -> Result<()> {
        if let Some(days) = self.cycle_duration_days {
            check_cycle_days(days).map_err(SdkError::InvalidInput)?;
        }
        if let Some(days) = self.last_period_duration_days {
            check_period_days(days).map_err(SdkError::InvalidInput)?;
        }
        if let Some(hours) = self.sleep_duration_hours {
            check_sleep_hours(hours).map_err(SdkError::InvalidInput)?;
        }
        if let Some(mood) = self.mood_types.iter().find(|m| !catalog::is_known_mood(m)) {
            return Err(SdkError::InvalidInput(format!("unknown mood: {mood}")));
        }
        if let Some(symptom) = self.symptoms.iter().find(|s| !catalog::is_known_symptom(s)) {
            return Err(SdkError::InvalidInput(format!("unknown symptom: {symptom}")));
        }
        if let Some(symptom) = self
            .symptom_severities
            .keys()
            .find(|s| !self.symptoms.contains(*s))
        {
            return Err(SdkError::InvalidInput(format!(
                "symptom not selected: {symptom}"
            )));
        }
        Ok(())
    }

    /// Names of fields still empty; informational only
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.cycle_duration_days.is_none() {
            missing.push("cycleDuration");
        }
        if self.last_period_start.is_none() {
            missing.push("lastPeriodStart");
        }
        if self.last_period_duration_days.is_none() {
            missing.push("lastPeriodDuration");
        }
        if self.mood_types.is_empty() {
            missing.push("moodTypes");
        }
        if self.mood_severity.is_none() {
            missing.push("moodSeverity");
        }
        if self.sleep_duration_hours.is_none() {
            missing.push("sleepDuration");
        }
        if self.sleep_quality.is_none() {
            missing.push("sleepQuality");
        }
        missing
    }

    /// Build the wire payload for `user_id`
    pub fn to_payload(&self, user_id: impl Into<String>) -> SubmissionPayload {
        SubmissionPayload {
            user_id: user_id.into(),
            cycle_duration: self.cycle_duration_days,
            last_period_start: self.last_period_start,
            last_period_duration: self.last_period_duration_days,
            mood_types: self.mood_types.iter().cloned().collect(),
            mood_severity: self.mood_severity,
            mood_date: self.mood_date,
            symptoms: self.symptoms.iter().cloned().collect(),
            symptom_severities: self.symptom_severities.clone(),
            symptom_date: self.symptom_date,
            sleep_duration: self.sleep_duration_hours,
            sleep_quality: self.sleep_quality,
            next_period_prediction: self.next_period_predicted,
        }
    }
}

/// Body of `POST /api/period/trackerdata`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub user_id: String,
    pub cycle_duration: Option<u32>,
    pub last_period_start: Option<NaiveDate>,
    pub last_period_duration: Option<u32>,
    pub mood_types: Vec<String>,
    pub mood_severity: Option<MoodSeverity>,
    pub mood_date: NaiveDate,
    pub symptoms: Vec<String>,
    pub symptom_severities: BTreeMap<String, SymptomSeverity>,
    pub symptom_date: NaiveDate,
    pub sleep_duration: Option<f64>,
    pub sleep_quality: Option<SleepQuality>,
    pub next_period_prediction: Option<NaiveDate>,
}
