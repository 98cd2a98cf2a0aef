//! Intake wizard
//!
//! Collects a new tracking record over five ordered steps:
//! Cycle Info → Mood → Symptoms → Sleep → Health Tips (review).
//!
//! Forward navigation never checks fields. Tips are computed from whatever
//! has been entered once the review step is shown. Submission is a single
//! request; on failure the draft is left untouched for a manual retry.

mod draft;
mod state;
pub mod tips;

pub use draft::{SubmissionPayload, WizardDraft};
pub use state::{Transition, WizardStep};
pub use tips::{daily_tips, generate_tips, GENERIC_TIP};

use crate::catalog;
use crate::client::{SubmissionReceipt, SubmissionSink};
use crate::error::{Result, SdkError};
use crate::identity::{Credentials, IdentityProvider};
use crate::types::{
    check_cycle_days, check_period_days, check_sleep_hours, MoodSeverity, SleepQuality,
    SymptomSeverity,
};
use chrono::NaiveDate;

/// What a successful submission leaves behind
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub receipt: SubmissionReceipt,
    /// Tips computed from the submitted draft
    pub tips: Vec<String>,
    pub payload: SubmissionPayload,
}

/// Five-step intake state machine
#[derive(Debug, Clone)]
pub struct IntakeWizard {
    step: WizardStep,
    draft: WizardDraft,
    today: NaiveDate,
    completed: bool,
}

impl IntakeWizard {
    /// Start a fresh wizard at the cycle-info step
    pub fn new(today: NaiveDate) -> Self {
        Self {
            step: WizardStep::CycleInfo,
            draft: WizardDraft::new(today),
            today,
            completed: false,
        }
    }

    /// Start from a prefilled draft (e.g. loaded from a file).
    ///
    /// The draft must pass the same checks the field handlers apply.
    pub fn from_draft(mut draft: WizardDraft, today: NaiveDate) -> Result<Self> {
        draft.validate()?;
        draft.refresh_prediction();
        Ok(Self {
            step: WizardStep::CycleInfo,
            draft,
            today,
            completed: false,
        })
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &WizardDraft {
        &self.draft
    }

    /// Whether the last submission went through
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn can_go_back(&self) -> bool {
        self.step.apply(Transition::Back).is_some()
    }

    pub fn can_go_next(&self) -> bool {
        self.step.apply(Transition::Next).is_some()
    }

    /// Submission is offered from the sleep step and from the review step
    pub fn can_submit(&self) -> bool {
        matches!(self.step, WizardStep::Sleep | WizardStep::Review)
    }

    /// Move forward one step; no-op on the review step
    pub fn next(&mut self) -> WizardStep {
        self.transition(Transition::Next)
    }

    /// Move back one step; no-op on the first step
    pub fn back(&mut self) -> WizardStep {
        self.transition(Transition::Back)
    }

    fn transition(&mut self, transition: Transition) -> WizardStep {
        if let Some(to) = self.step.apply(transition) {
            tracing::debug!(from = ?self.step, to = ?to, index = to.index(), "Wizard transition");
            self.step = to;
        }
        self.step
    }

    // === Cycle info ===

    pub fn set_cycle_duration(&mut self, days: u32) -> Result<()> {
        check_cycle_days(days).map_err(SdkError::InvalidInput)?;
        self.draft.cycle_duration_days = Some(days);
        self.draft.refresh_prediction();
        Ok(())
    }

    pub fn set_last_period_start(&mut self, date: NaiveDate) {
        self.draft.last_period_start = Some(date);
        self.draft.refresh_prediction();
    }

    pub fn set_last_period_duration(&mut self, days: u32) -> Result<()> {
        check_period_days(days).map_err(SdkError::InvalidInput)?;
        self.draft.last_period_duration_days = Some(days);
        Ok(())
    }

    // === Mood ===

    /// Select or deselect a mood; returns whether it is now selected
    pub fn toggle_mood(&mut self, mood: &str) -> Result<bool> {
        if !catalog::is_known_mood(mood) {
            return Err(SdkError::InvalidInput(format!("unknown mood: {mood}")));
        }
        Ok(toggle(&mut self.draft.mood_types, mood))
    }

    pub fn set_mood_severity(&mut self, severity: MoodSeverity) {
        self.draft.mood_severity = Some(severity);
    }

    pub fn set_mood_date(&mut self, date: NaiveDate) {
        self.draft.mood_date = date;
    }

    // === Symptoms ===

    /// Select or deselect a symptom; deselecting also drops its severity
    pub fn toggle_symptom(&mut self, symptom: &str) -> Result<bool> {
        if !catalog::is_known_symptom(symptom) {
            return Err(SdkError::InvalidInput(format!("unknown symptom: {symptom}")));
        }
        let selected = toggle(&mut self.draft.symptoms, symptom);
        if !selected {
            self.draft.symptom_severities.remove(symptom);
        }
        Ok(selected)
    }

    pub fn set_symptom_severity(&mut self, symptom: &str, severity: SymptomSeverity) -> Result<()> {
        if !self.draft.symptoms.contains(symptom) {
            return Err(SdkError::InvalidInput(format!(
                "symptom not selected: {symptom}"
            )));
        }
        self.draft
            .symptom_severities
            .insert(symptom.to_string(), severity);
        Ok(())
    }

    pub fn set_symptom_date(&mut self, date: NaiveDate) {
        self.draft.symptom_date = date;
    }

    // === Sleep ===

    pub fn set_sleep_duration(&mut self, hours: f64) -> Result<()> {
        check_sleep_hours(hours).map_err(SdkError::InvalidInput)?;
        self.draft.sleep_duration_hours = Some(hours);
        Ok(())
    }

    pub fn set_sleep_quality(&mut self, quality: SleepQuality) {
        self.draft.sleep_quality = Some(quality);
    }

    // === Review ===

    /// Advisory tips for the current draft
    pub fn tips(&self) -> Vec<String> {
        generate_tips(&self.draft)
    }

    /// Submit the draft.
    ///
    /// On success the wizard lands on the review step, is marked complete, and
    /// starts over with an empty draft. On failure nothing changes.
    pub async fn submit(
        &mut self,
        sink: &dyn SubmissionSink,
        identity: &dyn IdentityProvider,
    ) -> Result<Completion> {
        if !self.can_submit() {
            return Err(SdkError::InvalidInput(format!(
                "cannot submit from the {} step",
                self.step.title()
            )));
        }

        let credentials = Credentials::from_provider(identity).await?;
        let payload = self.draft.to_payload(credentials.user_id.clone());

        let receipt = match sink.submit(&payload, &credentials).await {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::error!(error = %e, step = ?self.step, "Error submitting tracker data");
                return Err(e);
            }
        };

        let tips = generate_tips(&self.draft);
        self.draft = WizardDraft::new(self.today);
        self.step = WizardStep::Review;
        self.completed = true;

        Ok(Completion {
            receipt,
            tips,
            payload,
        })
    }
}

fn toggle(set: &mut std::collections::BTreeSet<String>, value: &str) -> bool {
    if set.remove(value) {
        false
    } else {
        set.insert(value.to_string());
        true
    }
}
