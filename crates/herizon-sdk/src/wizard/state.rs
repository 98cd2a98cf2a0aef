//! Wizard step table
//!
//! Linear topology: forward moves one step at a time, back moves only to the
//! immediately preceding step. Anything not in the table is a no-op.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    CycleInfo = 0,
    Mood = 1,
    Symptoms = 2,
    Sleep = 3,
    Review = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Next,
    Back,
}

const TRANSITIONS: [(WizardStep, Transition, WizardStep); 8] = [
    (WizardStep::CycleInfo, Transition::Next, WizardStep::Mood),
    (WizardStep::Mood, Transition::Next, WizardStep::Symptoms),
    (WizardStep::Symptoms, Transition::Next, WizardStep::Sleep),
    (WizardStep::Sleep, Transition::Next, WizardStep::Review),
    (WizardStep::Mood, Transition::Back, WizardStep::CycleInfo),
    (WizardStep::Symptoms, Transition::Back, WizardStep::Mood),
    (WizardStep::Sleep, Transition::Back, WizardStep::Symptoms),
    (WizardStep::Review, Transition::Back, WizardStep::Sleep),
];

impl WizardStep {
    /// Target of `transition` from this step, if the table allows it
    pub fn apply(self, transition: Transition) -> Option<WizardStep> {
        TRANSITIONS
            .iter()
            .find(|(from, t, _)| *from == self && *t == transition)
            .map(|(_, _, to)| *to)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::CycleInfo => "Cycle Info",
            WizardStep::Mood => "Mood",
            WizardStep::Symptoms => "Symptoms",
            WizardStep::Sleep => "Sleep",
            WizardStep::Review => "Health Tips",
        }
    }
}
