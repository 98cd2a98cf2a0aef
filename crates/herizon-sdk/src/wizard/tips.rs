//! Advisory tip rules
//!
//! Each rule is an independent predicate over the draft that contributes at
//! most one tip. Rules run in table order and every applicable rule fires.

use super::draft::WizardDraft;
use crate::catalog::{MOOD_ANGRY, MOOD_SAD, SYMPTOM_BLOATING, SYMPTOM_CRAMPS, SYMPTOM_FATIGUE};
use crate::types::{SleepQuality, SymptomSeverity};

/// Emitted when no rule applies
pub const GENERIC_TIP: &str = "Keep tracking your cycle for more personalized insights.";

/// Typical cycle length range, in days
pub const NORMAL_CYCLE_DAYS: std::ops::RangeInclusive<u32> = 21..=35;

/// Typical period length range, in days
pub const NORMAL_PERIOD_DAYS: std::ops::RangeInclusive<u32> = 3..=7;

/// A named predicate producing at most one tip
pub struct TipRule {
    pub name: &'static str,
    evaluate: fn(&WizardDraft) -> Option<&'static str>,
}

impl TipRule {
    pub fn evaluate(&self, draft: &WizardDraft) -> Option<&'static str> {
        (self.evaluate)(draft)
    }
}

pub const RULES: [TipRule; 7] = [
    TipRule {
        name: "cycle-length",
        evaluate: cycle_length,
    },
    TipRule {
        name: "period-duration",
        evaluate: period_duration,
    },
    TipRule {
        name: "cramps",
        evaluate: cramps,
    },
    TipRule {
        name: "fatigue",
        evaluate: fatigue,
    },
    TipRule {
        name: "bloating",
        evaluate: bloating,
    },
    TipRule {
        name: "sleep-hygiene",
        evaluate: sleep_hygiene,
    },
    TipRule {
        name: "mood-coping",
        evaluate: mood_coping,
    },
];

fn cycle_length(draft: &WizardDraft) -> Option<&'static str> {
    let days = draft.cycle_duration_days?;
    if days < *NORMAL_CYCLE_DAYS.start() {
        Some("Your cycle is shorter than average. Consider consulting with a healthcare professional.")
    } else if days > *NORMAL_CYCLE_DAYS.end() {
        Some("Your cycle is longer than average. You may want to discuss it with your doctor.")
    } else {
        None
    }
}

fn period_duration(draft: &WizardDraft) -> Option<&'static str> {
    let days = draft.last_period_duration_days?;
    if days > *NORMAL_PERIOD_DAYS.end() {
        Some("Your period duration is longer than average. If this is consistent, consult your healthcare provider.")
    } else if days < *NORMAL_PERIOD_DAYS.start() {
        Some("Your period duration is shorter than average. Track consistently to identify patterns.")
    } else {
        None
    }
}

fn cramps(draft: &WizardDraft) -> Option<&'static str> {
    if !draft.symptoms.contains(SYMPTOM_CRAMPS) {
        return None;
    }
    match draft.symptom_severities.get(SYMPTOM_CRAMPS) {
        Some(SymptomSeverity::Severe) => Some(
            "For severe cramps, try pain relievers, a heating pad, and gentle exercise. If pain is debilitating, consult your doctor.",
        ),
        _ => Some("For cramps, try a heating pad, gentle yoga, or over-the-counter pain relievers."),
    }
}

fn fatigue(draft: &WizardDraft) -> Option<&'static str> {
    draft
        .symptoms
        .contains(SYMPTOM_FATIGUE)
        .then_some("Combat fatigue by ensuring adequate iron intake, hydration, and rest.")
}

fn bloating(draft: &WizardDraft) -> Option<&'static str> {
    draft
        .symptoms
        .contains(SYMPTOM_BLOATING)
        .then_some("To reduce bloating, limit salt, avoid carbonated drinks, and eat smaller meals.")
}

fn sleep_hygiene(draft: &WizardDraft) -> Option<&'static str> {
    matches!(
        draft.sleep_quality,
        Some(SleepQuality::Poor) | Some(SleepQuality::Fair)
    )
    .then_some("Improve sleep by keeping a regular schedule and avoiding caffeine/screens before bed.")
}

fn mood_coping(draft: &WizardDraft) -> Option<&'static str> {
    (draft.mood_types.contains(MOOD_SAD) || draft.mood_types.contains(MOOD_ANGRY))
        .then_some("Mood changes are normal. Exercise, mindfulness, and sleep can help.")
}

/// Run every rule against `draft`; falls back to [`GENERIC_TIP`]
pub fn generate_tips(draft: &WizardDraft) -> Vec<String> {
    let mut tips: Vec<String> = RULES
        .iter()
        .filter_map(|rule| {
            let tip = rule.evaluate(draft)?;
            tracing::debug!(rule = rule.name, "Tip rule fired");
            Some(tip)
        })
        .map(String::from)
        .collect();

    if tips.is_empty() {
        tips.push(GENERIC_TIP.to_string());
    }
    tips
}

const DAILY_TIPS: [&str; 5] = [
    "Stay hydrated! Aim for 8 glasses of water a day.",
    "Practice deep breathing exercises for stress relief.",
    "Incorporate more leafy greens into your diet for iron.",
    "Try a warm compress for cramp relief.",
    "Get moving with light exercise like yoga or walking.",
];

/// General wellness tips shown on the dashboard
pub fn daily_tips() -> &'static [&'static str] {
    &DAILY_TIPS[..3]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft() -> WizardDraft {
        WizardDraft::new(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    #[test]
    fn test_long_cycle_and_poor_sleep() {
        let mut d = draft();
        d.cycle_duration_days = Some(40);
        d.sleep_quality = Some(SleepQuality::Poor);

        let tips = generate_tips(&d);
        assert!(tips.len() >= 2);
        assert!(tips.iter().any(|t| t.contains("cycle is longer")));
        assert!(tips.iter().any(|t| t.to_lowercase().contains("sleep")));
    }

    #[test]
    fn test_unflagged_draft_gets_generic_tip() {
        let mut d = draft();
        d.cycle_duration_days = Some(28);
        d.last_period_duration_days = Some(5);
        d.sleep_quality = Some(SleepQuality::Good);
        d.mood_types.insert("Happy".into());

        assert_eq!(generate_tips(&d), vec![GENERIC_TIP.to_string()]);
        assert_eq!(generate_tips(&draft()), vec![GENERIC_TIP.to_string()]);
    }

    #[test]
    fn test_cramp_severity_picks_tip() {
        let mut d = draft();
        d.symptoms.insert(SYMPTOM_CRAMPS.into());
        assert!(generate_tips(&d)[0].starts_with("For cramps"));

        d.symptom_severities
            .insert(SYMPTOM_CRAMPS.into(), SymptomSeverity::Severe);
        assert!(generate_tips(&d)[0].starts_with("For severe cramps"));
    }

    #[test]
    fn test_rules_fire_in_table_order() {
        let mut d = draft();
        d.cycle_duration_days = Some(18);
        d.last_period_duration_days = Some(9);
        d.symptoms.insert(SYMPTOM_FATIGUE.into());
        d.symptoms.insert(SYMPTOM_BLOATING.into());
        d.sleep_quality = Some(SleepQuality::Fair);
        d.mood_types.insert(MOOD_ANGRY.into());

        let tips = generate_tips(&d);
        assert_eq!(tips.len(), 6);
        assert!(tips[0].contains("shorter than average"));
        assert!(tips[1].contains("period duration is longer"));
        assert!(tips[2].contains("fatigue"));
        assert!(tips[3].contains("bloating"));
        assert!(tips[4].contains("sleep"));
        assert!(tips[5].starts_with("Mood changes"));
    }

    #[test]
    fn test_boundaries_are_normal() {
        let mut d = draft();
        d.cycle_duration_days = Some(21);
        d.last_period_duration_days = Some(3);
        assert_eq!(generate_tips(&d), vec![GENERIC_TIP.to_string()]);

        d.cycle_duration_days = Some(35);
        d.last_period_duration_days = Some(7);
        assert_eq!(generate_tips(&d), vec![GENERIC_TIP.to_string()]);
    }

    #[test]
    fn test_daily_tips() {
        assert_eq!(daily_tips().len(), 3);
    }

    #[test]
    fn test_rule_names_are_unique() {
        let names: std::collections::BTreeSet<&str> = RULES.iter().map(|rule| rule.name).collect();
        assert_eq!(names.len(), RULES.len());
        assert!(names.contains("cycle-length"));
    }
}
