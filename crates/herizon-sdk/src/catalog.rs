//! Option catalogs offered by the intake wizard, plus the dashboard's
//! myth/fact pairs

pub const MOOD_HAPPY: &str = "Happy";
pub const MOOD_SAD: &str = "Sad";
pub const MOOD_CALM: &str = "Calm";
pub const MOOD_ANGRY: &str = "Angry";
pub const MOOD_TIRED: &str = "Tired";
pub const MOOD_ENERGIZED: &str = "Energized";

pub const MOOD_OPTIONS: [&str; 6] = [
    MOOD_HAPPY,
    MOOD_SAD,
    MOOD_CALM,
    MOOD_ANGRY,
    MOOD_TIRED,
    MOOD_ENERGIZED,
];

pub const SYMPTOM_CRAMPS: &str = "Lower Abdomen Cramps";
pub const SYMPTOM_BACK_PAIN: &str = "Back Pain";
pub const SYMPTOM_BLOATING: &str = "Bloating";
pub const SYMPTOM_FATIGUE: &str = "Fatigue";
pub const SYMPTOM_HEADACHES: &str = "Headaches";
pub const SYMPTOM_NAUSEA: &str = "Nausea";
pub const SYMPTOM_SLEEP_DISRUPTION: &str = "Sleep Disruption";
pub const SYMPTOM_DIGESTIVE: &str = "Digestive Issues";

pub const SYMPTOM_OPTIONS: [&str; 8] = [
    SYMPTOM_CRAMPS,
    SYMPTOM_BACK_PAIN,
    SYMPTOM_BLOATING,
    SYMPTOM_FATIGUE,
    SYMPTOM_HEADACHES,
    SYMPTOM_NAUSEA,
    SYMPTOM_SLEEP_DISRUPTION,
    SYMPTOM_DIGESTIVE,
];

pub fn is_known_mood(name: &str) -> bool {
    MOOD_OPTIONS.contains(&name)
}

pub fn is_known_symptom(name: &str) -> bool {
    SYMPTOM_OPTIONS.contains(&name)
}

/// A common menstrual-health myth and the fact that corrects it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MythFact {
    pub myth: &'static str,
    pub fact: &'static str,
}

pub const MYTHS: [MythFact; 5] = [
    MythFact {
        myth: "You can't get pregnant during your period.",
        fact: "While it's less likely, you can still get pregnant during your period, especially if you have a shorter menstrual cycle.",
    },
    MythFact {
        myth: "PMS is all in your head.",
        fact: "PMS is a real medical condition caused by hormonal changes during the menstrual cycle.",
    },
    MythFact {
        myth: "Irregular periods always indicate a serious problem.",
        fact: "While irregular periods can sometimes signal health issues, they can also be caused by stress, diet, or exercise changes.",
    },
    MythFact {
        myth: "You shouldn't exercise during your period.",
        fact: "Exercise can actually help alleviate period symptoms like cramps and mood swings.",
    },
    MythFact {
        myth: "Using tampons can cause you to lose your virginity.",
        fact: "Using tampons does not affect virginity, which is about sexual intercourse, not physical changes to the body.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups() {
        assert!(is_known_mood(MOOD_CALM));
        assert!(!is_known_mood("calm"));
        assert!(is_known_symptom(SYMPTOM_DIGESTIVE));
        assert!(!is_known_symptom("Telekinesis"));
    }

    #[test]
    fn test_myths_are_paired() {
        assert_eq!(MYTHS.len(), 5);
        assert_eq!(MYTHS[1].myth, "PMS is all in your head.");
        for entry in MYTHS {
            assert!(!entry.myth.is_empty());
            assert!(entry.fact.len() > entry.myth.len());
        }
    }
}
