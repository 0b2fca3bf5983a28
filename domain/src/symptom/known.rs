//! The closed vocabulary of symptoms the catalogue is written in.

use serde::{Deserialize, Serialize};

/// A symptom the disease catalogue knows about.
///
/// Intake forms offer exactly these tokens; free text is normalized to one
/// of them by the caller before it reaches the engine. Tokens outside this
/// set are still accepted as [`SymptomToken`](super::SymptomToken)s so that
/// degenerate input surfaces as low confidence instead of an error.
///
/// # Example
///
/// ```
/// use triage_domain::symptom::Symptom;
///
/// let s: Symptom = "body_ache".parse().unwrap();
/// assert_eq!(s, Symptom::BodyAche);
/// assert_eq!(s.as_str(), "body_ache");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symptom {
    RunnyNose,
    Cough,
    SoreThroat,
    Fatigue,
    Fever,
    BodyAche,
    Headache,
    Nausea,
    Vomiting,
    Diarrhea,
    LossOfAppetite,
    Dizziness,
    Rash,
    ShortnessOfBreath,
    ChestPain,
}

impl Symptom {
    /// Every known symptom, in declaration order.
    pub const ALL: [Symptom; 15] = [
        Symptom::RunnyNose,
        Symptom::Cough,
        Symptom::SoreThroat,
        Symptom::Fatigue,
        Symptom::Fever,
        Symptom::BodyAche,
        Symptom::Headache,
        Symptom::Nausea,
        Symptom::Vomiting,
        Symptom::Diarrhea,
        Symptom::LossOfAppetite,
        Symptom::Dizziness,
        Symptom::Rash,
        Symptom::ShortnessOfBreath,
        Symptom::ChestPain,
    ];

    /// Canonical token for this symptom
    pub fn as_str(&self) -> &'static str {
        match self {
            Symptom::RunnyNose => "runny_nose",
            Symptom::Cough => "cough",
            Symptom::SoreThroat => "sore_throat",
            Symptom::Fatigue => "fatigue",
            Symptom::Fever => "fever",
            Symptom::BodyAche => "body_ache",
            Symptom::Headache => "headache",
            Symptom::Nausea => "nausea",
            Symptom::Vomiting => "vomiting",
            Symptom::Diarrhea => "diarrhea",
            Symptom::LossOfAppetite => "loss_of_appetite",
            Symptom::Dizziness => "dizziness",
            Symptom::Rash => "rash",
            Symptom::ShortnessOfBreath => "shortness_of_breath",
            Symptom::ChestPain => "chest_pain",
        }
    }

    /// Human-readable label (e.g. "Shortness of breath")
    pub fn display_name(&self) -> String {
        let mut label = self.as_str().replace('_', " ");
        if let Some(first) = label.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        label
    }
}

impl std::fmt::Display for Symptom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Symptom {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = super::token::normalize(s);
        Symptom::ALL
            .iter()
            .copied()
            .find(|symptom| symptom.as_str() == normalized)
            .ok_or_else(|| format!("Unknown symptom: {}", s))
    }
}
