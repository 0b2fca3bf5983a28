//! Built-in seed corpus used when no training data has been recorded yet.

use super::training::TrainingExample;
use crate::symptom::SymptomSet;

const SEED: &[(&[&str], &str)] = &[
    (&["fever", "cough", "body_ache"], "Flu"),
    (&["runny_nose", "cough", "sore_throat"], "Common Cold"),
    (&["nausea", "vomiting", "diarrhea"], "Stomach Flu"),
    (&["headache", "nausea", "dizziness"], "Migraine"),
    (&["sore_throat", "fever", "headache"], "Tonsillitis"),
    (&["rash", "fever", "fatigue"], "Chickenpox"),
    (&["cough", "fever", "shortness_of_breath"], "Pneumonia"),
    (&["rash", "runny_nose", "shortness_of_breath"], "Allergic Reaction"),
    (&["fever", "cough", "fatigue"], "Flu"),
    (&["runny_nose", "sore_throat"], "Common Cold"),
    (&["nausea", "vomiting"], "Stomach Flu"),
    (&["headache", "dizziness"], "Migraine"),
    (&["fever", "rash"], "Chickenpox"),
    (&["cough", "chest_pain"], "Pneumonia"),
    (&["rash", "runny_nose"], "Allergic Reaction"),
    (&["fever", "cough", "headache"], "Flu"),
    (&["cough", "sore_throat"], "Common Cold"),
    (&["diarrhea", "fever"], "Stomach Flu"),
    (&["headache", "nausea"], "Migraine"),
    (&["fever", "fatigue"], "Flu"),
    (&["runny_nose", "cough"], "Common Cold"),
];

/// The seed corpus, in a fixed order
pub fn seed_corpus() -> Vec<TrainingExample> {
    SEED.iter()
        .map(|(symptoms, disease)| {
            TrainingExample::labelled(SymptomSet::from_tokens(symptoms.iter()), *disease)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::DiseaseCatalogue;
    use crate::symptom::SymptomToken;

    #[test]
    fn test_seed_labels_are_in_catalogue() {
        let catalogue = DiseaseCatalogue::standard();
        for example in seed_corpus() {
            assert!(catalogue.contains(&example.disease), "{}", example.disease);
        }
    }

    #[test]
    fn test_seed_uses_known_symptoms_only() {
        for example in seed_corpus() {
            assert!(example.symptoms.iter().all(|t| SymptomToken::known(t).is_some()));
        }
    }

    #[test]
    fn test_seed_covers_every_disease() {
        let corpus = seed_corpus();
        assert_eq!(corpus.len(), 21);
        for name in DiseaseCatalogue::standard().names() {
            assert!(corpus.iter().any(|e| e.disease == name), "{name}");
        }
    }
}
