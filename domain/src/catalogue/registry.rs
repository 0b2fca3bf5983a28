//! The disease catalogue

use super::profile::DiseaseProfile;
use crate::core::error::DomainError;
use crate::symptom::Symptom;
use std::collections::HashSet;

/// The fixed set of diseases the engine can suggest.
///
/// Iteration order is insertion order. Scoring ties are broken by this
/// order, so it is part of the catalogue's contract.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseCatalogue {
    profiles: Vec<DiseaseProfile>,
}

impl DiseaseCatalogue {
    /// Build a catalogue, rejecting duplicate names (compared
    /// case-insensitively) and empty catalogues.
    pub fn new(profiles: Vec<DiseaseProfile>) -> Result<Self, DomainError> {
        if profiles.is_empty() {
            return Err(DomainError::InvalidCatalogue(
                "catalogue must contain at least one disease".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for profile in &profiles {
            if !seen.insert(profile.name().to_lowercase()) {
                return Err(DomainError::InvalidCatalogue(format!(
                    "duplicate disease: {}",
                    profile.name()
                )));
            }
        }

        Ok(Self { profiles })
    }

    /// The built-in school-clinic catalogue.
    pub fn standard() -> Self {
        use Symptom::*;

        let entries: [(&str, &[Symptom], f64); 8] = [
            ("Common Cold", &[RunnyNose, Cough, SoreThroat, Fatigue], 0.8),
            ("Flu", &[Fever, Cough, BodyAche, Fatigue, Headache], 0.9),
            (
                "Stomach Flu",
                &[Nausea, Vomiting, Diarrhea, Fever, LossOfAppetite],
                0.85,
            ),
            ("Migraine", &[Headache, Nausea, Dizziness], 0.75),
            ("Tonsillitis", &[SoreThroat, Fever, Headache, LossOfAppetite], 0.8),
            ("Chickenpox", &[Rash, Fever, Fatigue, LossOfAppetite], 0.85),
            (
                "Pneumonia",
                &[Cough, Fever, ShortnessOfBreath, ChestPain, Fatigue],
                0.95,
            ),
            ("Allergic Reaction", &[Rash, RunnyNose, ShortnessOfBreath], 0.7),
        ];

        let profiles = entries
            .iter()
            .filter_map(|(name, symptoms, weight)| {
                DiseaseProfile::new(*name, symptoms.iter().copied(), *weight).ok()
            })
            .collect();

        Self { profiles }
    }

    /// Look up a profile by name (case-insensitive).
    pub fn lookup(&self, disease: &str) -> Result<&DiseaseProfile, DomainError> {
        let wanted = disease.trim();
        self.profiles
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::NotFound(wanted.to_string()))
    }

    pub fn contains(&self, disease: &str) -> bool {
        self.lookup(disease).is_ok()
    }

    /// Profiles in catalogue order
    pub fn iter(&self) -> impl Iterator<Item = &DiseaseProfile> {
        self.profiles.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(DiseaseProfile::name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for DiseaseCatalogue {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalogue_is_complete() {
        let catalogue = DiseaseCatalogue::standard();
        assert_eq!(catalogue.len(), 8);
        assert_eq!(
            catalogue.names().collect::<Vec<_>>(),
            vec![
                "Common Cold",
                "Flu",
                "Stomach Flu",
                "Migraine",
                "Tonsillitis",
                "Chickenpox",
                "Pneumonia",
                "Allergic Reaction",
            ]
        );
    }

    #[test]
    fn test_lookup() {
        let catalogue = DiseaseCatalogue::standard();
        let flu = catalogue.lookup("flu").unwrap();
        assert_eq!(flu.name(), "Flu");
        assert_eq!(flu.weight(), 0.9);
        assert_eq!(flu.symptoms().len(), 5);
    }

    #[test]
    fn test_lookup_unknown_is_not_found() {
        let catalogue = DiseaseCatalogue::standard();
        let err = catalogue.lookup("Scurvy").unwrap_err();
        assert_eq!(err, DomainError::NotFound("Scurvy".to_string()));
    }

    #[test]
    fn test_rejects_duplicates() {
        let a = DiseaseProfile::new("Flu", [Symptom::Fever], 0.5).unwrap();
        let b = DiseaseProfile::new("flu", [Symptom::Cough], 0.5).unwrap();
        assert!(DiseaseCatalogue::new(vec![a, b]).is_err());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(DiseaseCatalogue::new(vec![]).is_err());
    }
}
