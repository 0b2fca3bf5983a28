//! Disease profiles

use crate::core::error::DomainError;
use crate::symptom::{Symptom, SymptomSet};
use serde::{Deserialize, Serialize};

/// A catalogue entry: a disease, its characteristic symptoms, and a prior
/// weight in `(0, 1]` used as a scoring multiplier.
///
/// Symptoms keep the order they were declared in; duplicates are removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseProfile {
    name: String,
    symptoms: Vec<Symptom>,
    weight: f64,
}

impl DiseaseProfile {
    /// Create a validated profile.
    ///
    /// Fails with [`DomainError::InvalidCatalogue`] if the name is blank,
    /// the symptom list is empty, or the weight is outside `(0, 1]`.
    pub fn new(
        name: impl Into<String>,
        symptoms: impl IntoIterator<Item = Symptom>,
        weight: f64,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::InvalidCatalogue(
                "disease name must not be empty".to_string(),
            ));
        }

        let mut ordered = Vec::new();
        for symptom in symptoms {
            if !ordered.contains(&symptom) {
                ordered.push(symptom);
            }
        }
        if ordered.is_empty() {
            return Err(DomainError::InvalidCatalogue(format!(
                "{} has no symptoms",
                name
            )));
        }

        if !(weight > 0.0 && weight <= 1.0) {
            return Err(DomainError::InvalidCatalogue(format!(
                "{} has weight {} outside (0, 1]",
                name, weight
            )));
        }

        Ok(Self {
            name,
            symptoms: ordered,
            weight,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Number of profile symptoms present verbatim in `input`
    pub fn exact_matches(&self, input: &SymptomSet) -> usize {
        self.symptoms
            .iter()
            .filter(|s| input.contains_symptom(**s))
            .count()
    }

    /// Number of profile symptoms that share a substring relation (in either
    /// direction) with at least one input token
    pub fn partial_matches(&self, input: &SymptomSet) -> usize {
        self.symptoms
            .iter()
            .filter(|s| input.iter().any(|token| token.overlaps(s.as_str())))
            .count()
    }

    /// The profile's own symptoms as an input set
    pub fn as_symptom_set(&self) -> SymptomSet {
        self.symptoms.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_weight() {
        assert!(DiseaseProfile::new("Flu", [Symptom::Fever], 0.0).is_err());
        assert!(DiseaseProfile::new("Flu", [Symptom::Fever], 1.2).is_err());
        assert!(DiseaseProfile::new("Flu", [Symptom::Fever], f64::NAN).is_err());
        assert!(DiseaseProfile::new("Flu", [Symptom::Fever], 1.0).is_ok());
    }

    #[test]
    fn test_rejects_empty_symptoms_and_name() {
        assert!(DiseaseProfile::new("Flu", [], 0.5).is_err());
        assert!(DiseaseProfile::new("  ", [Symptom::Fever], 0.5).is_err());
    }

    #[test]
    fn test_deduplicates_symptoms_keeping_order() {
        let profile = DiseaseProfile::new(
            "Test",
            [Symptom::Fever, Symptom::Rash, Symptom::Fever],
            0.5,
        )
        .unwrap();
        assert_eq!(profile.symptoms(), &[Symptom::Fever, Symptom::Rash]);
    }

    #[test]
    fn test_exact_and_partial_matches() {
        let profile = DiseaseProfile::new(
            "Flu",
            [Symptom::Fever, Symptom::BodyAche, Symptom::Headache],
            0.9,
        )
        .unwrap();

        let input = SymptomSet::from_tokens(["fever", "ache"]);
        assert_eq!(profile.exact_matches(&input), 1);
        // "ache" is inside both "body_ache" and "headache"
        assert_eq!(profile.partial_matches(&input), 3);
    }
}
