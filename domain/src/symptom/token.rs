//! Normalized symptom tokens

use super::known::Symptom;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Normalize raw input into token form: trimmed, lowercase, with runs of
/// whitespace and hyphens collapsed to a single `_`.
pub(crate) fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for ch in raw.trim().chars() {
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_sep = true;
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push('_');
        }
        pending_sep = false;
        out.extend(ch.to_lowercase());
    }
    out
}

/// A single reported symptom.
///
/// Tokens are normalized on construction and never empty. They are not
/// required to be part of the known vocabulary; use [`SymptomToken::known`]
/// to map one onto a [`Symptom`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SymptomToken(String);

impl SymptomToken {
    /// Parse and normalize a raw token.
    ///
    /// Returns [`DomainError::InvalidInput`] when nothing is left after
    /// normalization.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(DomainError::InvalidInput(
                "symptom token must not be empty".to_string(),
            ));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The vocabulary entry this token names, if any
    pub fn known(&self) -> Option<Symptom> {
        self.0.parse().ok()
    }

    /// Whether either token contains the other
    pub fn overlaps(&self, other: &str) -> bool {
        self.0.contains(other) || other.contains(self.0.as_str())
    }
}

impl From<Symptom> for SymptomToken {
    fn from(symptom: Symptom) -> Self {
        Self(symptom.as_str().to_string())
    }
}

impl TryFrom<String> for SymptomToken {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SymptomToken> for String {
    fn from(token: SymptomToken) -> Self {
        token.0
    }
}

impl AsRef<str> for SymptomToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SymptomToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Body Ache "), "body_ache");
        assert_eq!(normalize("loss-of--appetite"), "loss_of_appetite");
        assert_eq!(normalize("_fever_"), "fever");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_parse_rejects_empty() {
        let err = SymptomToken::parse(" \t ").unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn test_known_lookup() {
        let token = SymptomToken::parse("Sore Throat").unwrap();
        assert_eq!(token.known(), Some(Symptom::SoreThroat));

        let unknown = SymptomToken::parse("zzz_unmatched_token").unwrap();
        assert_eq!(unknown.known(), None);
    }

    #[test]
    fn test_overlaps_in_either_direction() {
        let token = SymptomToken::parse("ache").unwrap();
        assert!(token.overlaps("body_ache"));

        let token = SymptomToken::parse("severe_headache").unwrap();
        assert!(token.overlaps("headache"));

        let token = SymptomToken::parse("rash").unwrap();
        assert!(!token.overlaps("fever"));
    }

    #[test]
    fn test_deserialize_normalizes_and_validates() {
        let token: SymptomToken = serde_json::from_str("\"Runny Nose\"").unwrap();
        assert_eq!(token.as_str(), "runny_nose");
        assert!(serde_json::from_str::<SymptomToken>("\"  \"").is_err());
    }
}
