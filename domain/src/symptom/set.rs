//! Deduplicated, order-independent symptom sets

use super::known::Symptom;
use super::token::SymptomToken;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An unordered set of reported symptoms.
///
/// Backed by a `BTreeSet`, so iteration is always in token order regardless
/// of how the symptoms were reported. An empty set is valid and is the
/// canonical "no symptoms" input.
///
/// # Example
///
/// ```
/// use triage_domain::symptom::SymptomSet;
///
/// let set = SymptomSet::from_tokens(["Cough", "fever", "cough", "  "]);
/// assert_eq!(set.len(), 2);
/// assert!(set.contains("cough"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomSet(BTreeSet<SymptomToken>);

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw tokens, silently dropping ones that normalize to
    /// nothing.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .filter_map(|raw| SymptomToken::parse(raw.as_ref()).ok())
            .collect()
    }

    /// Build a set from raw tokens, rejecting any that normalize to nothing.
    pub fn try_from_tokens<I, S>(tokens: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|raw| SymptomToken::parse(raw.as_ref()))
            .collect()
    }

    pub fn insert(&mut self, token: impl Into<SymptomToken>) -> bool {
        self.0.insert(token.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t.as_str() == token)
    }

    pub fn contains_symptom(&self, symptom: Symptom) -> bool {
        self.contains(symptom.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymptomToken> {
        self.0.iter()
    }

    /// Tokens that are not part of the known vocabulary
    pub fn unknown_tokens(&self) -> impl Iterator<Item = &SymptomToken> {
        self.0.iter().filter(|t| t.known().is_none())
    }

    /// Comma-separated token list, in set order
    pub fn joined(&self, separator: &str) -> String {
        self.0
            .iter()
            .map(SymptomToken::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl FromIterator<SymptomToken> for SymptomSet {
    fn from_iter<T: IntoIterator<Item = SymptomToken>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<Symptom> for SymptomSet {
    fn from_iter<T: IntoIterator<Item = Symptom>>(iter: T) -> Self {
        Self(iter.into_iter().map(SymptomToken::from).collect())
    }
}

impl<'a> IntoIterator for &'a SymptomSet {
    type Item = &'a SymptomToken;
    type IntoIter = std::collections::btree_set::Iter<'a, SymptomToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for SymptomSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.joined(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicates_after_normalization() {
        let set = SymptomSet::from_tokens(["Runny Nose", "runny_nose", "runny-nose"]);
        assert_eq!(set.len(), 1);
        assert!(set.contains_symptom(Symptom::RunnyNose));
    }

    #[test]
    fn test_order_is_irrelevant() {
        let a = SymptomSet::from_tokens(["fever", "cough"]);
        let b = SymptomSet::from_tokens(["cough", "fever"]);
        assert_eq!(a, b);
        assert_eq!(a.joined(","), "cough,fever");
    }

    #[test]
    fn test_try_from_tokens_rejects_empty_token() {
        let result = SymptomSet::try_from_tokens(["fever", ""]);
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_tokens() {
        let set = SymptomSet::from_tokens(["fever", "zzz_unmatched_token"]);
        let unknown: Vec<_> = set.unknown_tokens().map(|t| t.as_str()).collect();
        assert_eq!(unknown, vec!["zzz_unmatched_token"]);
    }

    #[test]
    fn test_from_known_symptoms() {
        let set: SymptomSet = [Symptom::Rash, Symptom::Fever].into_iter().collect();
        assert_eq!(set.to_string(), "{fever, rash}");
    }

    #[test]
    fn test_serializes_as_sorted_list() {
        let set = SymptomSet::from_tokens(["rash", "fever"]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["fever","rash"]"#);

        let back: SymptomSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
