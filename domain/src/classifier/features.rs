//! Bag-of-symptoms feature space with TF-IDF weighting.
//!
//! Each distinct symptom token seen during training is one dimension. Since
//! a [`SymptomSet`] is deduplicated, term frequency is presence (0 or 1);
//! the inverse document frequency uses the smoothed form
//! `ln((1 + n) / (1 + df)) + 1` and every vector is L2-normalized.

use crate::symptom::SymptomSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse feature vector: `(dimension, weight)` pairs in ascending
/// dimension order
pub type SparseVector = Vec<(usize, f64)>;

/// Vocabulary and IDF weights learned from a training corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpace {
    /// Sorted, unique symptom tokens
    terms: Vec<String>,
    /// IDF weight per term, aligned with `terms`
    idf: Vec<f64>,
}

impl FeatureSpace {
    /// Learn the vocabulary and document frequencies from `documents`.
    pub fn fit<'a>(documents: impl IntoIterator<Item = &'a SymptomSet>) -> Self {
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        let mut n_documents = 0usize;

        for document in documents {
            n_documents += 1;
            for token in document {
                *document_frequency.entry(token.as_str()).or_default() += 1;
            }
        }

        let n = n_documents as f64;
        let (terms, idf) = document_frequency
            .into_iter()
            .map(|(term, df)| (term.to_string(), ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0))
            .unzip();

        Self { terms, idf }
    }

    /// Number of dimensions
    pub fn dimensions(&self) -> usize {
        self.terms.len()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index_of(term).is_some()
    }

    fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.binary_search_by(|t| t.as_str().cmp(term)).ok()
    }

    /// Project a symptom set into this space.
    ///
    /// Tokens outside the vocabulary are ignored; a set with no known
    /// tokens yields an empty vector.
    pub fn transform(&self, symptoms: &SymptomSet) -> SparseVector {
        let mut vector: SparseVector = symptoms
            .iter()
            .filter_map(|token| self.index_of(token.as_str()))
            .map(|index| (index, self.idf[index]))
            .collect();
        vector.sort_unstable_by_key(|(index, _)| *index);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut vector {
                *weight /= norm;
            }
        }
        vector
    }

    /// Whether the snapshot fields are mutually consistent
    pub(crate) fn is_consistent(&self) -> bool {
        self.terms.len() == self.idf.len()
            && self.terms.windows(2).all(|w| w[0] < w[1])
            && self.idf.iter().all(|w| w.is_finite() && *w > 0.0)
    }
}
