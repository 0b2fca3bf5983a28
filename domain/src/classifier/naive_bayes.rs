//! Multinomial Naive Bayes over TF-IDF features.
//!
//! With additive smoothing `alpha`:
//!
//! ```text
//! log P(c)     = ln(n_c / n)
//! log P(j | c) = ln((F_cj + alpha) / (F_c + alpha * d))
//! score(c, x)  = log P(c) + sum_j x_j * log P(j | c)
//! ```
//!
//! where `F_cj` is the summed feature weight of dimension `j` over class
//! `c`'s examples and `d` is the number of dimensions. Posteriors are the
//! softmax of the scores.

use super::features::SparseVector;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Fitted classifier parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    /// Class labels, sorted
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    /// `[class][dimension]`
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fit on `samples`, where each sample is a feature vector and an index
    /// into `classes`.
    ///
    /// `interrupt` is polled once per sample; when it returns `true` the fit
    /// stops with [`DomainError::Cancelled`].
    pub fn fit(
        classes: Vec<String>,
        dimensions: usize,
        samples: &[(SparseVector, usize)],
        alpha: f64,
        interrupt: &dyn Fn() -> bool,
    ) -> Result<Self, DomainError> {
        let n_classes = classes.len();
        let mut class_count = vec![0usize; n_classes];
        let mut feature_count = vec![vec![0.0f64; dimensions]; n_classes];

        for (vector, class) in samples {
            if interrupt() {
                return Err(DomainError::Cancelled);
            }
            class_count[*class] += 1;
            for (dimension, weight) in vector {
                feature_count[*class][*dimension] += weight;
            }
        }

        let total = samples.len() as f64;
        let class_log_prior = class_count
            .iter()
            .map(|&count| (count as f64 / total).ln())
            .collect();

        let feature_log_prob = feature_count
            .iter()
            .map(|row| {
                let denominator = row.iter().sum::<f64>() + alpha * dimensions as f64;
                row.iter()
                    .map(|&count| ((count + alpha) / denominator).ln())
                    .collect()
            })
            .collect();

        Ok(Self {
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Posterior probability for every class, aligned with [`classes`](Self::classes)
    pub fn predict_proba(&self, vector: &SparseVector) -> Vec<f64> {
        let scores: Vec<f64> = self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + vector
                        .iter()
                        .map(|(dimension, weight)| weight * log_probs[*dimension])
                        .sum::<f64>()
            })
            .collect();

        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let sum: f64 = exp.iter().sum();
        exp.into_iter().map(|e| e / sum).collect()
    }

    /// Most probable class and its posterior. Ties go to the class that
    /// sorts first.
    pub fn predict(&self, vector: &SparseVector) -> (&str, f64) {
        let proba = self.predict_proba(vector);
        let mut best = 0;
        for (index, p) in proba.iter().enumerate().skip(1) {
            if *p > proba[best] {
                best = index;
            }
        }
        (self.classes[best].as_str(), proba[best])
    }

    /// Whether the snapshot fields are mutually consistent with `dimensions`
    pub(crate) fn is_consistent(&self, dimensions: usize) -> bool {
        !self.classes.is_empty()
            && self.classes.windows(2).all(|w| w[0] < w[1])
            && self.class_log_prior.len() == self.classes.len()
            && self.feature_log_prob.len() == self.classes.len()
            && self
                .feature_log_prob
                .iter()
                .all(|row| row.len() == dimensions && row.iter().all(|v| v.is_finite()))
            && self.class_log_prior.iter().all(|v| v.is_finite())
    }
}
