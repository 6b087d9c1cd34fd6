//! Multinomial naive Bayes classifier with additive smoothing.
//!
//! Log-space throughout for numerical stability. `predict_proba` returns the
//! full normalized distribution over classes so callers can derive a signed
//! confidence score from the winning class.

use anyhow::{ensure, Result};
use ndarray::{ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

/// Fitted multinomial naive Bayes model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    /// Class labels, ascending
    classes: Vec<i8>,
    /// ln P(class), aligned with `classes`
    class_log_prior: Vec<f64>,
    /// ln P(feature | class), `[class][feature]`
    feature_log_prob: Vec<Vec<f64>>,
    /// Additive smoothing parameter
    alpha: f64,
    /// Expected feature vector length
    n_features: usize,
}

impl MultinomialNb {
    /// Fit on a feature matrix (one row per document) and per-row labels.
    pub fn fit(x: ArrayView2<'_, f64>, y: &[i8], alpha: f64) -> Result<Self> {
        ensure!(
            x.nrows() == y.len(),
            "feature matrix has {} rows but {} labels were given",
            x.nrows(),
            y.len()
        );
        ensure!(!y.is_empty(), "cannot fit on an empty training set");
        ensure!(alpha > 0.0, "smoothing parameter must be positive");

        let mut classes: Vec<i8> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();

        let n_features = x.ncols();
        let n_docs = y.len() as f64;

        let mut class_log_prior = Vec::with_capacity(classes.len());
        let mut feature_log_prob = Vec::with_capacity(classes.len());

        for &class in &classes {
            let doc_count = y.iter().filter(|&&label| label == class).count() as f64;
            class_log_prior.push((doc_count / n_docs).ln());

            // Sum feature weights over the documents of this class
            let mut feature_totals = vec![0.0; n_features];
            for (row, &label) in x.rows().into_iter().zip(y) {
                if label == class {
                    for (total, &weight) in feature_totals.iter_mut().zip(row.iter()) {
                        *total += weight;
                    }
                }
            }

            let class_total: f64 = feature_totals.iter().sum();
            let denominator = class_total + alpha * n_features as f64;
            let log_probs = feature_totals
                .iter()
                .map(|&count| ((count + alpha) / denominator).ln())
                .collect();
            feature_log_prob.push(log_probs);
        }

        Ok(Self {
            classes,
            class_log_prior,
            feature_log_prob,
            alpha,
            n_features,
        })
    }

    /// Class labels, ascending.
    pub fn classes(&self) -> &[i8] {
        &self.classes
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Unnormalized log joint likelihood per class.
    fn log_joint(&self, x: ArrayView1<'_, f64>) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.n_features, "feature vector dimension mismatch");
        self.classes
            .iter()
            .enumerate()
            .map(|(c, _)| {
                let feature_terms: f64 = x
                    .iter()
                    .zip(&self.feature_log_prob[c])
                    .map(|(&weight, &log_prob)| weight * log_prob)
                    .sum();
                self.class_log_prior[c] + feature_terms
            })
            .collect()
    }

    /// Normalized probability distribution over `classes()`.
    pub fn predict_proba(&self, x: ArrayView1<'_, f64>) -> Vec<f64> {
        let log_joint = self.log_joint(x);
        let max = log_joint.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let unnormalized: Vec<f64> = log_joint.iter().map(|l| (l - max).exp()).collect();
        let total: f64 = unnormalized.iter().sum();
        unnormalized.into_iter().map(|p| p / total).collect()
    }

    /// Predicted class plus the full probability distribution.
    ///
    /// Ties go to the lowest class label (the first index of the maximum).
    pub fn predict_with_proba(&self, x: ArrayView1<'_, f64>) -> (i8, Vec<f64>) {
        let proba = self.predict_proba(x);
        let best = proba
            .iter()
            .enumerate()
            .fold(0, |best, (idx, &p)| if p > proba[best] { idx } else { best });
        (self.classes[best], proba)
    }

    /// Position of a class label in `classes()`, if it was seen at fit time.
    pub fn class_index(&self, class: i8) -> Option<usize> {
        self.classes.iter().position(|&c| c == class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    fn toy_model() -> MultinomialNb {
        // Two features: feature 0 fires for class 1, feature 1 for class -1
        let x = array![[3.0, 0.0], [2.0, 1.0], [0.0, 3.0], [1.0, 2.0]];
        let y = [1, 1, -1, -1];
        MultinomialNb::fit(x.view(), &y, 1.0).unwrap()
    }

    #[test]
    fn test_classes_are_sorted() {
        let model = toy_model();
        assert_eq!(model.classes(), &[-1, 1]);
        assert_eq!(model.class_index(1), Some(1));
        assert_eq!(model.class_index(0), None);
    }

    #[test]
    fn test_predict_separates_classes() {
        let model = toy_model();

        let (label, _) = model.predict_with_proba(array![4.0, 0.0].view());
        assert_eq!(label, 1);

        let (label, _) = model.predict_with_proba(array![0.0, 4.0].view());
        assert_eq!(label, -1);
    }

    #[test]
    fn test_proba_sums_to_one() {
        let model = toy_model();
        let proba = model.predict_proba(array![1.0, 1.0].view());
        assert_eq!(proba.len(), 2);
        assert_relative_eq!(proba.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_vector_falls_back_to_priors() {
        // 3 docs of class 1, 1 doc of class -1: the prior should decide
        let x = array![[1.0, 0.0], [1.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let y = [1, 1, 1, -1];
        let model = MultinomialNb::fit(x.view(), &y, 1.0).unwrap();

        let (label, proba) = model.predict_with_proba(array![0.0, 0.0].view());
        assert_eq!(label, 1);
        assert_relative_eq!(proba[1], 0.75, epsilon = 1e-9);
    }

    #[test]
    fn test_fit_rejects_mismatched_lengths() {
        let x: Array2<f64> = Array2::zeros((2, 3));
        assert!(MultinomialNb::fit(x.view(), &[1], 1.0).is_err());
        assert!(MultinomialNb::fit(x.view(), &[1, 0], 0.0).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let model = toy_model();
        let json = serde_json::to_string(&model).unwrap();
        let restored: MultinomialNb = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.alpha(), model.alpha());
        let x = array![2.0, 1.0];
        assert_eq!(
            model.predict_with_proba(x.view()),
            restored.predict_with_proba(x.view())
        );
    }
}
