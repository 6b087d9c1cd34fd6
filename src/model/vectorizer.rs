//! TF-IDF feature extractor.
//!
//! Converts raw text into a fixed-dimension weighted bag-of-words vector.
//! The vocabulary and IDF weights are learned once at fit time and reused
//! unchanged at inference time; out-of-vocabulary tokens are silently
//! dropped. Fitted state serializes to JSON so a training run can be
//! persisted and reloaded as-is.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::corpus::STOP_WORDS;

/// TF-IDF vectorizer with a capped vocabulary and stop-word filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term -> feature index
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index
    idf: Vec<f64>,
    /// Vocabulary size cap applied at fit time
    max_features: usize,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            max_features,
        }
    }

    /// Number of features (vocabulary size after fitting).
    pub fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    /// Learn the vocabulary and IDF weights from the given documents.
    ///
    /// Vocabulary selection is deterministic: terms are ranked by corpus
    /// frequency (descending), ties broken lexicographically, then the top
    /// `max_features` are kept.
    pub fn fit(&mut self, documents: &[&str]) {
        let mut term_count: HashMap<String, usize> = HashMap::new();
        let mut doc_count: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = tokenize(doc);
            let unique: HashSet<&String> = tokens.iter().collect();
            for token in &tokens {
                *term_count.entry(token.clone()).or_insert(0) += 1;
            }
            for token in unique {
                *doc_count.entry(token.clone()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&String, &usize)> = term_count.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        self.vocabulary.clear();
        for (idx, (term, _)) in ranked.iter().take(self.max_features).enumerate() {
            self.vocabulary.insert((*term).clone(), idx);
        }

        // Smoothed IDF: ln((1 + n) / (1 + df)) + 1
        let n_docs = documents.len() as f64;
        self.idf = vec![0.0; self.vocabulary.len()];
        for (term, &idx) in &self.vocabulary {
            let df = *doc_count.get(term).unwrap_or(&1) as f64;
            self.idf[idx] = ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0;
        }
    }

    /// Transform one document into an L2-normalized TF-IDF vector.
    pub fn transform(&self, document: &str) -> Array1<f64> {
        let mut weights = vec![0.0; self.vocabulary.len()];

        for token in tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                weights[idx] += 1.0;
            }
        }

        for (idx, weight) in weights.iter_mut().enumerate() {
            *weight *= self.idf[idx];
        }

        let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in &mut weights {
                *weight /= norm;
            }
        }

        Array1::from_vec(weights)
    }

    /// Transform a batch of documents into a feature matrix, one row each.
    pub fn transform_batch(&self, documents: &[&str]) -> Array2<f64> {
        let mut matrix = Array2::zeros((documents.len(), self.dimensions()));
        for (i, doc) in documents.iter().enumerate() {
            matrix.row_mut(i).assign(&self.transform(doc));
        }
        matrix
    }
}

/// Lowercase, split on non-alphanumeric boundaries, drop single-character
/// tokens and stop words.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| STOP_WORDS.binary_search(t).is_err())
        .map(|t| t.to_string())
        .collect()
}
