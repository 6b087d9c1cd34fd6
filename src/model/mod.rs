//! Sentiment model: feature extraction, classification, and the
//! train-or-load artifact lifecycle.
//!
//! The (vectorizer, classifier) pair is always used together as a matched
//! pair from the same training run. `obtain()` loads a previously persisted
//! pair when both artifact files exist, otherwise trains from the bundled
//! corpus and persists the result. A corrupt artifact is a fatal error, not
//! a retrain trigger - replacing the files is an explicit operator action
//! (`pulse train --force`).

pub mod bayes;
pub mod corpus;
pub mod vectorizer;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use bayes::MultinomialNb;
use vectorizer::TfidfVectorizer;

/// Vocabulary size cap for the feature extractor.
const MAX_FEATURES: usize = 1000;

/// Additive smoothing for the classifier.
const SMOOTHING_ALPHA: f64 = 1.0;

/// Artifact file names under the model directory.
pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const CLASSIFIER_FILE: &str = "classifier.json";

/// Sentiment category of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            other => anyhow::bail!("unknown sentiment label: {other}"),
        }
    }
}

/// Result of scoring one comment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub sentiment: Sentiment,
    /// Signed confidence in [-1.0, 1.0]; exactly 0.0 for neutral.
    pub score: f64,
}

/// The matched (feature extractor, classifier) pair.
#[derive(Debug)]
pub struct SentimentModel {
    vectorizer: TfidfVectorizer,
    classifier: MultinomialNb,
}

impl SentimentModel {
    /// Load the persisted pair if both artifact files exist, otherwise train
    /// from the bundled corpus and persist before returning.
    ///
    /// Call once at startup; the returned model is immutable for the rest of
    /// the process lifetime.
    pub fn obtain(model_dir: &Path) -> Result<Self> {
        let vectorizer_path = model_dir.join(VECTORIZER_FILE);
        let classifier_path = model_dir.join(CLASSIFIER_FILE);

        if vectorizer_path.exists() && classifier_path.exists() {
            let vectorizer = read_artifact(&vectorizer_path)?;
            let classifier = read_artifact(&classifier_path)?;
            return Ok(Self {
                vectorizer,
                classifier,
            });
        }

        Self::train(model_dir)
    }

    /// Train a fresh pair from the bundled corpus and persist both artifacts.
    ///
    /// Overwrites any existing artifacts in `model_dir`.
    pub fn train(model_dir: &Path) -> Result<Self> {
        let texts: Vec<&str> = corpus::TRAINING_EXAMPLES.iter().map(|(t, _)| *t).collect();
        let labels: Vec<i8> = corpus::TRAINING_EXAMPLES.iter().map(|(_, l)| *l).collect();

        let mut vectorizer = TfidfVectorizer::new(MAX_FEATURES);
        vectorizer.fit(&texts);

        let matrix = vectorizer.transform_batch(&texts);
        let classifier = MultinomialNb::fit(matrix.view(), &labels, SMOOTHING_ALPHA)
            .context("training the sentiment classifier")?;

        std::fs::create_dir_all(model_dir)
            .with_context(|| format!("creating model directory {}", model_dir.display()))?;
        write_artifact(&model_dir.join(VECTORIZER_FILE), &vectorizer)?;
        write_artifact(&model_dir.join(CLASSIFIER_FILE), &classifier)?;

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Score one comment.
    ///
    /// Blank input short-circuits to (neutral, 0.0) without touching the
    /// classifier. Otherwise the score is the winning class probability,
    /// signed by polarity: P(positive), -P(negative), or exactly 0.0 for
    /// neutral (the neutral probability is discarded).
    pub fn score(&self, comment: &str) -> Prediction {
        if comment.trim().is_empty() {
            return Prediction {
                sentiment: Sentiment::Neutral,
                score: 0.0,
            };
        }

        let features = self.vectorizer.transform(comment);
        let (class, proba) = self.classifier.predict_with_proba(features.view());

        match class {
            1 => Prediction {
                sentiment: Sentiment::Positive,
                score: self.posterior(1, &proba),
            },
            -1 => Prediction {
                sentiment: Sentiment::Negative,
                score: -self.posterior(-1, &proba),
            },
            _ => Prediction {
                sentiment: Sentiment::Neutral,
                score: 0.0,
            },
        }
    }

    /// Vocabulary size of the fitted extractor.
    pub fn dimensions(&self) -> usize {
        self.vectorizer.dimensions()
    }

    fn posterior(&self, class: i8, proba: &[f64]) -> f64 {
        self.classifier
            .class_index(class)
            .map(|idx| proba[idx])
            .unwrap_or(0.0)
    }
}

fn read_artifact<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading model artifact {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("model artifact {} is corrupt or incompatible", path.display()))
}

fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    std::fs::write(path, json)
        .with_context(|| format!("writing model artifact {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_blank_input_short_circuit() -> Result<()> {
        let temp = TempDir::new()?;
        let model = SentimentModel::obtain(temp.path())?;

        for blank in ["", "   ", "\t\n "] {
            let prediction = model.score(blank);
            assert_eq!(prediction.sentiment, Sentiment::Neutral);
            assert_eq!(prediction.score, 0.0);
        }
        Ok(())
    }

    #[test]
    fn test_corpus_sentences_score_as_labeled() -> Result<()> {
        let temp = TempDir::new()?;
        let model = SentimentModel::obtain(temp.path())?;

        let positive = model.score("The professor was very helpful and engaging.");
        assert_eq!(positive.sentiment, Sentiment::Positive);
        assert!(positive.score > 0.0);

        let negative = model.score("The lecture was boring and hard to follow.");
        assert_eq!(negative.sentiment, Sentiment::Negative);
        assert!(negative.score < 0.0);

        let neutral = model.score("The class starts at 9 AM.");
        assert_eq!(neutral.sentiment, Sentiment::Neutral);
        assert_eq!(neutral.score, 0.0);
        Ok(())
    }

    #[test]
    fn test_score_stays_in_range() -> Result<()> {
        let temp = TempDir::new()?;
        let model = SentimentModel::obtain(temp.path())?;

        for (text, _) in corpus::TRAINING_EXAMPLES {
            let p = model.score(text);
            assert!(p.score >= -1.0 && p.score <= 1.0, "score out of range for {text:?}");
            match p.sentiment {
                Sentiment::Positive => assert!(p.score > 0.0),
                Sentiment::Negative => assert!(p.score < 0.0),
                Sentiment::Neutral => assert_eq!(p.score, 0.0),
            }
        }
        Ok(())
    }

    #[test]
    fn test_obtain_persists_then_loads() -> Result<()> {
        let temp = TempDir::new()?;

        let first = SentimentModel::obtain(temp.path())?;
        assert!(temp.path().join(VECTORIZER_FILE).exists());
        assert!(temp.path().join(CLASSIFIER_FILE).exists());

        let vectorizer_mtime = std::fs::metadata(temp.path().join(VECTORIZER_FILE))?.modified()?;
        let classifier_mtime = std::fs::metadata(temp.path().join(CLASSIFIER_FILE))?.modified()?;

        // Second obtain loads instead of retraining
        let second = SentimentModel::obtain(temp.path())?;
        assert_eq!(
            std::fs::metadata(temp.path().join(VECTORIZER_FILE))?.modified()?,
            vectorizer_mtime
        );
        assert_eq!(
            std::fs::metadata(temp.path().join(CLASSIFIER_FILE))?.modified()?,
            classifier_mtime
        );

        // And scores identically
        let text = "The course materials were excellent and well-organized.";
        assert_eq!(first.score(text), second.score(text));
        Ok(())
    }

    #[test]
    fn test_corrupt_artifact_is_fatal() -> Result<()> {
        let temp = TempDir::new()?;
        SentimentModel::obtain(temp.path())?;

        std::fs::write(temp.path().join(CLASSIFIER_FILE), "not json")?;

        let err = SentimentModel::obtain(temp.path()).unwrap_err();
        assert!(err.to_string().contains("corrupt"), "unexpected error: {err:#}");
        Ok(())
    }

    #[test]
    fn test_sentiment_label_round_trip() {
        for s in [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative] {
            assert_eq!(s.as_str().parse::<Sentiment>().unwrap(), s);
        }
    }
}
