//! The feedback service object.
//!
//! Explicitly constructed once at startup, immutable thereafter, and passed
//! by reference to every handler - the model pair and store never change for
//! the life of the process.

use anyhow::Result;
use std::io::Read;
use std::path::Path;

use crate::error::InputError;
use crate::ingest::{ingest_csv, AnalyzedComment};
use crate::model::SentimentModel;
use crate::paths;
use crate::store::{FeedbackRecord, FeedbackStore};

/// Immutable pairing of the sentiment model and the feedback store.
pub struct FeedbackService {
    model: SentimentModel,
    store: FeedbackStore,
}

impl FeedbackService {
    /// Open the service against a data directory, training the model on
    /// first-ever use.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let model = SentimentModel::obtain(&paths::model_dir(data_dir))?;
        let store = FeedbackStore::open(paths::db_path(data_dir))?;
        Ok(Self { model, store })
    }

    /// Build from already-constructed parts.
    pub fn new(model: SentimentModel, store: FeedbackStore) -> Self {
        Self { model, store }
    }

    /// Score one comment and persist the result.
    ///
    /// The comment is stored verbatim; a blank comment is rejected before
    /// anything is written.
    pub fn analyze(&self, comment: &str, department: &str) -> Result<AnalyzedComment> {
        if comment.trim().is_empty() {
            return Err(InputError::new("comment must not be empty").into());
        }

        let prediction = self.model.score(comment);
        let id = self
            .store
            .insert(comment, department, prediction.sentiment, prediction.score)?;

        Ok(AnalyzedComment {
            id,
            comment: comment.to_string(),
            department: department.to_string(),
            sentiment: prediction.sentiment,
            score: prediction.score,
        })
    }

    /// Bulk-analyze a CSV stream.
    pub fn ingest(&self, reader: impl Read) -> Result<Vec<AnalyzedComment>> {
        ingest_csv(reader, &self.model, &self.store)
    }

    /// All stored records, newest first.
    pub fn list(&self) -> Result<Vec<FeedbackRecord>> {
        self.store.list_all()
    }

    /// The full store as CSV text.
    pub fn export_csv(&self) -> Result<String> {
        self.store.export_csv()
    }

    pub fn model(&self) -> &SentimentModel {
        &self.model
    }

    pub fn store(&self) -> &FeedbackStore {
        &self.store
    }
}
