//! Bulk CSV ingestion pipeline.
//!
//! Parses a CSV stream, validates the header, scores each non-blank comment,
//! and inserts the results as one all-or-nothing batch. Blank comments are
//! skipped silently (a deliberate ignore-empty policy, not an error); any
//! other failure aborts the run and rolls the batch back.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;

use crate::error::InputError;
use crate::model::{Sentiment, SentimentModel};
use crate::store::{FeedbackStore, NewFeedback};

/// One accepted row, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedComment {
    pub id: i64,
    pub comment: String,
    pub department: String,
    pub sentiment: Sentiment,
    pub score: f64,
}

/// Run a CSV stream through the scorer and into the store.
///
/// The header must contain a `comment` column; `department` is optional and
/// defaults to empty. Returns the accepted rows in input order with their
/// assigned ids.
pub fn ingest_csv(
    reader: impl Read,
    model: &SentimentModel,
    store: &FeedbackStore,
) -> Result<Vec<AnalyzedComment>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers().context("reading CSV header")?.clone();
    let comment_idx = headers
        .iter()
        .position(|h| h.trim() == "comment")
        .ok_or_else(|| InputError::new("CSV must contain a 'comment' column"))?;
    let department_idx = headers.iter().position(|h| h.trim() == "department");

    let mut scored = Vec::new();
    for row in csv_reader.records() {
        let record = row.context("reading CSV row")?;

        let comment = record.get(comment_idx).unwrap_or("").trim();
        if comment.is_empty() {
            continue;
        }
        let department = department_idx
            .and_then(|idx| record.get(idx))
            .unwrap_or("")
            .trim();

        let prediction = model.score(comment);
        scored.push(NewFeedback {
            comment: comment.to_string(),
            department: department.to_string(),
            sentiment: prediction.sentiment,
            score: prediction.score,
        });
    }

    let ids = store.insert_batch(&scored)?;

    Ok(ids
        .into_iter()
        .zip(scored)
        .map(|(id, row)| AnalyzedComment {
            id,
            comment: row.comment,
            department: row.department,
            sentiment: row.sentiment,
            score: row.score,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> Result<(TempDir, SentimentModel, FeedbackStore)> {
        let temp = TempDir::new()?;
        let model = SentimentModel::obtain(&temp.path().join("model"))?;
        let store = FeedbackStore::open(temp.path().join("feedback.db"))?;
        Ok((temp, model, store))
    }

    #[test]
    fn test_ingest_happy_path() -> Result<()> {
        let (_temp, model, store) = fixture()?;
        let csv = "comment,department\n\
                   The professor was very helpful and engaging.,physics\n\
                   The lecture was boring and hard to follow.,history\n";

        let results = ingest_csv(csv.as_bytes(), &model, &store)?;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].sentiment, Sentiment::Positive);
        assert_eq!(results[0].department, "physics");
        assert_eq!(results[1].sentiment, Sentiment::Negative);
        assert_eq!(store.count()?, 2);
        Ok(())
    }

    #[test]
    fn test_missing_comment_column_is_schema_error() -> Result<()> {
        let (_temp, model, store) = fixture()?;
        let csv = "department,text\nmath,Nice course\n";

        let err = ingest_csv(csv.as_bytes(), &model, &store).unwrap_err();
        assert!(err.downcast_ref::<InputError>().is_some());
        assert!(err.to_string().contains("'comment'"));
        assert_eq!(store.count()?, 0, "no rows inserted on schema error");
        Ok(())
    }

    #[test]
    fn test_blank_rows_skipped_silently() -> Result<()> {
        let (_temp, model, store) = fixture()?;
        let csv = "comment,department\n\
                   Great instructor.,math\n\
                   ,math\n\
                   \"   \",math\n\
                   The grading system is unfair.,\n";

        let results = ingest_csv(csv.as_bytes(), &model, &store)?;
        assert_eq!(results.len(), 2, "blank comments are neither success nor failure");
        assert_eq!(store.count()?, 2);
        Ok(())
    }

    #[test]
    fn test_department_defaults_when_column_absent() -> Result<()> {
        let (_temp, model, store) = fixture()?;
        let csv = "comment\nThe textbook has 12 chapters.\n";

        let results = ingest_csv(csv.as_bytes(), &model, &store)?;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].department, "");
        assert_eq!(results[0].sentiment, Sentiment::Neutral);
        assert_eq!(results[0].score, 0.0);
        Ok(())
    }

    #[test]
    fn test_results_preserve_input_order() -> Result<()> {
        let (_temp, model, store) = fixture()?;
        let csv = "comment\nfirst remark here\nsecond remark here\nthird remark here\n";

        let results = ingest_csv(csv.as_bytes(), &model, &store)?;
        let comments: Vec<&str> = results.iter().map(|r| r.comment.as_str()).collect();
        assert_eq!(comments, vec!["first remark here", "second remark here", "third remark here"]);
        assert!(results.windows(2).all(|w| w[1].id > w[0].id));
        Ok(())
    }

    #[test]
    fn test_short_rows_tolerated() -> Result<()> {
        let (_temp, model, store) = fixture()?;
        // Second row has no department cell at all
        let csv = "comment,department\nGood class overall.,math\nUnclear assignment.\n";

        let results = ingest_csv(csv.as_bytes(), &model, &store)?;
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].department, "");
        Ok(())
    }
}
