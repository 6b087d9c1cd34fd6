//! Feedback storage - a single SQLite table, append-only by default.
//!
//! The store keeps the database path and opens one connection per operation;
//! write serialization is delegated to SQLite's own locking. Schema creation
//! is idempotent and runs on every open, so the store is never partially
//! initialized.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::model::Sentiment;

/// One analyzed comment as persisted.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRecord {
    pub id: i64,
    pub comment: String,
    pub department: String,
    pub sentiment: Sentiment,
    pub score: f64,
    pub timestamp: DateTime<Utc>,
}

/// A scored row waiting to be inserted.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub comment: String,
    pub department: String,
    pub sentiment: Sentiment,
    pub score: f64,
}

/// Durable store for analyzed comments.
pub struct FeedbackStore {
    db_path: PathBuf,
}

impl FeedbackStore {
    /// Open the store, creating the database file and schema if needed.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating data directory {}", parent.display()))?;
        }

        let store = Self { db_path };
        let conn = store.connect()?;
        Self::init_schema(&conn)?;
        Ok(store)
    }

    /// Open a per-operation connection.
    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .with_context(|| format!("opening feedback database {}", self.db_path.display()))
    }

    /// Idempotent schema creation, safe to run on every start.
    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS feedback (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                comment TEXT NOT NULL,
                department TEXT NOT NULL DEFAULT '',
                sentiment TEXT NOT NULL,
                score REAL NOT NULL,
                timestamp TEXT NOT NULL
            )",
            [],
        )
        .context("creating feedback table")?;
        Ok(())
    }

    /// Append one record; the store assigns id and timestamp.
    pub fn insert(
        &self,
        comment: &str,
        department: &str,
        sentiment: Sentiment,
        score: f64,
    ) -> Result<i64> {
        let conn = self.connect()?;
        let id = insert_row(
            &conn,
            comment,
            department,
            sentiment,
            score,
            Utc::now(),
        )?;
        Ok(id)
    }

    /// Append many records inside a single transaction.
    ///
    /// All-or-nothing: any failing row rolls the whole batch back, so a bulk
    /// ingestion never leaves a partially-applied batch behind.
    pub fn insert_batch(&self, rows: &[NewFeedback]) -> Result<Vec<i64>> {
        let mut conn = self.connect()?;
        let tx = conn.transaction().context("starting batch transaction")?;

        let now = Utc::now();
        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            let id = insert_row(
                &tx,
                &row.comment,
                &row.department,
                row.sentiment,
                row.score,
                now,
            )?;
            ids.push(id);
        }

        tx.commit().context("committing batch transaction")?;
        Ok(ids)
    }

    /// All records, most recent first.
    ///
    /// Timestamps are second-granularity in sort terms, so id breaks ties to
    /// keep the ordering deterministic.
    pub fn list_all(&self) -> Result<Vec<FeedbackRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, comment, department, sentiment, score, timestamp
             FROM feedback ORDER BY timestamp DESC, id DESC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, DateTime<Utc>>(5)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("reading feedback rows")?;

        rows.into_iter()
            .map(|(id, comment, department, sentiment, score, timestamp)| {
                Ok(FeedbackRecord {
                    id,
                    comment,
                    department,
                    sentiment: sentiment.parse()?,
                    score,
                    timestamp,
                })
            })
            .collect()
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM feedback", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// The full store serialized as CSV, same ordering as `list_all`.
    ///
    /// Header `id,comment,department,sentiment,score,timestamp` followed by
    /// one row per record; embedded delimiters and newlines are quoted by
    /// the csv writer.
    pub fn export_csv(&self) -> Result<String> {
        let records = self.list_all()?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["id", "comment", "department", "sentiment", "score", "timestamp"])?;
        for record in &records {
            writer.write_record([
                record.id.to_string(),
                record.comment.clone(),
                record.department.clone(),
                record.sentiment.to_string(),
                record.score.to_string(),
                record.timestamp.to_rfc3339(),
            ])?;
        }

        let bytes = writer.into_inner().context("flushing CSV export")?;
        String::from_utf8(bytes).context("CSV export is not valid UTF-8")
    }
}

/// Insert one row on an open connection; shared by single and batch paths.
fn insert_row(
    conn: &Connection,
    comment: &str,
    department: &str,
    sentiment: Sentiment,
    score: f64,
    timestamp: DateTime<Utc>,
) -> Result<i64> {
    let id = conn
        .query_row(
            "INSERT INTO feedback (comment, department, sentiment, score, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id",
            params![
                comment,
                department,
                sentiment.as_str(),
                score,
                timestamp.to_rfc3339(),
            ],
            |row| row.get(0),
        )
        .context("inserting feedback row")?;
    Ok(id)
}
