//! CLI command implementations.
//!
//! Each command constructs the service against the chosen data directory and
//! prints human-readable (or `--json`) output.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use pulse::model::SentimentModel;
use pulse::{paths, server, FeedbackService, Sentiment};

/// Start the HTTP server.
pub fn serve(data_dir: &Path, host: &str, port: u16) -> Result<()> {
    let service = FeedbackService::open(data_dir)?;
    println!(
        "{} model ready ({} features), store at {}",
        "✓".green(),
        service.model().dimensions(),
        paths::db_path(data_dir).display()
    );
    server::run_server(host, port, service)
}

/// Score one comment and store the result.
pub fn analyze(data_dir: &Path, comment: &str, department: &str) -> Result<()> {
    let service = FeedbackService::open(data_dir)?;
    let result = service.analyze(comment, department)?;

    println!(
        "{} [{}] {} ({:+.3})",
        "✓".green(),
        result.id,
        colored_sentiment(result.sentiment),
        result.score
    );
    Ok(())
}

/// Bulk-ingest a CSV file.
pub fn ingest(data_dir: &Path, file: &Path) -> Result<()> {
    let service = FeedbackService::open(data_dir)?;
    let reader = File::open(file).with_context(|| format!("opening {}", file.display()))?;

    let results = service.ingest(reader)?;
    println!(
        "{} analyzed {} comments from {}",
        "✓".green(),
        results.len(),
        file.display()
    );
    for result in &results {
        println!(
            "  [{}] {} ({:+.3}) {}",
            result.id,
            colored_sentiment(result.sentiment),
            result.score,
            truncate(&result.comment, 60)
        );
    }
    Ok(())
}

/// List all stored feedback, newest first.
pub fn list(data_dir: &Path, json: bool) -> Result<()> {
    let service = FeedbackService::open(data_dir)?;
    let records = service.list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No feedback stored yet.");
        return Ok(());
    }
    for record in &records {
        println!(
            "[{}] {} {} ({:+.3}) {}",
            record.id,
            record.timestamp.format("%Y-%m-%d %H:%M"),
            colored_sentiment(record.sentiment),
            record.score,
            truncate(&record.comment, 60)
        );
    }
    Ok(())
}

/// Export the store as CSV to a file or stdout.
pub fn export(data_dir: &Path, output: Option<PathBuf>) -> Result<()> {
    let service = FeedbackService::open(data_dir)?;
    let csv = service.export_csv()?;

    match output {
        Some(path) => {
            let mut file =
                File::create(&path).with_context(|| format!("creating {}", path.display()))?;
            file.write_all(csv.as_bytes())?;
            println!("{} exported to {}", "✓".green(), path.display());
        }
        None => print!("{}", csv),
    }
    Ok(())
}

/// Train the model, or retrain in place with --force.
pub fn train(data_dir: &Path, force: bool) -> Result<()> {
    let model_dir = paths::model_dir(data_dir);

    let model = if force {
        SentimentModel::train(&model_dir)?
    } else {
        SentimentModel::obtain(&model_dir)?
    };

    println!(
        "{} model ready: {} features, artifacts in {}",
        "✓".green(),
        model.dimensions(),
        model_dir.display()
    );
    Ok(())
}

fn colored_sentiment(sentiment: Sentiment) -> colored::ColoredString {
    match sentiment {
        Sentiment::Positive => sentiment.as_str().green(),
        Sentiment::Neutral => sentiment.as_str().yellow(),
        Sentiment::Negative => sentiment.as_str().red(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}…", cut)
    }
}
