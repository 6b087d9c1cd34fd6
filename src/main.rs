use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Feedback sentiment analysis - classify, store, and export free-text comments", long_about = None)]
struct Cli {
    /// Data directory (feedback database and model artifacts)
    #[arg(long, global = true, env = "PULSE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },

    /// Analyze one comment and store the result
    Analyze {
        /// The feedback comment
        comment: String,

        /// Department the comment concerns
        #[arg(long, default_value = "")]
        department: String,
    },

    /// Bulk-analyze comments from a CSV file (requires a 'comment' column)
    Ingest {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// List all stored feedback, newest first
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Export all stored feedback as CSV
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Train the sentiment model from the bundled corpus
    Train {
        /// Retrain even if artifacts already exist
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(pulse::paths::default_data_dir);

    match cli.command {
        Commands::Serve { host, port } => commands::serve(&data_dir, &host, port),
        Commands::Analyze {
            comment,
            department,
        } => commands::analyze(&data_dir, &comment, &department),
        Commands::Ingest { file } => commands::ingest(&data_dir, &file),
        Commands::List { json } => commands::list(&data_dir, json),
        Commands::Export { output } => commands::export(&data_dir, output),
        Commands::Train { force } => commands::train(&data_dir, force),
    }
}
