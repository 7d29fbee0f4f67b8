//! KnowledgeBase CLI
//!
//! Command-line front end for the document Q&A core: ingest text files,
//! ask a question, print the answer as text or JSON.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use knowledgebase_lib::{format_size, is_accepted, load_path, FileUpload, QaSession};

#[derive(Parser)]
#[command(name = "knowledgebase")]
#[command(about = "Ask questions about your documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest documents and answer a question
    Ask {
        /// Question to ask
        question: String,
        /// Document files to upload (.txt, .md)
        #[arg(short, long = "file", required = true)]
        files: Vec<PathBuf>,
        /// Artificial processing delay in milliseconds
        #[arg(long, default_value = "2000")]
        delay_ms: u64,
        /// Emit the full exchange as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show which files would be accepted for upload
    Inspect {
        /// Candidate files
        files: Vec<PathBuf>,
        /// Emit results as JSON
        #[arg(long)]
        json: bool,
    },
}

// ============ Output Types ============

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AskOutput {
    question: String,
    answer: String,
    document_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectItem {
    name: String,
    size: u64,
    size_display: String,
    accepted: bool,
}

// ============ Main ============

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ask {
            question,
            files,
            delay_ms,
            json,
        } => handle_ask(question, files, delay_ms, json).await,
        Commands::Inspect { files, json } => handle_inspect(files, json),
    }
}

// ============ Handlers ============

async fn handle_ask(
    question: String,
    files: Vec<PathBuf>,
    delay_ms: u64,
    json: bool,
) -> anyhow::Result<()> {
    let mut uploads = Vec::with_capacity(files.len());
    for path in &files {
        let upload = load_path(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        uploads.push(upload);
    }

    let session = QaSession::with_delay(Duration::from_millis(delay_ms));
    let documents = session.upload(uploads);

    for doc in &documents {
        tracing::info!(name = %doc.name, size = %format_size(doc.size), "Uploaded document");
    }
    let skipped = files.len() - documents.len();
    if skipped > 0 {
        tracing::warn!(skipped, "Some files were not accepted for upload");
    }

    let answer = session.submit(&question).await?;

    if json {
        let output = AskOutput {
            question: question.trim().to_string(),
            answer,
            document_count: documents.len(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", answer);
    }

    Ok(())
}

fn handle_inspect(files: Vec<PathBuf>, json: bool) -> anyhow::Result<()> {
    let mut items = Vec::with_capacity(files.len());
    for path in &files {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("failed to stat {}", path.display()))?;
        let upload: FileUpload = load_path(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        items.push(InspectItem {
            accepted: is_accepted(&upload.name, upload.mime.as_deref()),
            size_display: format_size(metadata.len()),
            size: metadata.len(),
            name: upload.name,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for item in &items {
            let status = if item.accepted { "accepted" } else { "skipped" };
            println!("{:<10} {:>10}  {}", status, item.size_display, item.name);
        }
    }

    Ok(())
}
