//! Document Ingestion
//!
//! Filters candidate files to the supported plain-text types, decodes their
//! content, and builds [`Document`] records. Rejected files are skipped, never
//! surfaced as errors to the caller.

use std::fs;
use std::path::Path;
use thiserror::Error;

use super::store::Document;

/// Accepted file extensions (checked case-insensitively)
const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "md"];

/// Accepted MIME type when one is provided
const ACCEPTED_MIME: &str = "text/plain";

/// Maximum file size (50 MB) allowed for ingestion.
const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("File too large: {0} bytes (max {1} bytes)")]
    FileTooLarge(u64, u64),
    #[error("Not valid UTF-8 text: {0}")]
    Decode(String),
}

/// A candidate file handed to ingestion: name, optional MIME hint, raw bytes.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, mime: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime,
            bytes,
        }
    }
}

/// Whether a file is accepted for upload, by MIME type or extension.
pub fn is_accepted(name: &str, mime: Option<&str>) -> bool {
    if mime == Some(ACCEPTED_MIME) {
        return true;
    }
    let extension = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    ACCEPTED_EXTENSIONS.contains(&extension.as_str())
}

/// Ingest a single candidate file.
///
/// Fails with [`IngestError::UnsupportedType`] for anything that is not
/// plain text or markdown, [`IngestError::FileTooLarge`] above the size cap,
/// and [`IngestError::Decode`] for content that is not valid UTF-8.
pub fn ingest_file(upload: FileUpload) -> Result<Document, IngestError> {
    if !is_accepted(&upload.name, upload.mime.as_deref()) {
        return Err(IngestError::UnsupportedType(upload.name));
    }

    let size = upload.bytes.len() as u64;
    if size > MAX_FILE_SIZE {
        return Err(IngestError::FileTooLarge(size, MAX_FILE_SIZE));
    }

    let content =
        String::from_utf8(upload.bytes).map_err(|_| IngestError::Decode(upload.name.clone()))?;

    Ok(Document::new(upload.name, content, size))
}

/// Ingest a batch of candidate files in encounter order.
///
/// Files that fail are skipped without aborting the rest of the batch:
/// unsupported types silently, decode and size failures with a warning.
pub fn ingest_batch(uploads: Vec<FileUpload>) -> Vec<Document> {
    let mut documents = Vec::new();

    for upload in uploads {
        match ingest_file(upload) {
            Ok(doc) => documents.push(doc),
            Err(IngestError::UnsupportedType(name)) => {
                tracing::debug!(name = %name, "Unsupported file type, skipping");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to ingest file, skipping");
            }
        }
    }

    documents
}

/// Read a candidate file from disk, deriving the MIME hint from its extension.
/// Used by the CLI in place of the browser file picker.
pub fn load_path(path: &Path) -> Result<FileUpload, IngestError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let mime = match extension.as_str() {
        "txt" => Some(ACCEPTED_MIME.to_string()),
        _ => None,
    };

    let bytes = fs::read(path)?;
    Ok(FileUpload::new(name, mime, bytes))
}

/// Human-readable file size (B / KB / MB), as shown in the upload list.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
