//! Document Management
//!
//! Ingestion of plain-text files into in-memory Document records, and the
//! ordered store that holds them for the session.

pub mod ingest;
pub mod store;

pub use ingest::{format_size, ingest_batch, ingest_file, is_accepted, load_path, FileUpload, IngestError};
pub use store::{Document, DocumentStore};
