// KnowledgeBase Library
// Exports the document store, ingestion, answer heuristic, and session flow
// for use by the CLI binary and embedding callers

pub mod answer;
pub mod documents;
pub mod session;

pub use answer::{answer, AnswerError};
pub use documents::{
    format_size, ingest_batch, ingest_file, is_accepted, load_path, Document, DocumentStore,
    FileUpload, IngestError,
};
pub use session::{Exchange, QaPhase, QaSession, SessionError, DEFAULT_ANSWER_DELAY};
