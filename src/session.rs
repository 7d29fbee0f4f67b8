//! Q&A Session
//!
//! Session-scoped state for the upload/ask flow: owns the document store and
//! the current question/answer exchange, and serializes answer generation so
//! a session never runs two heuristics at once.

use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::answer::{answer, AnswerError};
use crate::documents::{ingest_batch, Document, DocumentStore, FileUpload};

/// Artificial processing delay before an answer is produced, matching the
/// demo's simulated latency. Presentation concern only.
pub const DEFAULT_ANSWER_DELAY: Duration = Duration::from_secs(2);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("please upload at least one document first")]
    EmptyCorpus,
    #[error("an answer is already being generated")]
    AnswerInFlight,
}

impl From<AnswerError> for SessionError {
    fn from(e: AnswerError) -> Self {
        match e {
            AnswerError::EmptyCorpus => SessionError::EmptyCorpus,
        }
    }
}

/// Where the session is in the ask flow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QaPhase {
    Idle,
    Pending,
    Answered,
}

/// The current question/answer pair. Overwritten on each submission; no
/// history is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub question: String,
    pub answer: Option<String>,
    pub asked_at: DateTime<Utc>,
}

struct SessionState {
    store: DocumentStore,
    phase: QaPhase,
    current: Option<Exchange>,
}

/// One user session: document store plus ask-flow state.
///
/// All mutation goes through the interior lock, so uploads and removals from
/// UI-style event handlers stay serialized. The lock is never held across an
/// await point.
pub struct QaSession {
    state: Mutex<SessionState>,
    delay: Duration,
}

impl Default for QaSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QaSession {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_ANSWER_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            state: Mutex::new(SessionState {
                store: DocumentStore::new(),
                phase: QaPhase::Idle,
                current: None,
            }),
            delay,
        }
    }

    /// Ingest a batch of files and append the accepted ones to the store.
    /// Returns the accepted documents; rejected files are skipped silently.
    pub fn upload(&self, files: Vec<FileUpload>) -> Vec<Document> {
        let documents = ingest_batch(files);
        let mut state = self.state.lock();
        state.store.append(documents.clone());
        documents
    }

    /// Remove a document by id. Returns whether anything was removed.
    pub fn remove(&self, id: &str) -> bool {
        self.state.lock().store.remove(id)
    }

    /// Snapshot of the stored documents, in upload order.
    pub fn documents(&self) -> Vec<Document> {
        self.state.lock().store.documents().to_vec()
    }

    pub fn document_count(&self) -> usize {
        self.state.lock().store.len()
    }

    pub fn phase(&self) -> QaPhase {
        self.state.lock().phase
    }

    /// The current exchange, if a question has been submitted.
    pub fn current(&self) -> Option<Exchange> {
        self.state.lock().current.clone()
    }

    /// Submit a question and produce an answer.
    ///
    /// Rejected without a phase transition when the store is empty
    /// ([`SessionError::EmptyCorpus`]) or while a previous submission is
    /// still pending ([`SessionError::AnswerInFlight`]). Otherwise the
    /// session moves Idle/Answered -> Pending, suspends for the configured
    /// delay, records the exchange, and moves to Answered.
    pub async fn submit(&self, question: &str) -> Result<String, SessionError> {
        let question = question.trim().to_string();

        let documents = {
            let mut state = self.state.lock();
            if state.phase == QaPhase::Pending {
                return Err(SessionError::AnswerInFlight);
            }
            if state.store.is_empty() {
                return Err(SessionError::EmptyCorpus);
            }
            state.phase = QaPhase::Pending;
            state.current = Some(Exchange {
                question: question.clone(),
                answer: None,
                asked_at: Utc::now(),
            });
            state.store.documents().to_vec()
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = answer(&question, &documents);

        let mut state = self.state.lock();
        match result {
            Ok(text) => {
                state.phase = QaPhase::Answered;
                if let Some(ref mut exchange) = state.current {
                    exchange.answer = Some(text.clone());
                }
                Ok(text)
            }
            Err(e) => {
                // Unreachable with a non-empty snapshot, but keep the
                // session usable if the heuristic ever grows new failures
                state.phase = QaPhase::Idle;
                state.current = None;
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content: &str) -> FileUpload {
        FileUpload::new(name, None, content.as_bytes().to_vec())
    }

    fn session() -> QaSession {
        QaSession::with_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_submit_empty_store() {
        let session = session();
        let result = session.submit("What is the capital of France?").await;
        assert_eq!(result, Err(SessionError::EmptyCorpus));
        // No transition, session stays interactive
        assert_eq!(session.phase(), QaPhase::Idle);
        assert!(session.current().is_none());
    }

    #[tokio::test]
    async fn test_submit_answers_and_records_exchange() {
        let session = session();
        session.upload(vec![upload(
            "geo.txt",
            "Paris is the capital of France. It has a population of millions.",
        )]);

        let answer = session
            .submit("  What is the capital of France?  ")
            .await
            .unwrap();
        assert!(answer.contains("• Paris is the capital of France"));

        assert_eq!(session.phase(), QaPhase::Answered);
        let exchange = session.current().unwrap();
        // Question is trimmed before processing
        assert_eq!(exchange.question, "What is the capital of France?");
        assert_eq!(exchange.answer.as_deref(), Some(answer.as_str()));
    }

    #[tokio::test]
    async fn test_new_submission_overwrites_exchange() {
        let session = session();
        session.upload(vec![upload("geo.txt", "Paris is the capital of France.")]);

        session.submit("What is the capital of France?").await.unwrap();
        session.submit("Tell me about Germany").await.unwrap();

        let exchange = session.current().unwrap();
        assert_eq!(exchange.question, "Tell me about Germany");
    }

    #[tokio::test]
    async fn test_submit_while_pending_rejected() {
        let session = QaSession::with_delay(Duration::from_millis(50));
        session.upload(vec![upload("geo.txt", "Paris is the capital of France.")]);

        let first = session.submit("What is the capital of France?");
        let second = async {
            // Let the first submission reach Pending before asking again
            tokio::time::sleep(Duration::from_millis(10)).await;
            session.submit("Tell me about Germany").await
        };

        let (first, second) = tokio::join!(first, second);
        assert!(first.is_ok());
        assert_eq!(second, Err(SessionError::AnswerInFlight));
    }

    #[tokio::test]
    async fn test_upload_and_remove_through_session() {
        let session = session();
        let docs = session.upload(vec![
            upload("a.txt", "first document content"),
            upload("slides.pdf", "rejected"),
            upload("b.md", "second document content"),
        ]);
        assert_eq!(docs.len(), 2);
        assert_eq!(session.document_count(), 2);

        assert!(session.remove(&docs[0].id));
        let remaining = session.documents();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "b.md");
    }

    #[tokio::test]
    async fn test_session_usable_after_empty_corpus_error() {
        let session = session();
        assert!(session.submit("anything at all").await.is_err());

        session.upload(vec![upload("geo.txt", "Paris is the capital of France.")]);
        let answer = session.submit("What is the capital of France?").await.unwrap();
        assert!(answer.contains("Paris"));
    }
}
