//! Answer Heuristic
//!
//! Keyword-overlap answer generation over the uploaded documents. This is the
//! demo stand-in for a real retrieval model: it splits the combined document
//! text into sentence-like segments and surfaces the first few that contain a
//! question word as a substring.
//!
//! The thresholds and message strings are kept exactly as the demo shipped
//! them; callers depend on the output format.

use thiserror::Error;

use crate::documents::Document;

/// Maximum number of relevant segments quoted in an answer
const MAX_ANSWER_SEGMENTS: usize = 3;

/// Segments whose trimmed length is this or fewer characters are discarded
const MIN_SEGMENT_CHARS: usize = 10;

/// Question tokens of this length or shorter are discarded (stopword heuristic)
const MIN_TOKEN_CHARS: usize = 3;

const ANSWER_PREAMBLE: &str = "Based on the provided documents, here's what I found:";

const INSUFFICIENT_INFORMATION: &str = "The provided documents do not contain sufficient \
     information to answer this question. Please try rephrasing your question or upload \
     additional relevant documents.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnswerError {
    #[error("no documents to answer from")]
    EmptyCorpus,
}

/// Answer a question from the stored documents.
///
/// Fails with [`AnswerError::EmptyCorpus`] when `documents` is empty.
/// Otherwise always returns an answer string: either a preamble plus up to
/// three relevant segments in corpus order, or the fixed
/// insufficient-information message. Deterministic for identical inputs.
pub fn answer(question: &str, documents: &[Document]) -> Result<String, AnswerError> {
    if documents.is_empty() {
        return Err(AnswerError::EmptyCorpus);
    }

    let corpus = combine_documents(documents);
    let tokens = question_tokens(question);

    let relevant: Vec<&str> = segments(&corpus)
        .filter(|segment| {
            let lower = segment.to_lowercase();
            tokens.iter().any(|token| lower.contains(token.as_str()))
        })
        .take(MAX_ANSWER_SEGMENTS)
        .collect();

    if relevant.is_empty() {
        return Ok(INSUFFICIENT_INFORMATION.to_string());
    }

    let bullets: Vec<String> = relevant
        .iter()
        .map(|segment| format!("• {}", display_text(segment)))
        .collect();

    Ok(format!("{}\n\n{}", ANSWER_PREAMBLE, bullets.join("\n\n")))
}

/// Trimmed segment text for quoting. Segments that begin at a document
/// boundary carry the `--- name ---` frame line; matching sees it, but the
/// quoted bullet starts at the document content.
fn display_text(segment: &str) -> &str {
    let mut rest = segment.trim();
    while let Some(newline) = rest.find('\n') {
        let line = &rest[..newline];
        if line.starts_with("--- ") && line.trim_end().ends_with("---") {
            rest = rest[newline + 1..].trim_start();
        } else {
            break;
        }
    }
    rest
}

/// Combine all documents into one corpus, each prefixed with a separator line
/// carrying its name, joined by blank lines, in store order.
fn combine_documents(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| format!("--- {} ---\n{}", doc.name, doc.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Sentence-like segments: split on terminator punctuation, keep segments
/// longer than the minimum trimmed length.
fn segments(corpus: &str) -> impl Iterator<Item = &str> {
    corpus
        .split(['.', '!', '?'])
        .filter(|s| s.trim().chars().count() > MIN_SEGMENT_CHARS)
}

/// Lowercased whitespace-separated question words above the stopword length.
fn question_tokens(question: &str) -> Vec<String> {
    question
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() > MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}
