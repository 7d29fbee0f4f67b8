//! Document Store
//!
//! Ordered in-memory collection of uploaded documents. Documents live only
//! for the duration of a session; there is no persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// An uploaded document held in memory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    /// Original file name, display only
    pub name: String,
    /// Full decoded text content, immutable after ingestion
    pub content: String,
    /// Byte length of the original file
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    /// Create a document with a fresh ULID id.
    pub fn new(name: impl Into<String>, content: impl Into<String>, size: u64) -> Self {
        Self {
            id: Ulid::new().to_string(),
            name: name.into(),
            content: content.into(),
            size,
            uploaded_at: Utc::now(),
        }
    }
}

/// Ordered document collection, append-on-upload, removable by id.
///
/// Invariant: no two documents share an id. An empty store is the valid
/// initial state.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append documents, preserving existing order with new ones at the end.
    /// A document whose id is already present is skipped.
    pub fn append(&mut self, documents: Vec<Document>) {
        for doc in documents {
            if self.documents.iter().any(|d| d.id == doc.id) {
                tracing::warn!(id = %doc.id, name = %doc.name, "Duplicate document id, skipping");
                continue;
            }
            self.documents.push(doc);
        }
    }

    /// Remove the document with the given id, preserving the relative order
    /// of the rest. Returns whether a document was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.documents.len();
        self.documents.retain(|d| d.id != id);
        self.documents.len() < before
    }

    /// Current documents in upload order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_doc(name: &str, content: &str) -> Document {
        Document::new(name, content, content.len() as u64)
    }

    #[test]
    fn test_empty_store_is_valid() {
        let store = DocumentStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.documents().is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = DocumentStore::new();
        store.append(vec![make_doc("a.txt", "first")]);
        store.append(vec![make_doc("b.txt", "second"), make_doc("c.md", "third")]);

        let names: Vec<&str> = store.documents().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["a.txt", "b.txt", "c.md"]);
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let mut store = DocumentStore::new();
        let d1 = make_doc("a.txt", "first");
        let d2 = make_doc("b.txt", "second");
        let id1 = d1.id.clone();
        store.append(vec![d1, d2]);

        assert!(store.remove(&id1));
        assert_eq!(store.len(), 1);
        assert_eq!(store.documents()[0].name, "b.txt");
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut store = DocumentStore::new();
        store.append(vec![make_doc("a.txt", "first")]);
        assert!(!store.remove("no-such-id"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_id_skipped() {
        let mut store = DocumentStore::new();
        let doc = make_doc("a.txt", "first");
        let dup = doc.clone();
        store.append(vec![doc]);
        store.append(vec![dup]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_by_id() {
        let mut store = DocumentStore::new();
        let doc = make_doc("a.txt", "first");
        let id = doc.id.clone();
        store.append(vec![doc]);

        assert_eq!(store.get(&id).map(|d| d.name.as_str()), Some("a.txt"));
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = make_doc("a.txt", "x");
        let b = make_doc("a.txt", "x");
        assert_ne!(a.id, b.id);
    }
}
