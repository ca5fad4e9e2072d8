//! In-memory storage for tests, the CLI and development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{ExtractionRecord, ExtractionStatus, StatusRecord};

use super::{DocumentSource, ExtractionStore, StoredDocument};

/// Documents, status rows and extraction records held in memory.
///
/// Status rows and records are appended, never replaced, so repeated runs for one document are
/// all visible.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, StoredDocument>>,
    statuses: RwLock<Vec<StatusRecord>>,
    results: RwLock<Vec<ExtractionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document.
    pub fn insert_document(&self, document: StoredDocument) -> Result<(), StorageError> {
        self.documents
            .write()
            .map_err(|_| StorageError::Poisoned)?
            .insert(document.id.clone(), document);
        Ok(())
    }

    pub fn with_document(self, document: StoredDocument) -> Result<Self, StorageError> {
        self.insert_document(document)?;
        Ok(self)
    }

    /// Status rows for `document_id`, oldest first.
    pub fn statuses_for(&self, document_id: &str) -> Result<Vec<StatusRecord>, StorageError> {
        Ok(self
            .statuses
            .read()
            .map_err(|_| StorageError::Poisoned)?
            .iter()
            .filter(|s| s.document_id == document_id)
            .cloned()
            .collect())
    }

    /// Status values for `document_id`, oldest first.
    pub fn status_history(&self, document_id: &str) -> Result<Vec<ExtractionStatus>, StorageError> {
        Ok(self
            .statuses_for(document_id)?
            .into_iter()
            .map(|s| s.status)
            .collect())
    }

    /// Extraction records for `document_id`, oldest first.
    pub fn results_for(&self, document_id: &str) -> Result<Vec<ExtractionRecord>, StorageError> {
        Ok(self
            .results
            .read()
            .map_err(|_| StorageError::Poisoned)?
            .iter()
            .filter(|r| r.document_id == document_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DocumentSource for MemoryStore {
    async fn fetch_document(&self, document_id: &str) -> Result<Option<StoredDocument>, StorageError> {
        Ok(self
            .documents
            .read()
            .map_err(|_| StorageError::Poisoned)?
            .get(document_id)
            .cloned())
    }
}

#[async_trait]
impl ExtractionStore for MemoryStore {
    async fn record_status(&self, status: &StatusRecord) -> Result<(), StorageError> {
        self.statuses
            .write()
            .map_err(|_| StorageError::Poisoned)?
            .push(status.clone());
        Ok(())
    }

    async fn save_result(&self, record: &ExtractionRecord) -> Result<(), StorageError> {
        self.results
            .write()
            .map_err(|_| StorageError::Poisoned)?
            .push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentType;

    #[tokio::test]
    async fn test_fetch_inserted_document() {
        let store = MemoryStore::new()
            .with_document(StoredDocument::new(
                "doc-1",
                "prop-1",
                "bill.pdf",
                DocumentType::Utility,
                b"%PDF-1.7".to_vec(),
            ))
            .unwrap();

        let document = store.fetch_document("doc-1").await.unwrap().unwrap();
        assert_eq!(document.file_name, "bill.pdf");
        assert!(store.fetch_document("doc-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_status_rows_are_appended() {
        let store = MemoryStore::new();
        store
            .record_status(&StatusRecord::new("doc-1", ExtractionStatus::Pending))
            .await
            .unwrap();
        store
            .record_status(&StatusRecord::new("doc-2", ExtractionStatus::Pending))
            .await
            .unwrap();
        store
            .record_status(&StatusRecord::new("doc-1", ExtractionStatus::Processing))
            .await
            .unwrap();

        assert_eq!(
            store.status_history("doc-1").unwrap(),
            vec![ExtractionStatus::Pending, ExtractionStatus::Processing]
        );
        assert!(store.results_for("doc-1").unwrap().is_empty());
    }
}
