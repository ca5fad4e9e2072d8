//! Persistence collaborators: where document bytes come from and where results go.

mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::models::{DocumentType, ExtractionRecord, MimeType, StatusRecord};

pub use memory::MemoryStore;

/// A stored property document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub id: String,
    pub property_id: String,
    pub file_name: String,
    pub document_type: DocumentType,
    #[serde(skip)]
    pub content: Vec<u8>,
}

impl StoredDocument {
    pub fn new(
        id: impl Into<String>,
        property_id: impl Into<String>,
        file_name: impl Into<String>,
        document_type: DocumentType,
        content: Vec<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            property_id: property_id.into(),
            file_name: file_name.into(),
            document_type,
            content,
        }
    }

    /// MIME type selected by file extension.
    pub fn mime_type(&self) -> MimeType {
        MimeType::from_file_name(&self.file_name)
    }
}

/// Looks up documents and their bytes.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// `Ok(None)` when no document has this id.
    async fn fetch_document(&self, document_id: &str) -> Result<Option<StoredDocument>, StorageError>;
}

/// Append-only sink for status transitions and extraction records.
#[async_trait]
pub trait ExtractionStore: Send + Sync {
    async fn record_status(&self, status: &StatusRecord) -> Result<(), StorageError>;

    async fn save_result(&self, record: &ExtractionRecord) -> Result<(), StorageError>;
}
