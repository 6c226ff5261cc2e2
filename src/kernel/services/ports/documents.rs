use thiserror::Error;

use crate::kernel::document::{Document, DocumentId, DocumentPatch};

use super::runtime::BoxFuture;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(DocumentId),
    #[error("document already exists: {0}")]
    AlreadyExists(DocumentId),
    #[error("document storage unavailable: {0}")]
    Unavailable(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt document table: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Key-indexed record table holding every document.
///
/// Each call is independently failable. A single call is atomic: either the
/// whole record change applies or none of it does. Calls may interleave.
pub trait DocumentTable: Send + Sync {
    /// All records in insertion order.
    fn load_all(&self) -> BoxFuture<'_, Result<Vec<Document>>>;

    fn insert(&self, doc: Document) -> BoxFuture<'_, Result<()>>;

    /// Fails with [`StoreError::NotFound`] when `id` is absent.
    fn update(&self, id: DocumentId, patch: DocumentPatch) -> BoxFuture<'_, Result<()>>;

    /// Removing an absent record is not an error.
    fn delete(&self, id: DocumentId) -> BoxFuture<'_, Result<()>>;
}
