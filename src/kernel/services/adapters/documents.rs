//! Document table adapters: in-memory and JSON file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::kernel::document::{Document, DocumentId, DocumentPatch};
use crate::kernel::services::ports::{BoxFuture, DocumentTable, StoreError, StoreResult};

#[derive(Default)]
pub struct MemoryDocumentTable {
    rows: Mutex<Vec<Document>>,
}

impl MemoryDocumentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(docs: Vec<Document>) -> Self {
        Self {
            rows: Mutex::new(docs),
        }
    }

    fn with_rows<T>(&self, f: impl FnOnce(&mut Vec<Document>) -> StoreResult<T>) -> StoreResult<T> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| StoreError::Unavailable("document table lock poisoned".to_string()))?;
        f(&mut rows)
    }
}

fn insert_row(rows: &mut Vec<Document>, doc: Document) -> StoreResult<()> {
    if rows.iter().any(|d| d.id == doc.id) {
        return Err(StoreError::AlreadyExists(doc.id));
    }
    rows.push(doc);
    Ok(())
}

fn update_row(rows: &mut [Document], id: DocumentId, patch: &DocumentPatch) -> StoreResult<()> {
    let row = rows
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or(StoreError::NotFound(id))?;
    patch.apply_to(row);
    Ok(())
}

fn delete_row(rows: &mut Vec<Document>, id: DocumentId) -> bool {
    let before = rows.len();
    rows.retain(|d| d.id != id);
    rows.len() != before
}

impl DocumentTable for MemoryDocumentTable {
    fn load_all(&self) -> BoxFuture<'_, StoreResult<Vec<Document>>> {
        let result = self.with_rows(|rows| Ok(rows.clone()));
        Box::pin(std::future::ready(result))
    }

    fn insert(&self, doc: Document) -> BoxFuture<'_, StoreResult<()>> {
        let result = self.with_rows(|rows| insert_row(rows, doc));
        Box::pin(std::future::ready(result))
    }

    fn update(&self, id: DocumentId, patch: DocumentPatch) -> BoxFuture<'_, StoreResult<()>> {
        let result = self.with_rows(|rows| update_row(rows, id, &patch));
        Box::pin(std::future::ready(result))
    }

    fn delete(&self, id: DocumentId) -> BoxFuture<'_, StoreResult<()>> {
        let result = self.with_rows(|rows| {
            delete_row(rows, id);
            Ok(())
        });
        Box::pin(std::future::ready(result))
    }
}

/// Whole table kept as one JSON array; every mutation rewrites the file via a
/// temp file + rename so a record change lands completely or not at all.
pub struct JsonDocumentTable {
    path: PathBuf,
    lock: tokio::sync::Mutex<()>,
}

impl JsonDocumentTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_rows(&self) -> StoreResult<Vec<Document>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_rows(&self, rows: &[Document]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(rows)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Vec<Document>) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let _guard = self.lock.lock().await;
        let mut rows = self.read_rows().await?;
        let out = f(&mut rows)?;
        self.write_rows(&rows).await?;
        Ok(out)
    }
}

impl DocumentTable for JsonDocumentTable {
    fn load_all(&self) -> BoxFuture<'_, StoreResult<Vec<Document>>> {
        Box::pin(async move {
            let _guard = self.lock.lock().await;
            self.read_rows().await
        })
    }

    fn insert(&self, doc: Document) -> BoxFuture<'_, StoreResult<()>> {
        Box::pin(self.mutate(move |rows| insert_row(rows, doc)))
    }

    fn update(&self, id: DocumentId, patch: DocumentPatch) -> BoxFuture<'_, StoreResult<()>> {
        Box::pin(self.mutate(move |rows| update_row(rows, id, &patch)))
    }

    fn delete(&self, id: DocumentId) -> BoxFuture<'_, StoreResult<()>> {
        Box::pin(async move {
            let _guard = self.lock.lock().await;
            let mut rows = self.read_rows().await?;
            if delete_row(&mut rows, id) {
                self.write_rows(&rows).await?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/documents.rs"]
mod tests;
