use super::{Workbench, WorkbenchError};
use crate::kernel::document::{next_order, Document, DocumentId, DocumentPatch, LanguageMode};
use crate::kernel::TabAction;

impl Workbench {
    /// Switches to `id`, saving the outgoing document first if it is dirty.
    pub async fn select_tab(&mut self, id: DocumentId) -> Result<bool, WorkbenchError> {
        if self.tabs.get(id).is_none() {
            return Err(WorkbenchError::UnknownDocument(id));
        }
        self.dispatch_tabs(TabAction::Activate(id)).await
    }

    pub async fn select_index(&mut self, index: usize) -> Result<bool, WorkbenchError> {
        let Some(id) = self.tabs.tabs().get(index).map(|d| d.id) else {
            return Ok(false);
        };
        self.select_tab(id).await
    }

    /// Drag-and-drop completion. Resolves once every order write resolved;
    /// a partial failure leaves the in-memory order in place until the next
    /// snapshot.
    pub async fn reorder_tabs(&mut self, from: usize, to: usize) -> Result<bool, WorkbenchError> {
        let changed = self.dispatch_tabs(TabAction::Reorder { from, to }).await?;
        self.pump().await?;
        Ok(changed)
    }

    /// Appends a document after the last tab. The new tab is not activated.
    pub async fn new_file(
        &mut self,
        title: &str,
        language_mode: LanguageMode,
    ) -> Result<DocumentId, WorkbenchError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(WorkbenchError::EmptyTitle);
        }
        let existing = self.store.list().await?;
        let doc = Document::new(title, language_mode, next_order(&existing));
        let id = doc.id;
        self.store.create(doc).await?;
        self.pump().await?;
        Ok(id)
    }

    /// Renames and/or changes the language mode of a document.
    pub async fn edit_file(
        &mut self,
        id: DocumentId,
        title: &str,
        language_mode: LanguageMode,
    ) -> Result<(), WorkbenchError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(WorkbenchError::EmptyTitle);
        }
        self.store
            .update(id, DocumentPatch::properties(title, language_mode))
            .await?;
        self.pump().await?;
        Ok(())
    }

    pub async fn delete_document(&mut self, id: DocumentId) -> Result<(), WorkbenchError> {
        if self.host.as_ref().is_some_and(|h| h.document() == id) {
            // unsaved edits of a deleted document are dropped with it
            self.host = None;
        }
        self.store.delete(id).await?;
        self.pump().await?;
        Ok(())
    }

    pub async fn delete_active(&mut self) -> Result<(), WorkbenchError> {
        let id = self.tabs.active().ok_or(WorkbenchError::NoActiveDocument)?;
        self.delete_document(id).await
    }
}
