use crate::kernel::document::{Document, DocumentId};

#[derive(Debug, Clone, Default)]
pub struct TabState {
    /// Sorted ascending by `order`.
    pub(super) tabs: Vec<Document>,
    pub(super) active: Option<DocumentId>,
}

impl TabState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabs(&self) -> &[Document] {
        &self.tabs
    }

    pub fn active(&self) -> Option<DocumentId> {
        self.active
    }

    pub fn active_document(&self) -> Option<&Document> {
        let active = self.active?;
        self.tabs.iter().find(|d| d.id == active)
    }

    pub fn active_index(&self) -> Option<usize> {
        let active = self.active?;
        self.tabs.iter().position(|d| d.id == active)
    }

    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.tabs.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Puts back the previously active tab after a switch was refused.
    pub fn restore_active(&mut self, id: DocumentId) {
        if self.tabs.iter().any(|d| d.id == id) {
            self.active = Some(id);
        }
    }

    pub fn ids(&self) -> Vec<DocumentId> {
        self.tabs.iter().map(|d| d.id).collect()
    }
}
