use crate::kernel::document::{Document, DocumentId};

#[derive(Debug, Clone)]
pub enum TabAction {
    /// Fresh snapshot from the document store, in any order.
    DocumentsChanged(Vec<Document>),
    /// Drag gesture completed: move the tab at `from` to `to`.
    Reorder { from: usize, to: usize },
    Activate(DocumentId),
}
