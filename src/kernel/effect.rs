use crate::kernel::document::DocumentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderWrite {
    pub id: DocumentId,
    pub order: i64,
}

/// Side effects requested by the tab reducer. Executed in sequence by the
/// workbench; each is awaited before the next one starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Persist the outgoing document if it has unsaved edits.
    SaveIfDirty(DocumentId),
    /// Tear down the current editor and mount one for this document.
    MountEditor(DocumentId),
    /// No document is active any more.
    UnmountEditor,
    /// Active document's language changed; reapply widget options.
    ConfigureEditor,
    /// Order rewrites issued concurrently; complete once all resolve.
    WriteOrders(Vec<OrderWrite>),
}
