use std::sync::Arc;
use thiserror::Error;

use crate::core::{Command, Key};
use crate::kernel::document::DocumentId;

use super::config::WidgetConfig;
use super::documents::StoreError;
use super::runtime::BoxFuture;

#[derive(Debug, Error)]
#[error("failed to save document {document}: {source}")]
pub struct SaveError {
    pub document: DocumentId,
    #[source]
    pub source: StoreError,
}

/// Named operations executed natively by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetCommand {
    Undo,
    Redo,
    Find,
}

pub type CommandCallback = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBinding {
    pub command: Command,
    pub keys: Vec<Key>,
}

/// Handle to a command registered on the widget. Disposing removes it.
pub trait CommandRegistration: Send + Sync {
    fn dispose(&mut self);
}

/// The embedded text-editing component.
pub trait EditorWidget: Send + Sync {
    fn set_value(&self, text: &str);

    fn value(&self) -> String;

    fn focus(&self);

    fn trigger(&self, command: WidgetCommand);

    fn add_command(
        &self,
        binding: CommandBinding,
        run: CommandCallback,
    ) -> Box<dyn CommandRegistration>;

    fn configure(&self, config: &WidgetConfig);
}

/// Capabilities a tab container may invoke on the editor of one document.
pub trait DocumentEditorHandle: Send + Sync {
    fn is_dirty(&self) -> bool;

    fn save(&self) -> BoxFuture<'_, Result<(), SaveError>>;

    fn undo(&self);

    fn redo(&self);

    fn find(&self);
}
