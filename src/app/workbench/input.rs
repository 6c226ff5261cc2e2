use super::{Workbench, WorkbenchError};
use crate::core::{Command, Key};
use crate::kernel::document::{DocumentId, LanguageMode};
use crate::kernel::services::adapters::KeybindingContext;
use crate::kernel::services::ports::DocumentEditorHandle;
use crate::kernel::SettingChange;

/// Dialogs and panels the shell should open in response to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiRequest {
    /// New-file dialog, pre-filled with the default language mode.
    NewFile { language_mode: LanguageMode },
    /// Edit-file dialog for the active document.
    EditFile {
        id: DocumentId,
        title: String,
        language_mode: LanguageMode,
    },
    OpenSettings,
    /// Ask before deleting the active document.
    ConfirmRemove { id: DocumentId, title: String },
}

impl Workbench {
    /// Global key handling; unbound keys fall through to the widget.
    pub async fn handle_key(&mut self, key: Key) -> Result<Option<UiRequest>, WorkbenchError> {
        let Some(command) = self
            .keybindings
            .resolve(KeybindingContext::Global, &key)
            .cloned()
        else {
            return Ok(None);
        };
        self.run_command(command).await
    }

    pub async fn run_command(
        &mut self,
        command: Command,
    ) -> Result<Option<UiRequest>, WorkbenchError> {
        tracing::debug!(command = command.name(), "run command");
        match command {
            Command::Save => {
                self.save_active().await?;
                Ok(None)
            }
            Command::NewFile => Ok(Some(UiRequest::NewFile {
                language_mode: self.editor_settings.language_mode,
            })),
            Command::EditFile => {
                let doc = self
                    .tabs
                    .active_document()
                    .ok_or(WorkbenchError::NoActiveDocument)?;
                Ok(Some(UiRequest::EditFile {
                    id: doc.id,
                    title: doc.title.clone(),
                    language_mode: doc.language_mode,
                }))
            }
            Command::RemoveFile => {
                let doc = self
                    .tabs
                    .active_document()
                    .ok_or(WorkbenchError::NoActiveDocument)?;
                Ok(Some(UiRequest::ConfirmRemove {
                    id: doc.id,
                    title: doc.title.clone(),
                }))
            }
            Command::OpenSettings => Ok(Some(UiRequest::OpenSettings)),
            Command::Undo => self.with_handle(|h| h.undo()),
            Command::Redo => self.with_handle(|h| h.redo()),
            Command::Find => self.with_handle(|h| h.find()),
            Command::Custom(name) => {
                tracing::debug!(%name, "unhandled custom command");
                Ok(None)
            }
        }
    }

    /// Explicit save of the active document. Works with auto-save disabled.
    pub async fn save_active(&self) -> Result<(), WorkbenchError> {
        let host = self.host.as_ref().ok_or(WorkbenchError::NoActiveDocument)?;
        host.save().await?;
        Ok(())
    }

    pub fn undo(&self) -> Result<(), WorkbenchError> {
        self.with_handle(|h| h.undo()).map(|_| ())
    }

    pub fn redo(&self) -> Result<(), WorkbenchError> {
        self.with_handle(|h| h.redo()).map(|_| ())
    }

    pub fn find(&self) -> Result<(), WorkbenchError> {
        self.with_handle(|h| h.find()).map(|_| ())
    }

    /// Validates, persists and applies one setting, then pushes the new
    /// options and auto-save policy to the mounted editor.
    pub fn apply_setting(&mut self, change: SettingChange) -> Result<(), WorkbenchError> {
        self.settings.apply(&mut self.editor_settings, change)?;
        self.reconfigure_editor();
        Ok(())
    }

    fn with_handle(
        &self,
        f: impl FnOnce(&dyn DocumentEditorHandle),
    ) -> Result<Option<UiRequest>, WorkbenchError> {
        let host = self.host.as_ref().ok_or(WorkbenchError::NoActiveDocument)?;
        f(host);
        Ok(None)
    }
}
