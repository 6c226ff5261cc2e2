//! Semantic commands.
//!
//! A `Command` names an intent only; `KeybindingService` maps keys onto it.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    // ==================== documents ====================
    Save,
    NewFile,
    EditFile,
    RemoveFile,

    // ==================== editing ====================
    Undo,
    Redo,
    Find,

    // ==================== application ====================
    OpenSettings,

    // ==================== extension point ====================
    Custom(String),
}

impl Command {
    pub fn name(&self) -> &str {
        match self {
            Command::Save => "save",
            Command::NewFile => "newFile",
            Command::EditFile => "editFile",
            Command::RemoveFile => "removeFile",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::Find => "find",
            Command::OpenSettings => "openSettings",
            Command::Custom(name) => name,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "save" => Command::Save,
            "newFile" => Command::NewFile,
            "editFile" => Command::EditFile,
            "removeFile" => Command::RemoveFile,
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "find" => Command::Find,
            "openSettings" => Command::OpenSettings,
            _ => Command::Custom(name.to_string()),
        }
    }

    /// Commands an editor host registers on the widget so they fire while the
    /// widget owns keyboard focus.
    pub fn is_widget_scoped(&self) -> bool {
        matches!(
            self,
            Command::Save | Command::NewFile | Command::EditFile | Command::OpenSettings
        )
    }

    /// Commands executed natively by the editing widget.
    pub fn is_widget_native(&self) -> bool {
        matches!(self, Command::Undo | Command::Redo | Command::Find)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/command.rs"]
mod tests;
