//! Service ports: traits + data contracts.

pub mod config;
pub mod documents;
pub mod editor;
pub mod notify;
pub mod runtime;
pub mod settings;

pub use config::{EditorOptions, LineHighlight, ScrollbarVisibility, WidgetConfig};
pub use documents::{DocumentTable, Result as StoreResult, StoreError};
pub use editor::{
    CommandBinding, CommandCallback, CommandRegistration, DocumentEditorHandle, EditorWidget,
    SaveError, WidgetCommand,
};
pub use notify::{Notification, NotificationLevel, Notifier};
pub use runtime::BoxFuture;
pub use settings::{
    EditorSettings, KeyValueBackend, PaletteMode, SettingKey, SettingValue, SettingsError,
    ThemeMode, AUTO_SAVE_DELAY_RANGE, FONT_SIZE_RANGE,
};
