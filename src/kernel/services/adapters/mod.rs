//! Service adapters: storage backends, keybindings, data paths, headless widget.

pub mod documents;
pub mod keybinding;
pub mod notify;
pub mod paths;
pub mod settings;
pub mod widget;

pub use documents::{JsonDocumentTable, MemoryDocumentTable};
pub use keybinding::{parse_keybinding, KeybindingContext, KeybindingService};
pub use notify::LogNotifier;
pub use paths::{DataDir, DATA_DIR_VAR};
pub use settings::{JsonFileBackend, MemoryBackend};
pub use widget::HeadlessWidget;
