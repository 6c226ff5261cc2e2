//! Headless document core (state/action/effect).

pub mod autosave;
pub mod document;
pub mod document_store;
pub mod editor_host;
pub mod effect;
pub mod services;
pub mod settings_store;
pub mod tabs;


pub use autosave::{AutosaveCoordinator, AutosavePolicy, SaveTrigger};
pub use document::{Document, DocumentId, DocumentPatch, LanguageMode};
pub use document_store::{DocumentStore, Subscription};
pub use editor_host::{EditorHost, HostContext};
pub use effect::{Effect, OrderWrite};
pub use settings_store::{SettingChange, SettingsStore};
pub use tabs::{TabAction, TabState};
