//! Workbench: owns the tab state, the mounted editor and the settings, and
//! routes commands between them.
//!
//! The document store subscription is the only path back into tab state:
//! mutations push a snapshot onto the kernel bus and [`Workbench::pump`]
//! folds the latest one into [`TabState`].

use std::sync::Arc;

use thiserror::Error;

use crate::kernel::document::{Document, DocumentId, LanguageMode};
use crate::kernel::document_store::{DocumentStore, Subscription};
use crate::kernel::editor_host::{EditorHost, HostContext};
use crate::kernel::services::adapters::KeybindingService;
use crate::kernel::services::ports::{
    DocumentTable, EditorSettings, EditorWidget, KeyValueBackend, Notifier, SaveError,
    SettingsError, StoreError, WidgetConfig,
};
use crate::kernel::services::{kernel_bus, KernelBusReceiver, KernelMessage};
use crate::kernel::settings_store::SettingsStore;
use crate::kernel::{AutosavePolicy, TabAction, TabState};

mod bridge;
mod documents;
mod input;
mod tick;

pub use input::UiRequest;

const LEGACY_TITLE: &str = "untitled.txt";

#[derive(Debug, Error)]
pub enum WorkbenchError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("no active document")]
    NoActiveDocument,
    #[error("document {0} does not exist")]
    UnknownDocument(DocumentId),
    #[error("{failed} of {total} tab order writes failed")]
    ReorderPartial { failed: usize, total: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Storage backends and UI surfaces the workbench runs against.
pub struct WorkbenchDeps {
    pub settings: Arc<dyn KeyValueBackend>,
    pub documents: Arc<dyn DocumentTable>,
    pub widget: Arc<dyn EditorWidget>,
    pub notifier: Arc<dyn Notifier>,
}

pub struct Workbench {
    settings: SettingsStore,
    editor_settings: EditorSettings,
    system_dark: bool,
    store: DocumentStore,
    tabs: TabState,
    host: Option<EditorHost>,
    ctx: HostContext,
    bus_rx: KernelBusReceiver,
    keybindings: KeybindingService,
    _subscription: Subscription,
}

impl Workbench {
    /// Loads settings and documents, migrates a legacy single-document body
    /// when the table is empty, and mounts the lowest-order document.
    pub async fn open(deps: WorkbenchDeps, system_dark: bool) -> Result<Self, WorkbenchError> {
        let settings = SettingsStore::new(deps.settings);
        let editor_settings = settings.load();
        let store = DocumentStore::new(deps.documents);

        let (bus, bus_rx) = kernel_bus();
        let tx = bus.clone();
        let subscription = store.subscribe(move |docs| {
            let _ = tx.send(KernelMessage::DocumentsChanged(docs.to_vec()));
        });

        let mut docs = store.list().await?;
        if docs.is_empty() {
            if let Some(text) = settings.legacy_text() {
                let doc = Document::new(LEGACY_TITLE, editor_settings.language_mode, 0)
                    .with_text(text);
                tracing::info!(id = %doc.id, "migrating legacy single-document body");
                store.create(doc).await?;
                docs = store.list().await?;
            }
        }

        let ctx = HostContext {
            store: store.clone(),
            widget: deps.widget,
            notifier: deps.notifier,
            bus,
        };

        let mut workbench = Self {
            settings,
            editor_settings,
            system_dark,
            store,
            tabs: TabState::new(),
            host: None,
            ctx,
            bus_rx,
            keybindings: KeybindingService::with_defaults(),
            _subscription: subscription,
        };
        // the migration snapshot is already reflected in `docs`
        let _ = workbench.bus_rx.drain();
        workbench
            .dispatch_tabs(TabAction::DocumentsChanged(docs))
            .await?;
        tracing::info!(tabs = workbench.tabs.len(), "workbench opened");
        Ok(workbench)
    }

    pub fn tabs(&self) -> &[Document] {
        self.tabs.tabs()
    }

    pub fn tab_state(&self) -> &TabState {
        &self.tabs
    }

    pub fn active(&self) -> Option<DocumentId> {
        self.tabs.active()
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.tabs.active_document()
    }

    pub fn host(&self) -> Option<&EditorHost> {
        self.host.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.host
            .as_ref()
            .is_some_and(|h| h.autosave().is_dirty())
    }

    pub fn editor_settings(&self) -> &EditorSettings {
        &self.editor_settings
    }

    pub fn settings_store(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn keybindings(&self) -> &KeybindingService {
        &self.keybindings
    }

    /// Replaces the key bindings and re-registers the editor commands.
    pub fn set_keybindings(&mut self, keybindings: KeybindingService) {
        self.keybindings = keybindings;
        if let Some(host) = self.host.as_mut() {
            host.bind_commands(&self.keybindings);
        }
    }

    pub fn set_system_dark(&mut self, dark: bool) {
        if self.system_dark == dark {
            return;
        }
        self.system_dark = dark;
        self.reconfigure_editor();
    }

    pub fn widget_config(&self) -> WidgetConfig {
        let language = self
            .tabs
            .active_document()
            .map(|d| d.language_mode)
            .unwrap_or(LanguageMode::Plaintext);
        WidgetConfig::new(
            &self.editor_settings,
            self.editor_settings.theme.resolve(self.system_dark),
            language,
        )
    }

    fn autosave_policy(&self) -> AutosavePolicy {
        AutosavePolicy::from_settings(&self.editor_settings)
    }

    fn reconfigure_editor(&self) {
        if let Some(host) = self.host.as_ref() {
            host.reconfigure(&self.widget_config(), self.autosave_policy());
        }
    }
}
