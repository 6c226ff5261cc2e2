//! Binds the single editor widget to one document at a time.
//!
//! A host lives exactly as long as its document is the active tab. Mounting
//! loads the document text into the widget and registers the widget-scoped
//! commands; dropping the host disposes every registration and cancels the
//! pending auto-save, so nothing from one document can act on another.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::core::Command;
use crate::kernel::autosave::{AutosaveCoordinator, AutosavePolicy, SaveTrigger};
use crate::kernel::document::{Document, DocumentId};
use crate::kernel::document_store::DocumentStore;
use crate::kernel::services::adapters::{KeybindingContext, KeybindingService};
use crate::kernel::services::ports::{
    BoxFuture, CommandBinding, CommandCallback, CommandRegistration, DocumentEditorHandle,
    EditorWidget, Notifier, SaveError, WidgetCommand, WidgetConfig,
};
use crate::kernel::services::{KernelBusSender, KernelMessage};

/// Collaborators shared by every host the workbench mounts.
#[derive(Clone)]
pub struct HostContext {
    pub store: DocumentStore,
    pub widget: Arc<dyn EditorWidget>,
    pub notifier: Arc<dyn Notifier>,
    pub bus: KernelBusSender,
}

pub struct EditorHost {
    document: DocumentId,
    widget: Arc<dyn EditorWidget>,
    autosave: AutosaveCoordinator,
    bus: KernelBusSender,
    registrations: FxHashMap<Command, Box<dyn CommandRegistration>>,
}

const SCOPED_COMMANDS: [Command; 4] = [
    Command::Save,
    Command::NewFile,
    Command::EditFile,
    Command::OpenSettings,
];

impl EditorHost {
    pub fn mount(
        ctx: &HostContext,
        doc: &Document,
        config: &WidgetConfig,
        policy: AutosavePolicy,
        keybindings: &KeybindingService,
    ) -> Self {
        let widget = Arc::clone(&ctx.widget);
        widget.configure(config);
        widget.set_value(&doc.text);
        widget.focus();

        let autosave = AutosaveCoordinator::new(
            doc.id,
            ctx.store.clone(),
            Arc::clone(&widget),
            Arc::clone(&ctx.notifier),
            policy,
        );

        let mut host = Self {
            document: doc.id,
            widget,
            autosave,
            bus: ctx.bus.clone(),
            registrations: FxHashMap::default(),
        };
        host.bind_commands(keybindings);
        tracing::debug!(document = %doc.id, title = %doc.title, "editor mounted");
        host
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }

    pub fn autosave(&self) -> &AutosaveCoordinator {
        &self.autosave
    }

    /// Content-changed event from the widget.
    pub fn on_change(&self) {
        self.autosave.on_change();
    }

    pub fn reconfigure(&self, config: &WidgetConfig, policy: AutosavePolicy) {
        self.widget.configure(config);
        self.autosave.set_policy(policy);
    }

    /// Replaces all command registrations with the current key bindings.
    pub fn bind_commands(&mut self, keybindings: &KeybindingService) {
        self.dispose_commands();
        for command in SCOPED_COMMANDS {
            let keys = keybindings.keys_for(KeybindingContext::Editor, &command);
            if keys.is_empty() {
                continue;
            }
            let bus = self.bus.clone();
            let document = self.document;
            let fired = command.clone();
            let run: CommandCallback = Arc::new(move || {
                let msg = KernelMessage::EditorCommand {
                    document,
                    command: fired.clone(),
                };
                if bus.send(msg).is_err() {
                    tracing::warn!(%document, "editor command dropped, workbench gone");
                }
            });
            let registration = self.widget.add_command(
                CommandBinding {
                    command: command.clone(),
                    keys,
                },
                run,
            );
            self.registrations.insert(command, registration);
        }
    }

    pub fn registered_commands(&self) -> Vec<Command> {
        let mut commands: Vec<Command> = self.registrations.keys().cloned().collect();
        commands.sort_by(|a, b| a.name().cmp(b.name()));
        commands
    }

    fn dispose_commands(&mut self) {
        for (_, mut registration) in self.registrations.drain() {
            registration.dispose();
        }
    }
}

impl Drop for EditorHost {
    fn drop(&mut self) {
        self.dispose_commands();
        self.autosave.dispose();
        tracing::debug!(document = %self.document, "editor unmounted");
    }
}

impl DocumentEditorHandle for EditorHost {
    fn is_dirty(&self) -> bool {
        self.autosave.is_dirty()
    }

    fn save(&self) -> BoxFuture<'_, Result<(), SaveError>> {
        Box::pin(self.autosave.save(SaveTrigger::Explicit))
    }

    fn undo(&self) {
        self.widget.trigger(WidgetCommand::Undo);
    }

    fn redo(&self) {
        self.widget.trigger(WidgetCommand::Redo);
    }

    fn find(&self) {
        self.widget.trigger(WidgetCommand::Find);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/editor_host.rs"]
mod tests;
