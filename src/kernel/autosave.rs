//! Dirty tracking and debounced flush-to-store for one document.
//!
//! Clean -> Dirty on any content change. While auto-save is enabled every
//! change cancels the pending timer and arms a new one in a single step, so
//! at most one timer exists per coordinator. Dirty -> Clean only after the
//! store acknowledged the write of the buffer content; a failed save leaves
//! the document dirty and is reported through the notifier, never retried.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::kernel::document::{DocumentId, DocumentPatch};
use crate::kernel::document_store::DocumentStore;
use crate::kernel::services::ports::{
    EditorSettings, EditorWidget, Notification, Notifier, SaveError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTrigger {
    /// Debounce timer expired.
    Timer,
    /// Save command or menu action.
    Explicit,
    /// Switching away from a dirty document.
    Forced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosavePolicy {
    pub enabled: bool,
    pub delay: Duration,
}

impl AutosavePolicy {
    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self {
            enabled: settings.auto_save,
            delay: settings.auto_save_delay(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            delay: Duration::ZERO,
        }
    }
}

/// Armed debounce timer. Dropping it cancels the task.
struct ScheduledSave {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl ScheduledSave {
    /// Lets the task finish on its own; used by the task that is firing.
    fn detach(mut self) {
        self.handle.take();
    }
}

impl Drop for ScheduledSave {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

struct State {
    dirty: bool,
    revision: u64,
    policy: AutosavePolicy,
    timer: Option<ScheduledSave>,
    next_generation: u64,
    disposed: bool,
    saves: u64,
}

struct Inner {
    document: DocumentId,
    store: DocumentStore,
    widget: Arc<dyn EditorWidget>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<State>,
}

#[derive(Clone)]
pub struct AutosaveCoordinator {
    inner: Arc<Inner>,
}

impl AutosaveCoordinator {
    pub fn new(
        document: DocumentId,
        store: DocumentStore,
        widget: Arc<dyn EditorWidget>,
        notifier: Arc<dyn Notifier>,
        policy: AutosavePolicy,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                document,
                store,
                widget,
                notifier,
                state: Mutex::new(State {
                    dirty: false,
                    revision: 0,
                    policy,
                    timer: None,
                    next_generation: 0,
                    disposed: false,
                    saves: 0,
                }),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn document(&self) -> DocumentId {
        self.inner.document
    }

    pub fn is_dirty(&self) -> bool {
        self.state().dirty
    }

    pub fn has_pending_save(&self) -> bool {
        self.state().timer.is_some()
    }

    pub fn policy(&self) -> AutosavePolicy {
        self.state().policy
    }

    /// Number of successful saves, for diagnostics.
    pub fn save_count(&self) -> u64 {
        self.state().saves
    }

    /// Content-changed notification from the widget.
    pub fn on_change(&self) {
        let mut st = self.state();
        if st.disposed {
            return;
        }
        if !st.dirty {
            tracing::debug!(document = %self.inner.document, "clean -> dirty");
        }
        st.dirty = true;
        st.revision += 1;
        if st.policy.enabled {
            self.reschedule(&mut st);
        }
    }

    /// Changing the policy never touches the dirty flag. Disabling cancels
    /// the pending timer; enabling arms nothing until the next change.
    pub fn set_policy(&self, policy: AutosavePolicy) {
        let mut st = self.state();
        st.policy = policy;
        if !policy.enabled && st.timer.take().is_some() {
            tracing::debug!(document = %self.inner.document, "auto-save disabled, timer cancelled");
        }
    }

    /// Cancels the timer and stops accepting changes and saves. Called when
    /// the editor for this document is torn down.
    pub fn dispose(&self) {
        let mut st = self.state();
        st.disposed = true;
        st.timer = None;
    }

    fn reschedule(&self, st: &mut State) {
        // dropping the previous timer aborts it
        st.timer = None;

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(document = %self.inner.document, "no async runtime, auto-save timer not armed");
            return;
        };

        let generation = st.next_generation;
        st.next_generation += 1;
        let delay = st.policy.delay;
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);

        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let coordinator = AutosaveCoordinator { inner };
            if !coordinator.claim_timer(generation) {
                return;
            }
            // failures are already reported to the user by `save`
            let _ = coordinator.save(SaveTrigger::Timer).await;
        });

        st.timer = Some(ScheduledSave {
            generation,
            handle: Some(handle),
        });
    }

    /// Removes the firing timer from state without aborting it. Returns false
    /// when a newer timer replaced it in the meantime.
    fn claim_timer(&self, generation: u64) -> bool {
        let mut st = self.state();
        match st.timer.take() {
            Some(timer) if timer.generation == generation => {
                timer.detach();
                true
            }
            other => {
                st.timer = other;
                false
            }
        }
    }

    /// Writes the current widget buffer to the store.
    pub async fn save(&self, trigger: SaveTrigger) -> Result<(), SaveError> {
        let document = self.inner.document;
        let (text, revision) = {
            let st = self.state();
            if st.disposed {
                tracing::debug!(%document, ?trigger, "save skipped, editor disposed");
                return Ok(());
            }
            (self.inner.widget.value(), st.revision)
        };

        match self
            .inner
            .store
            .update(document, DocumentPatch::text(text))
            .await
        {
            Ok(()) => {
                {
                    let mut st = self.state();
                    st.saves += 1;
                    // edits that arrived while the write was in flight keep it dirty
                    if st.revision == revision && st.dirty {
                        st.dirty = false;
                        st.timer = None;
                        tracing::debug!(%document, "dirty -> clean");
                    }
                }
                tracing::info!(%document, ?trigger, "document saved");
                self.inner.notifier.notify(Notification::info("Saved"));
                Ok(())
            }
            Err(source) => {
                tracing::error!(%document, ?trigger, error = %source, "save failed");
                self.inner
                    .notifier
                    .notify(Notification::error(format!("Save failed: {}", source)));
                Err(SaveError { document, source })
            }
        }
    }

    /// Saves only when dirty. Returns whether a save happened.
    pub async fn save_if_dirty(&self, trigger: SaveTrigger) -> Result<bool, SaveError> {
        if !self.is_dirty() {
            return Ok(false);
        }
        self.save(trigger).await.map(|()| true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/autosave.rs"]
mod tests;
