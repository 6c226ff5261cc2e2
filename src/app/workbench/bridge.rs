use tokio::task::JoinSet;

use super::{Workbench, WorkbenchError};
use crate::kernel::autosave::SaveTrigger;
use crate::kernel::document::{DocumentId, DocumentPatch};
use crate::kernel::editor_host::EditorHost;
use crate::kernel::effect::{Effect, OrderWrite};
use crate::kernel::services::ports::Notification;
use crate::kernel::TabAction;

impl Workbench {
    /// Reduces `action` and runs its effects in order. A refused forced save
    /// blocks the tab switch it guards; other effects still run.
    pub(super) async fn dispatch_tabs(&mut self, action: TabAction) -> Result<bool, WorkbenchError> {
        let previous = self.tabs.active();
        let (changed, effects) = self.tabs.dispatch_action(action);

        let mut first_error = None;
        let mut switch_blocked = false;
        for effect in effects {
            let result = match effect {
                Effect::SaveIfDirty(id) => {
                    let result = self.save_outgoing(id).await;
                    if result.is_err() {
                        switch_blocked = true;
                        if let Some(prev) = previous {
                            self.tabs.restore_active(prev);
                        }
                    }
                    result
                }
                Effect::MountEditor(_) if switch_blocked => {
                    tracing::warn!("tab switch cancelled, outgoing document could not be saved");
                    Ok(())
                }
                other => self.run_effect(other).await,
            };
            if let Err(e) = result {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(changed),
        }
    }

    async fn run_effect(&mut self, effect: Effect) -> Result<(), WorkbenchError> {
        match effect {
            Effect::SaveIfDirty(id) => self.save_outgoing(id).await,
            Effect::MountEditor(id) => self.mount(id).await,
            Effect::UnmountEditor => {
                self.host = None;
                Ok(())
            }
            Effect::ConfigureEditor => {
                self.reconfigure_editor();
                Ok(())
            }
            Effect::WriteOrders(writes) => self.write_orders(writes).await,
        }
    }

    async fn save_outgoing(&self, id: DocumentId) -> Result<(), WorkbenchError> {
        let Some(host) = self.host.as_ref().filter(|h| h.document() == id) else {
            return Ok(());
        };
        host.autosave()
            .save_if_dirty(SaveTrigger::Forced)
            .await
            .map(|_| ())
            .map_err(WorkbenchError::from)
    }

    async fn mount(&mut self, id: DocumentId) -> Result<(), WorkbenchError> {
        // tear down first so the old registrations and timer never see the new text
        self.host = None;

        // the tab copy may predate the latest save, read the record itself
        let doc = match self.store.get(id).await? {
            Some(doc) => doc,
            None => self
                .tabs
                .get(id)
                .cloned()
                .ok_or(WorkbenchError::UnknownDocument(id))?,
        };
        let host = EditorHost::mount(
            &self.ctx,
            &doc,
            &self.widget_config(),
            self.autosave_policy(),
            &self.keybindings,
        );
        self.host = Some(host);
        Ok(())
    }

    async fn write_orders(&self, writes: Vec<OrderWrite>) -> Result<(), WorkbenchError> {
        let total = writes.len();
        let mut set = JoinSet::new();
        for OrderWrite { id, order } in writes {
            let store = self.store.clone();
            set.spawn(async move { (id, store.update(id, DocumentPatch::order(order)).await) });
        }

        let mut failed = 0usize;
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((_, Ok(()))) => {}
                Ok((id, Err(e))) => {
                    failed += 1;
                    tracing::warn!(%id, error = %e, "tab order write failed");
                }
                Err(e) => {
                    failed += 1;
                    tracing::warn!(error = %e, "tab order write task failed");
                }
            }
        }

        if failed == 0 {
            tracing::debug!(total, "tab order persisted");
            return Ok(());
        }
        self.ctx.notifier.notify(Notification::warning(format!(
            "Tab order could not be fully saved ({failed} of {total} writes failed)"
        )));
        Err(WorkbenchError::ReorderPartial { failed, total })
    }
}
