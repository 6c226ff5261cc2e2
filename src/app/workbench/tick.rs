use super::{UiRequest, Workbench, WorkbenchError};
use crate::kernel::TabAction;

impl Workbench {
    /// Drains the kernel bus: applies the latest document snapshot, then
    /// runs editor commands posted by the mounted widget. Commands fired for
    /// a document that is no longer mounted are dropped.
    pub async fn pump(&mut self) -> Result<Vec<UiRequest>, WorkbenchError> {
        let drained = self.bus_rx.drain();
        if let Some(docs) = drained.documents {
            self.dispatch_tabs(TabAction::DocumentsChanged(docs)).await?;
        }

        let mut requests = Vec::new();
        for (document, command) in drained.commands {
            let mounted = self.host.as_ref().map(|h| h.document());
            if mounted != Some(document) {
                tracing::debug!(%document, command = command.name(), "stale editor command dropped");
                continue;
            }
            if let Some(request) = self.run_command(command).await? {
                requests.push(request);
            }
        }
        Ok(requests)
    }

    /// Content-changed event from the widget.
    pub fn on_editor_change(&self) {
        if let Some(host) = self.host.as_ref() {
            host.on_change();
        }
    }
}
