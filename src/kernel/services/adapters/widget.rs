//! Widget without a screen: keeps the buffer and the last configuration in
//! memory. Used by the command-line front end.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::kernel::services::ports::{
    CommandBinding, CommandCallback, CommandRegistration, EditorWidget, WidgetCommand,
    WidgetConfig,
};

#[derive(Default)]
struct Buffer {
    text: String,
    config: Option<WidgetConfig>,
    commands: usize,
}

#[derive(Default, Clone)]
pub struct HeadlessWidget {
    buffer: Arc<Mutex<Buffer>>,
}

fn lock(buffer: &Mutex<Buffer>) -> MutexGuard<'_, Buffer> {
    buffer.lock().unwrap_or_else(|e| e.into_inner())
}

impl HeadlessWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<WidgetConfig> {
        lock(&self.buffer).config.clone()
    }

    pub fn command_count(&self) -> usize {
        lock(&self.buffer).commands
    }
}

impl EditorWidget for HeadlessWidget {
    fn set_value(&self, text: &str) {
        lock(&self.buffer).text = text.to_string();
    }

    fn value(&self) -> String {
        lock(&self.buffer).text.clone()
    }

    fn focus(&self) {}

    fn trigger(&self, command: WidgetCommand) {
        tracing::debug!(?command, "headless widget ignores native command");
    }

    fn add_command(
        &self,
        binding: CommandBinding,
        _run: CommandCallback,
    ) -> Box<dyn CommandRegistration> {
        lock(&self.buffer).commands += 1;
        tracing::trace!(command = binding.command.name(), "command registered");
        Box::new(Registration {
            buffer: Some(Arc::clone(&self.buffer)),
        })
    }

    fn configure(&self, config: &WidgetConfig) {
        lock(&self.buffer).config = Some(config.clone());
    }
}

struct Registration {
    buffer: Option<Arc<Mutex<Buffer>>>,
}

impl CommandRegistration for Registration {
    fn dispose(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            let mut buffer = lock(&buffer);
            buffer.commands = buffer.commands.saturating_sub(1);
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/widget.rs"]
mod tests;
