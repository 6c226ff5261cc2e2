use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::core::Command;
use crate::kernel::document::{Document, DocumentId};

#[derive(Debug)]
pub enum KernelMessage {
    /// Full snapshot published by the document store after a mutation.
    DocumentsChanged(Vec<Document>),
    /// Command bound on the editor widget fired while `document` was mounted.
    EditorCommand {
        document: DocumentId,
        command: Command,
    },
}

#[derive(Clone)]
pub struct KernelBusSender {
    tx: Sender<KernelMessage>,
}

pub struct KernelBusReceiver {
    rx: Receiver<KernelMessage>,
}

#[derive(Debug, Default)]
pub struct Drained {
    pub documents: Option<Vec<Document>>,
    pub commands: Vec<(DocumentId, Command)>,
}

pub fn kernel_bus() -> (KernelBusSender, KernelBusReceiver) {
    let (tx, rx) = mpsc::channel();
    (KernelBusSender { tx }, KernelBusReceiver { rx })
}

impl KernelBusSender {
    pub fn send(&self, msg: KernelMessage) -> Result<(), mpsc::SendError<KernelMessage>> {
        self.tx.send(msg)
    }
}

impl KernelBusReceiver {
    pub fn try_recv(&mut self) -> Result<KernelMessage, TryRecvError> {
        self.rx.try_recv()
    }

    /// Drains pending messages. Snapshots collapse to the latest one;
    /// editor commands are kept in arrival order.
    pub fn drain(&mut self) -> Drained {
        let mut drained = Drained::default();
        while let Ok(msg) = self.try_recv() {
            match msg {
                KernelMessage::DocumentsChanged(docs) => drained.documents = Some(docs),
                KernelMessage::EditorCommand { document, command } => {
                    drained.commands.push((document, command))
                }
            }
        }
        drained
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/services/bus.rs"]
mod tests;
