//! Observable document collection.
//!
//! Every successful mutation is followed by a fresh full snapshot delivered to
//! every subscriber. Delivery is at-least-once per mutation; snapshots from
//! independent, interleaved mutations carry no ordering guarantee.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::kernel::document::{Document, DocumentId, DocumentPatch};
use crate::kernel::services::ports::{DocumentTable, StoreResult};

pub type Listener = Arc<dyn Fn(&[Document]) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

fn lock(listeners: &Mutex<Listeners>) -> MutexGuard<'_, Listeners> {
    listeners.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Clone)]
pub struct DocumentStore {
    table: Arc<dyn DocumentTable>,
    listeners: Arc<Mutex<Listeners>>,
}

/// Live registration returned by [`DocumentStore::subscribe`]; dropping it
/// unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            lock(&listeners).entries.retain(|(id, _)| *id != self.id);
        }
    }
}

impl DocumentStore {
    pub fn new(table: Arc<dyn DocumentTable>) -> Self {
        Self {
            table,
            listeners: Arc::new(Mutex::new(Listeners::default())),
        }
    }

    /// Current snapshot in insertion order.
    pub async fn list(&self) -> StoreResult<Vec<Document>> {
        self.table.load_all().await
    }

    pub async fn get(&self, id: DocumentId) -> StoreResult<Option<Document>> {
        Ok(self.list().await?.into_iter().find(|d| d.id == id))
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Document]) + Send + Sync + 'static,
    {
        let mut listeners = lock(&self.listeners);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.listeners).entries.len()
    }

    pub async fn create(&self, doc: Document) -> StoreResult<()> {
        let id = doc.id;
        self.table.insert(doc).await?;
        tracing::info!(%id, "document created");
        self.publish().await;
        Ok(())
    }

    pub async fn update(&self, id: DocumentId, patch: DocumentPatch) -> StoreResult<()> {
        self.table.update(id, patch).await?;
        tracing::debug!(%id, "document updated");
        self.publish().await;
        Ok(())
    }

    pub async fn delete(&self, id: DocumentId) -> StoreResult<()> {
        self.table.delete(id).await?;
        tracing::info!(%id, "document deleted");
        self.publish().await;
        Ok(())
    }

    async fn publish(&self) {
        let listeners: Vec<Listener> = lock(&self.listeners)
            .entries
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        if listeners.is_empty() {
            return;
        }

        match self.table.load_all().await {
            Ok(snapshot) => {
                for listener in listeners {
                    listener(&snapshot);
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to load snapshot for subscribers"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/document_store.rs"]
mod tests;
