use crate::kernel::document::{sort_by_order, Document, DocumentId};
use crate::kernel::effect::{Effect, OrderWrite};

use super::{TabAction, TabState};

impl TabState {
    pub fn dispatch_action(&mut self, action: TabAction) -> (bool, Vec<Effect>) {
        match action {
            TabAction::DocumentsChanged(docs) => self.documents_changed(docs),
            TabAction::Reorder { from, to } => self.reorder(from, to),
            TabAction::Activate(id) => self.activate(id),
        }
    }

    fn documents_changed(&mut self, mut docs: Vec<Document>) -> (bool, Vec<Effect>) {
        sort_by_order(&mut docs);
        let previous_mode = self.active_document().map(|d| d.language_mode);
        self.tabs = docs;

        let still_there = self
            .active
            .is_some_and(|id| self.tabs.iter().any(|d| d.id == id));
        if still_there {
            let mode_changed = self
                .active_document()
                .is_some_and(|d| Some(d.language_mode) != previous_mode);
            let effects = if mode_changed {
                vec![Effect::ConfigureEditor]
            } else {
                Vec::new()
            };
            return (true, effects);
        }

        // active document vanished (or none yet): lowest order wins
        match self.tabs.first().map(|d| d.id) {
            Some(id) => {
                self.active = Some(id);
                (true, vec![Effect::MountEditor(id)])
            }
            None => {
                let had_active = self.active.take().is_some();
                let effects = if had_active {
                    vec![Effect::UnmountEditor]
                } else {
                    Vec::new()
                };
                (true, effects)
            }
        }
    }

    fn activate(&mut self, id: DocumentId) -> (bool, Vec<Effect>) {
        if self.active == Some(id) || !self.tabs.iter().any(|d| d.id == id) {
            return (false, Vec::new());
        }
        let mut effects = Vec::with_capacity(2);
        if let Some(prev) = self.active {
            effects.push(Effect::SaveIfDirty(prev));
        }
        self.active = Some(id);
        effects.push(Effect::MountEditor(id));
        (true, effects)
    }

    fn reorder(&mut self, from: usize, to: usize) -> (bool, Vec<Effect>) {
        let len = self.tabs.len();
        if from >= len || to >= len {
            return (false, Vec::new());
        }

        let moved = self.tabs[from].id;
        let (mut changed, mut effects) = self.activate(moved);
        if from == to {
            return (changed, effects);
        }

        let doc = self.tabs.remove(from);
        self.tabs.insert(to, doc);
        changed = true;

        let (lo, hi) = (from.min(to), from.max(to));
        let span = if self.span_sorts_consistently(lo, hi) {
            lo..=hi
        } else {
            tracing::debug!(lo, hi, "sparse orders around reorder span, renumbering all tabs");
            0..=len - 1
        };

        let mut writes = Vec::with_capacity(span.end() - span.start() + 1);
        for index in span {
            let order = index as i64;
            let doc = &mut self.tabs[index];
            doc.order = order;
            writes.push(OrderWrite { id: doc.id, order });
        }
        effects.push(Effect::WriteOrders(writes));
        (changed, effects)
    }

    /// Whether rewriting `[lo, hi]` to their indices keeps the untouched
    /// tabs on either side sorted around them.
    fn span_sorts_consistently(&self, lo: usize, hi: usize) -> bool {
        let before_ok = lo == 0 || self.tabs[..lo].iter().all(|d| d.order < lo as i64);
        let after_ok = self.tabs[hi + 1..].iter().all(|d| d.order > hi as i64);
        before_ok && after_ok
    }
}
