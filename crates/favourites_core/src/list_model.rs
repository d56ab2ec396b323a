use std::sync::Arc;

use crate::{Entry, EntryId};

/// The current entry collection.
///
/// Entries are never edited in place: every change swaps in a whole new
/// collection, so a snapshot handed out earlier keeps seeing the old list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListModel {
    entries: Arc<[Entry]>,
}

impl ListModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_entries(&mut self, entries: Vec<Entry>) {
        self.entries = entries.into();
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.get(id).is_some()
    }

    /// Replaces the collection with one lacking `id`. Returns the removed entry.
    pub fn remove(&mut self, id: EntryId) -> Option<Entry> {
        let removed = self.get(id).cloned()?;
        let remaining: Vec<Entry> = self
            .entries
            .iter()
            .filter(|entry| entry.id != id)
            .cloned()
            .collect();
        self.entries = remaining.into();
        Some(removed)
    }
}
