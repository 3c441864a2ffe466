use std::collections::HashMap;

use parking_lot::RwLock;

use lookout_core::ids::NoteId;
use lookout_core::models::{ContentItem, FilterCriteria};

use crate::filter;

#[derive(Default)]
struct Inner {
    items: Vec<ContentItem>,
    index: HashMap<NoteId, usize>,
}

/// Insertion-ordered content store; the client's single source of truth for
/// the list and detail views.
///
/// Every operation takes the lock once, so readers observe a record either
/// entirely old or entirely new, never half-written.
#[derive(Default)]
pub struct ContentCatalog {
    inner: RwLock<Inner>,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole catalog, keeping the given order. If an id repeats
    /// the first occurrence wins. Returns the resulting size.
    pub fn replace_all(&self, items: Vec<ContentItem>) -> usize {
        let mut inner = self.inner.write();
        inner.items.clear();
        inner.index.clear();
        for item in items {
            if inner.index.contains_key(&item.note_id) {
                continue;
            }
            let pos = inner.items.len();
            inner.index.insert(item.note_id.clone(), pos);
            inner.items.push(item);
        }
        inner.items.len()
    }

    /// Insert or replace by `note_id`. A replacement keeps the item's list
    /// position; an insert appends. Returns true when the item was new.
    pub fn upsert(&self, item: ContentItem) -> bool {
        let mut inner = self.inner.write();
        match inner.index.get(&item.note_id).copied() {
            Some(pos) => {
                inner.items[pos] = item;
                false
            }
            None => {
                let pos = inner.items.len();
                inner.index.insert(item.note_id.clone(), pos);
                inner.items.push(item);
                true
            }
        }
    }

    pub fn get(&self, note_id: &NoteId) -> Option<ContentItem> {
        let inner = self.inner.read();
        inner.index.get(note_id).map(|&pos| inner.items[pos].clone())
    }

    /// Full copy in insertion order.
    pub fn snapshot(&self) -> Vec<ContentItem> {
        self.inner.read().items.clone()
    }

    /// The visible subset for `criteria`, in insertion order.
    pub fn filtered(&self, criteria: &FilterCriteria) -> Vec<ContentItem> {
        filter::apply(&self.inner.read().items, criteria)
    }

    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().items.is_empty()
    }
}
