//! Session-lifetime store of resolved entity records.

use dashmap::DashMap;
use std::sync::Arc;

use super::types::{EntityKey, EntityRecord};

/// Maps an id or a name to a resolved record.
///
/// Both keys may point at the same `Arc`. Entries are write-once: a second
/// `put` for an existing key keeps the first record and returns it. There is
/// no expiry and no eviction; the cache lives as long as its owning session.
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct EntityCache {
    entries: Arc<DashMap<EntityKey, Arc<EntityRecord>>>,
}

impl EntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &EntityKey) -> Option<Arc<EntityRecord>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Stores `record` under `key` unless the key is already present, and
    /// returns whichever record the key now resolves to.
    pub fn put(&self, key: EntityKey, record: Arc<EntityRecord>) -> Arc<EntityRecord> {
        Arc::clone(self.entries.entry(key).or_insert(record).value())
    }

    /// Stores `record` under its own id and name in addition to `key`.
    pub fn put_aliased(&self, key: EntityKey, record: Arc<EntityRecord>) -> Arc<EntityRecord> {
        let stored = self.put(key, record);
        self.put(EntityKey::Id(stored.id), Arc::clone(&stored));
        self.put(EntityKey::Name(stored.name.clone()), Arc::clone(&stored));
        stored
    }

    pub fn contains(&self, key: &EntityKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
