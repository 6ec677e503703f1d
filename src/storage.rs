//! Client-side persistence slots

use std::collections::HashMap;
use std::sync::Mutex;

/// Key-value store backing the client-side slots that survive a page
/// navigation (the cached user profile and the deferred purchase request).
///
/// Access is synchronous: the client only touches the store between await
/// points, one operation at a time, so implementations need interior
/// mutability but no finer-grained coordination.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, overwriting any previous value
    fn set(&self, key: &str, value: &str);

    /// Remove the value under `key`, if any
    fn delete(&self, key: &str);
}

/// In-memory [`KeyValueStore`], the default backing store.
///
/// Tests substitute their own instance to observe slot contents directly.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap();
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
    }

    fn delete(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key);
    }
}
