//! Thread-safe map keyed by identifier

use crate::model::Identifier;
use parking_lot::RwLock;
use std::collections::HashMap;

/// A map from identifiers to values guarded by a reader-writer lock
pub struct IdMap<V> {
    entries: RwLock<HashMap<Identifier, V>>,
}

impl<V> IdMap<V> {
    pub fn new() -> Self {
        IdMap {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a value, returning the one it replaced
    pub fn insert(&self, key: Identifier, value: V) -> Option<V> {
        self.entries.write().insert(key, value)
    }

    pub fn remove(&self, key: &Identifier) -> Option<V> {
        self.entries.write().remove(key)
    }

    pub fn contains_key(&self, key: &Identifier) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Snapshot of the keys, in no particular order
    pub fn keys(&self) -> Vec<Identifier> {
        self.entries.read().keys().cloned().collect()
    }
}

impl<V: Clone> IdMap<V> {
    /// A copy of the value stored under `key`
    pub fn get(&self, key: &Identifier) -> Option<V> {
        self.entries.read().get(key).cloned()
    }
}

impl<V> Default for IdMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_operations() {
        let map = IdMap::new();
        let key = Identifier::digest(b"key");
        let other = Identifier::digest(b"other");

        assert!(map.is_empty());
        assert_eq!(map.insert(key.clone(), 1u64), None);
        assert_eq!(map.insert(key.clone(), 2u64), Some(1));
        assert_eq!(map.get(&key), Some(2));
        assert_eq!(map.get(&other), None);
        assert!(map.contains_key(&key));
        assert_eq!(map.keys(), vec![key.clone()]);
        assert_eq!(map.len(), 1);

        assert_eq!(map.remove(&key), Some(2));
        assert!(!map.contains_key(&key));

        map.insert(other, 3);
        map.clear();
        assert!(map.is_empty());
    }

    #[test]
    fn test_keys_of_different_sizes_are_distinct() {
        let map = IdMap::new();
        let short = Identifier::new(vec![0xab; 16]).unwrap();
        let long = Identifier::new(vec![0xab; 20]).unwrap();
        assert_eq!(short.hash_code(), long.hash_code());

        map.insert(short.clone(), "md5");
        map.insert(long.clone(), "sha1");
        assert_eq!(map.get(&short), Some("md5"));
        assert_eq!(map.get(&long), Some("sha1"));
    }
}
