//! Thread-safe identifier set

use crate::filter::Filter;
use crate::model::Identifier;
use crate::Result;
use parking_lot::RwLock;
use std::collections::HashSet;

/// A set of identifiers guarded by a reader-writer lock
#[derive(Default)]
pub struct IdSet {
    ids: RwLock<HashSet<Identifier>>,
}

impl IdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identifier, returning `true` if it was not present
    pub fn insert(&self, id: Identifier) -> bool {
        self.ids.write().insert(id)
    }

    /// Remove an identifier, returning `true` if it was present
    pub fn remove(&self, id: &Identifier) -> bool {
        self.ids.write().remove(id)
    }

    /// Atomically swap `old` for `new`; with `None` this only removes `old`
    pub fn replace(&self, old: &Identifier, new: Option<Identifier>) {
        let mut ids = self.ids.write();
        ids.remove(old);
        if let Some(new) = new {
            ids.insert(new);
        }
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.ids.read().contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.read().is_empty()
    }

    pub fn clear(&self) {
        self.ids.write().clear();
    }

    /// Snapshot of the members, in no particular order
    pub fn to_vec(&self) -> Vec<Identifier> {
        self.ids.read().iter().cloned().collect()
    }

    /// Build a filter over the current members
    pub fn to_filter(&self, capacity: Option<usize>) -> Result<Filter> {
        let ids = self.ids.read();
        Filter::from_elements(ids.iter(), capacity)
    }
}

impl FromIterator<Identifier> for IdSet {
    fn from_iter<T: IntoIterator<Item = Identifier>>(iter: T) -> Self {
        IdSet {
            ids: RwLock::new(iter.into_iter().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn ids(n: u8) -> Vec<Identifier> {
        (0..n).map(|i| Identifier::new(vec![i; 16]).unwrap()).collect()
    }

    #[test]
    fn test_insert_remove_contains() {
        let set = IdSet::new();
        let all = ids(2);
        let (a, b) = (&all[0], &all[1]);

        assert!(set.insert(a.clone()));
        assert!(!set.insert(a.clone()));
        assert!(set.contains(a));
        assert!(!set.contains(b));
        assert_eq!(set.len(), 1);

        assert!(set.remove(a));
        assert!(!set.remove(a));
        assert!(set.is_empty());
    }

    #[test]
    fn test_replace() {
        let all = ids(3);
        let set: IdSet = all[..2].iter().cloned().collect();

        set.replace(&all[0], Some(all[2].clone()));
        assert!(!set.contains(&all[0]));
        assert!(set.contains(&all[2]));

        set.replace(&all[1], None);
        assert_eq!(set.to_vec(), vec![all[2].clone()]);
    }

    #[test]
    fn test_to_filter_has_no_false_negatives() {
        let all = ids(20);
        let set: IdSet = all.iter().cloned().collect();
        let filter = set.to_filter(None).unwrap();

        assert_eq!(filter.bytesize(), 20);
        assert!(all.iter().all(|id| filter.contains(id)));
    }

    #[test]
    fn test_concurrent_inserts() {
        let set = Arc::new(IdSet::new());
        let handles: Vec<_> = (0..4u8)
            .map(|t| {
                let set = Arc::clone(&set);
                thread::spawn(move || {
                    for i in 0..50u8 {
                        set.insert(Identifier::new(vec![t, i, 0, 0]).unwrap());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(set.len(), 200);

        set.clear();
        assert!(set.is_empty());
    }
}
