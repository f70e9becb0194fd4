//! Key-value persistence seam.
//!
//! The engine only ever needs `get` and `set` on string values. Hosts plug in
//! whatever backs that (a JSON file, browser storage, a database row).

use hashbrown::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored data is malformed: {0}")]
    Format(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Process-local store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut s = MemoryStore::new();
        assert!(s.is_empty());
        assert_eq!(s.get("k").unwrap(), None);
        s.set("k", "3").unwrap();
        s.set("k", "4").unwrap();
        assert_eq!(s.get("k").unwrap().as_deref(), Some("4"));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn works_through_mut_ref_and_box() {
        fn write_one<S: KeyValueStore>(mut store: S) {
            store.set("a", "1").unwrap();
        }

        let mut inner = MemoryStore::new();
        write_one(&mut inner);
        let mut boxed: Box<dyn KeyValueStore> = Box::new(inner);
        boxed.set("b", "2").unwrap();
        assert_eq!(boxed.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(boxed.get("b").unwrap().as_deref(), Some("2"));
    }
}
