use std::collections::HashMap;

use rusqlite::Connection;

use crate::error::BoardError;

use super::kv_repo;

/// Persistent string key-value storage the board keeps its state in.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, BoardError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), BoardError>;
    fn remove(&mut self, key: &str) -> Result<(), BoardError>;
}

impl KeyValueStore for Connection {
    fn get(&self, key: &str) -> Result<Option<String>, BoardError> {
        kv_repo::get_value(self, key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BoardError> {
        kv_repo::set_value(self, key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), BoardError> {
        kv_repo::remove_value(self, key)
    }
}

#[derive(Debug, Default, Clone)]
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
    fn get(&self, key: &str) -> Result<Option<String>, BoardError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BoardError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), BoardError> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>, BoardError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BoardError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), BoardError> {
        (**self).remove(key)
    }
}
