//! Key-value persistence
//!
//! Both stores persist through a flat, string-keyed store of JSON values.
//! Reads never fail: a missing or undecodable value is simply absent, and the
//! caller substitutes its default.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::{KinsenasError, KinsenasResult};

use super::file_io::{read_json, remove_file_if_exists, write_json_atomic};

/// A process-wide store of JSON values keyed by string
pub trait KeyValueStore {
    /// Fetch the raw value for `key`, if one is stored and readable
    fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: Value) -> KinsenasResult<()>;

    /// Delete `key`; deleting an absent key is not an error
    fn remove(&mut self, key: &str) -> KinsenasResult<()>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Fetch and decode a value, treating any decode failure as absent
    fn get_decoded<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
        Self: Sized,
    {
        self.get(key)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// Encode and store a value
    fn set_encoded<T>(&mut self, key: &str, value: &T) -> KinsenasResult<()>
    where
        T: Serialize + ?Sized,
        Self: Sized,
    {
        let value = serde_json::to_value(value)?;
        self.set(key, value)
    }
}

/// In-memory store, for tests and for embedding without a filesystem
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
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
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> KinsenasResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> KinsenasResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed store with one JSON file per key
///
/// Every read goes to disk, so independent handles over the same directory
/// always observe each other's writes.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// File backing `key`
    pub fn key_path(&self, key: &str) -> KinsenasResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        let path = self.key_path(key).ok()?;
        read_json(path).ok().flatten()
    }

    fn set(&mut self, key: &str, value: Value) -> KinsenasResult<()> {
        let path = self.key_path(key)?;
        write_json_atomic(path, &value)
    }

    fn remove(&mut self, key: &str) -> KinsenasResult<()> {
        let path = self.key_path(key)?;
        remove_file_if_exists(path)
    }
}

fn validate_key(key: &str) -> KinsenasResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));

    if valid {
        Ok(())
    } else {
        Err(KinsenasError::Storage(format!("Invalid storage key '{}'", key)))
    }
}
