//! In-Process Store
//!
//! `MemoryStore` implements the full store protocol against process-local
//! state. Values live in a concurrent map keyed by the tagged key names;
//! TTLs are tracked in a side table and enforced lazily on access, so an
//! expired key reads as absent without a background sweeper.

use super::protocol::{SetStore, StoreError};
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone)]
enum Value {
    Set(HashSet<String>),
    Hash(HashMap<String, String>),
    List(Vec<u64>),
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: DashMap<String, Value>,
    /// Expiry deadlines in epoch milliseconds, one entry per armed TTL.
    deadlines: DashMap<String, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the key if its TTL has elapsed. Called before every access.
    fn evict_if_expired(&self, key: &str) {
        let expired = self
            .deadlines
            .get(key)
            .map(|deadline| now_ms() >= *deadline)
            .unwrap_or(false);
        if expired {
            self.data.remove(key);
            self.deadlines.remove(key);
        }
    }

    /// Snapshot of a set value; absent keys read as empty.
    fn read_set(&self, key: &str) -> Result<HashSet<String>, StoreError> {
        self.evict_if_expired(key);
        match self.data.get(key) {
            None => Ok(HashSet::new()),
            Some(entry) => match entry.value() {
                Value::Set(members) => Ok(members.clone()),
                _ => Err(StoreError::WrongType(key.to_string())),
            },
        }
    }

    /// Replace `dest` with the given members. A fresh result key carries no
    /// stale TTL until the caller arms one.
    fn write_set(&self, dest: &str, members: HashSet<String>) -> usize {
        let card = members.len();
        self.deadlines.remove(dest);
        self.data.insert(dest.to_string(), Value::Set(members));
        card
    }

    /// Contents of a position list. Diagnostics and tests only.
    pub fn list_get(&self, key: &str) -> Vec<u64> {
        self.evict_if_expired(key);
        match self.data.get(key) {
            Some(entry) => match entry.value() {
                Value::List(list) => list.clone(),
                _ => Vec::new(),
            },
            None => Vec::new(),
        }
    }

    /// Live keys starting with `prefix`. Diagnostics and tests only.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let candidates: Vec<String> = self
            .data
            .iter()
            .map(|entry| entry.key().clone())
            .filter(|key| key.starts_with(prefix))
            .collect();
        candidates
            .into_iter()
            .filter(|key| {
                self.evict_if_expired(key);
                self.data.contains_key(key)
            })
            .collect()
    }

    /// Total number of live keys. Diagnostics only.
    pub fn key_count(&self) -> usize {
        self.keys_with_prefix("").len()
    }
}

impl SetStore for MemoryStore {
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.evict_if_expired(key);
        Ok(self.data.contains_key(key))
    }

    fn set_add(&self, key: &str, members: &[String]) -> Result<(), StoreError> {
        self.evict_if_expired(key);
        let mut entry = self
            .data
            .entry(key.to_string())
            .or_insert_with(|| Value::Set(HashSet::new()));
        match entry.value_mut() {
            Value::Set(set) => {
                set.extend(members.iter().cloned());
                Ok(())
            }
            _ => Err(StoreError::WrongType(key.to_string())),
        }
    }

    fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.read_set(key)?.into_iter().collect())
    }

    fn set_card(&self, key: &str) -> Result<usize, StoreError> {
        Ok(self.read_set(key)?.len())
    }

    fn union_into(&self, dest: &str, sources: &[String]) -> Result<usize, StoreError> {
        let mut acc = HashSet::new();
        for source in sources {
            acc.extend(self.read_set(source)?);
        }
        Ok(self.write_set(dest, acc))
    }

    fn intersect_into(&self, dest: &str, sources: &[String]) -> Result<usize, StoreError> {
        let mut acc = match sources.first() {
            Some(first) => self.read_set(first)?,
            None => HashSet::new(),
        };
        for source in &sources[1.min(sources.len())..] {
            let other = self.read_set(source)?;
            acc.retain(|member| other.contains(member));
        }
        Ok(self.write_set(dest, acc))
    }

    fn diff_into(&self, dest: &str, sources: &[String]) -> Result<usize, StoreError> {
        let mut acc = match sources.first() {
            Some(first) => self.read_set(first)?,
            None => HashSet::new(),
        };
        for source in &sources[1.min(sources.len())..] {
            let other = self.read_set(source)?;
            acc.retain(|member| !other.contains(member));
        }
        Ok(self.write_set(dest, acc))
    }

    fn list_append(&self, key: &str, positions: &[u64]) -> Result<(), StoreError> {
        self.evict_if_expired(key);
        let mut entry = self
            .data
            .entry(key.to_string())
            .or_insert_with(|| Value::List(Vec::new()));
        match entry.value_mut() {
            Value::List(list) => {
                list.extend_from_slice(positions);
                Ok(())
            }
            _ => Err(StoreError::WrongType(key.to_string())),
        }
    }

    fn list_len(&self, key: &str) -> Result<usize, StoreError> {
        self.evict_if_expired(key);
        match self.data.get(key) {
            None => Ok(0),
            Some(entry) => match entry.value() {
                Value::List(list) => Ok(list.len()),
                _ => Err(StoreError::WrongType(key.to_string())),
            },
        }
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.data.remove(key);
        self.deadlines.remove(key);
        Ok(())
    }

    fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        self.evict_if_expired(key);
        if self.data.contains_key(key) {
            self.deadlines
                .insert(key.to_string(), now_ms() + ttl.as_millis() as u64);
        }
        Ok(())
    }

    fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
        self.evict_if_expired(key);
        let mut entry = self
            .data
            .entry(key.to_string())
            .or_insert_with(|| Value::Hash(HashMap::new()));
        match entry.value_mut() {
            Value::Hash(hash) => {
                hash.insert(field.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(StoreError::WrongType(key.to_string())),
        }
    }

    fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        self.evict_if_expired(key);
        match self.data.get(key) {
            None => Ok(None),
            Some(entry) => match entry.value() {
                Value::Hash(hash) => Ok(hash.get(field).cloned()),
                _ => Err(StoreError::WrongType(key.to_string())),
            },
        }
    }

    fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        self.evict_if_expired(key);
        match self.data.get(key) {
            None => Ok(HashMap::new()),
            Some(entry) => match entry.value() {
                Value::Hash(hash) => Ok(hash.clone()),
                _ => Err(StoreError::WrongType(key.to_string())),
            },
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
