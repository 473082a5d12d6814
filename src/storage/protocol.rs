//! Store Protocol
//!
//! The operations the index builder and evaluator require from the
//! partitioned store, plus the key-naming scheme that pins every key to its
//! shard.
//!
//! ## Partition affinity
//! A key like `{2}term:whale` carries the affinity tag `2` in braces; all
//! keys sharing a tag colocate on one shard. Multi-key set operations are
//! only valid when every key involved shares one tag, with one exception:
//! the evaluator's cross-shard unions (per-term posting unions and the NOT
//! universe), which are computed *before* any single-shard operation is
//! applied. That ordering is why per-term unions always happen first.

use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Transient connectivity failure. Not retried inside the evaluator;
    /// the caller's session layer reconnects, and ephemeral-key TTLs keep
    /// the store consistent across the retry.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The key exists but holds a different value kind.
    #[error("key {0} holds a different value kind")]
    WrongType(String),
}

// --- Key naming ---

/// Boolean posting set for one term on one shard.
pub fn term_key(tag: &str, term: &str) -> String {
    format!("{{{tag}}}term:{term}")
}

/// The shard's document-id universe set.
pub fn docset_key(tag: &str) -> String {
    format!("{{{tag}}}docset")
}

/// Metadata hash for one document on its shard.
pub fn doc_key(tag: &str, doc_id: &str) -> String {
    format!("{{{tag}}}doc:{doc_id}")
}

/// Position list for one (term, document) pair.
pub fn pos_key(tag: &str, term: &str, doc_id: &str) -> String {
    format!("{{{tag}}}pos:{term}-{doc_id}")
}

// --- Store operations ---

/// The store surface the engine is written against.
///
/// Evaluation is synchronous by design: the evaluator issues one logical
/// store operation at a time and blocks for its result.
pub trait SetStore: Send + Sync {
    /// Whether a key exists (expired keys count as absent).
    fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Add members to a set, creating it if needed.
    fn set_add(&self, key: &str, members: &[String]) -> Result<(), StoreError>;

    /// All members of a set; an absent key reads as the empty set.
    fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError>;

    /// Cardinality of a set; an absent key reads as zero.
    fn set_card(&self, key: &str) -> Result<usize, StoreError>;

    /// Store the union of `sources` into `dest`, replacing it.
    /// Returns the resulting cardinality.
    fn union_into(&self, dest: &str, sources: &[String]) -> Result<usize, StoreError>;

    /// Store the intersection of `sources` into `dest`, replacing it.
    fn intersect_into(&self, dest: &str, sources: &[String]) -> Result<usize, StoreError>;

    /// Store the first source minus every following source into `dest`.
    /// Source order is significant.
    fn diff_into(&self, dest: &str, sources: &[String]) -> Result<usize, StoreError>;

    /// Append token positions to a position list.
    fn list_append(&self, key: &str, positions: &[u64]) -> Result<(), StoreError>;

    /// Length of a position list; an absent key reads as zero.
    fn list_len(&self, key: &str) -> Result<usize, StoreError>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Arm a time-to-live on an existing key. The key reads as absent once
    /// the TTL elapses.
    fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError>;

    /// Set one field of a record hash, creating the hash if needed.
    fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError>;

    /// Read one field of a record hash.
    fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError>;

    /// Read a whole record hash; an absent key reads as an empty record.
    fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError>;
}
