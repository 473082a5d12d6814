//! Cluster Configuration
//!
//! Shard topology is an explicit value threaded through the index builder and
//! the evaluator. Both sides derive partition-affinity tags from the same
//! `ClusterConfig`, so the partition count can never diverge between indexing
//! and querying.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The engine cannot place documents or compute a document universe
    /// without at least one shard.
    #[error("shard count must be at least 1")]
    ZeroShards,
}

/// Shard topology for one store cluster.
///
/// Every key belonging to shard `i` is prefixed with the shard's
/// partition-affinity tag (see [`crate::storage::protocol`]), so multi-key
/// set operations against a single shard stay colocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterConfig {
    shard_count: usize,
}

impl ClusterConfig {
    /// Fails fast on a zero shard count rather than mid-query.
    pub fn new(shard_count: usize) -> Result<Self, ConfigError> {
        if shard_count == 0 {
            return Err(ConfigError::ZeroShards);
        }
        Ok(Self { shard_count })
    }

    pub fn shard_count(&self) -> usize {
        self.shard_count
    }

    /// The partition-affinity tag for one shard.
    pub fn tag(&self, shard: usize) -> String {
        shard.to_string()
    }

    /// Tags for every shard, in shard order.
    pub fn tags(&self) -> Vec<String> {
        (0..self.shard_count).map(|i| self.tag(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_shards_rejected() {
        assert_eq!(ClusterConfig::new(0).unwrap_err(), ConfigError::ZeroShards);
    }

    #[test]
    fn test_tags_cover_every_shard() {
        let config = ClusterConfig::new(3).unwrap();
        assert_eq!(config.tags(), vec!["0", "1", "2"]);
        assert_eq!(config.shard_count(), 3);
    }
}
