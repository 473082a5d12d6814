//! Partition Assigner
//!
//! Documents are placed on shards round-robin over discovery order: the
//! document at discovery index `i` lands on shard `i % shard_count`. The
//! placement is static and order-dependent, not content-hashed; re-running
//! discovery in a different order changes placement, and re-indexing always
//! re-runs partitioning from scratch.

use crate::config::ClusterConfig;

#[derive(Debug, Clone)]
pub struct ShardAssigner {
    shard_count: usize,
}

impl ShardAssigner {
    pub fn new(config: &ClusterConfig) -> Self {
        Self {
            shard_count: config.shard_count(),
        }
    }

    /// Shard owning the document at the given discovery index.
    pub fn assign(&self, discovery_index: usize) -> usize {
        discovery_index % self.shard_count
    }

    pub fn shard_count(&self) -> usize {
        self.shard_count
    }
}
