//! Storage Module
//!
//! The partitioned key-value collaborator behind the engine. Every key
//! carries a partition-affinity tag (`{tag}` prefix) so all keys of one
//! shard colocate, which is what makes multi-key server-side set operations
//! possible.
//!
//! ## Submodules
//! - **`protocol`**: The `SetStore` trait (the store operations the index
//!   builder and evaluator require) and the shard key-naming scheme.
//! - **`partitioner`**: Round-robin assignment of documents to shards.
//! - **`memory`**: In-process store implementation with TTL bookkeeping.

pub mod memory;
pub mod partitioner;
pub mod protocol;

#[cfg(test)]
mod tests;
