//! Distributed Boolean Retrieval Engine
//!
//! A mini query language compiled to an abstract syntax tree, evaluated
//! against an inverted index horizontally partitioned across storage shards.
//! The answer to a query is the set of matching document ids; there is no
//! relevance ranking.
//!
//! ## Architecture Modules
//! The engine is composed of five loosely coupled subsystems:
//!
//! - **`query`**: The boolean mini-language (AND/OR/NOT/grouping) and the
//!   parser that compiles it into a `QueryNode` tree.
//! - **`index`**: The indexing pipeline: line normalization, stemming,
//!   stopword filtering, round-robin shard assignment, and the local index
//!   builder producing per-shard postings.
//! - **`storage`**: The partitioned store: the `SetStore` protocol the
//!   engine is written against, the partition-affinity key scheme, and an
//!   in-process implementation.
//! - **`eval`**: The distributed evaluator: a depth-first AST walk issuing
//!   set operations per shard, managing ephemeral intermediate sets, and
//!   reconstructing the global result (NOT requires the union of every
//!   shard's document universe).
//! - **`server`**: A thin HTTP surface for querying and diagnostics.

pub mod config;
pub mod eval;
pub mod index;
pub mod query;
pub mod server;
pub mod storage;
