//! Distributed Evaluator Module
//!
//! Walks a query AST depth-first, issuing set operations against the
//! partitioned store and reconstructing the global answer. Intermediate
//! results live in uniquely named ephemeral sets that are deleted before the
//! evaluation returns; a time-to-live on every ephemeral key is the
//! crash-recovery backstop, never the primary cleanup mechanism.
//!
//! ## Submodules
//! - **`ephemeral`**: Unique ephemeral-key naming and the scratch registry
//!   that guarantees release on every exit path.
//! - **`evaluator`**: The recursive AST walk itself.

pub mod ephemeral;
pub mod evaluator;
