//! Indexing Pipeline Module
//!
//! Consumes corpus documents and produces the per-shard inverted index held
//! in the store: boolean posting sets, positional postings, each shard's
//! document universe, and document metadata records.
//!
//! ## Submodules
//! - **`tokenizer`**: Line normalizer (lowercasing, character filtering,
//!   double-hyphen handling).
//! - **`stemmer`**: Wrapper around the Snowball stemming collaborator.
//! - **`stopwords`**: Stopword list keyed by first letter.
//! - **`document`**: Corpus document model, metadata-header parsing and
//!   directory discovery.
//! - **`builder`**: Round-robin partition assignment and the local index
//!   builder that writes shard state into the store.

pub mod builder;
pub mod document;
pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;
