//! Local Index Builder
//!
//! Assigns documents to shards round-robin and builds each shard's local
//! state: boolean posting sets, positional postings, the shard's document
//! universe, and per-document metadata records. All of a shard's keys carry
//! its partition-affinity tag, so later multi-key set operations stay on one
//! shard.
//!
//! Indexing writes are assumed to happen in a bulk, exclusive maintenance
//! window; querying during a rebuild is not guaranteed consistent.

use super::document::Document;
use super::stemmer::Stemmer;
use super::stopwords::is_stopword;
use super::tokenizer::normalize;
use crate::config::ClusterConfig;
use crate::storage::partitioner::ShardAssigner;
use crate::storage::protocol::{doc_key, docset_key, pos_key, term_key, SetStore, StoreError};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Summary of one indexing run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct IndexStats {
    pub documents: usize,
    /// Distinct stemmed terms across all shards.
    pub terms: usize,
    pub shards: usize,
}

/// Per-shard accumulation before anything is written to the store.
#[derive(Default)]
struct LocalIndex {
    /// term -> document ids containing it (boolean posting).
    postings: BTreeMap<String, BTreeSet<String>>,
    /// (term, doc) -> ordered token positions (positional posting).
    positions: BTreeMap<(String, String), Vec<u64>>,
    /// The shard's document-id universe.
    docset: BTreeSet<String>,
}

pub struct IndexBuilder<S> {
    store: Arc<S>,
    config: ClusterConfig,
    assigner: ShardAssigner,
    stemmer: Stemmer,
}

impl<S: SetStore> IndexBuilder<S> {
    pub fn new(store: Arc<S>, config: ClusterConfig) -> Self {
        let assigner = ShardAssigner::new(&config);
        Self {
            store,
            config,
            assigner,
            stemmer: Stemmer::english(),
        }
    }

    /// Build the full partitioned index from the documents in discovery
    /// order. Re-running re-partitions from scratch; there is no incremental
    /// migration.
    pub fn build(&self, documents: &[Document]) -> Result<IndexStats, StoreError> {
        let shard_count = self.assigner.shard_count();
        let mut all_terms = BTreeSet::new();

        for shard in 0..shard_count {
            let tag = self.config.tag(shard);
            let mut local = LocalIndex::default();

            for (i, doc) in documents.iter().enumerate() {
                if self.assigner.assign(i) != shard {
                    continue;
                }
                self.index_document(doc, &mut local);
                self.write_document(&tag, doc)?;
            }

            self.write_shard(&tag, &local)?;
            all_terms.extend(local.postings.keys().cloned());
            tracing::info!(
                shard,
                documents = local.docset.len(),
                terms = local.postings.len(),
                "indexed shard"
            );
        }

        Ok(IndexStats {
            documents: documents.len(),
            terms: all_terms.len(),
            shards: shard_count,
        })
    }

    /// Tokenize one document into the shard's local accumulation.
    ///
    /// The position counter advances over every normalized token, stopwords
    /// included, so positions stay aligned with the source text. The
    /// stopword check applies to the stemmed token.
    fn index_document(&self, doc: &Document, local: &mut LocalIndex) {
        local.docset.insert(doc.doc_id.clone());

        let mut position: u64 = 0;
        for line in &doc.body {
            let tokens = normalize(line);
            if tokens.is_empty() {
                continue;
            }
            for token in tokens {
                position += 1;
                let stem = self.stemmer.stem(&token);
                if is_stopword(&stem) {
                    continue;
                }
                local
                    .postings
                    .entry(stem.clone())
                    .or_default()
                    .insert(doc.doc_id.clone());
                local
                    .positions
                    .entry((stem, doc.doc_id.clone()))
                    .or_default()
                    .push(position);
            }
        }
    }

    /// Persist one document's metadata record.
    fn write_document(&self, tag: &str, doc: &Document) -> Result<(), StoreError> {
        let key = doc_key(tag, &doc.doc_id);
        self.store.hash_set(&key, "name", &doc.metadata.name)?;
        self.store.hash_set(&key, "author", &doc.metadata.author)?;
        self.store.hash_set(&key, "date", &doc.metadata.date)?;
        self.store.hash_set(&key, "content", &doc.content)?;
        Ok(())
    }

    /// Persist one shard's accumulated postings and universe.
    fn write_shard(&self, tag: &str, local: &LocalIndex) -> Result<(), StoreError> {
        if !local.docset.is_empty() {
            let members: Vec<String> = local.docset.iter().cloned().collect();
            self.store.set_add(&docset_key(tag), &members)?;
        }
        for (term, docs) in &local.postings {
            let members: Vec<String> = docs.iter().cloned().collect();
            self.store.set_add(&term_key(tag, term), &members)?;
        }
        for ((term, doc_id), positions) in &local.positions {
            self.store
                .list_append(&pos_key(tag, term, doc_id), positions)?;
        }
        Ok(())
    }
}
