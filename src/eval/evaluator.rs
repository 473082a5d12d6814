//! Distributed Evaluator
//!
//! Recursive depth-first walk over the query AST. Term leaves become
//! cross-shard unions of the shards' local posting sets; AND/OR/NOT nodes
//! combine their operands with store-side set operations. NOT needs a global
//! document universe, which only exists as the union of every shard's
//! docset, so it is materialized per NOT node and discarded with the other
//! intermediates.

use super::ephemeral::{EphemeralKeys, Scratch, EPHEMERAL_TTL};
use crate::config::ClusterConfig;
use crate::index::stemmer::Stemmer;
use crate::query::ast::QueryNode;
use crate::query::parser::{parse, QueryError};
use crate::storage::protocol::{docset_key, term_key, SetStore, StoreError};
use std::cmp::Ordering;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of evaluating one AST node: either the name of an ephemeral set or
/// nothing at all. A term absent from every shard contributes an empty
/// operand silently; it is not an error.
enum Operand {
    Empty,
    Set(String),
}

pub struct Evaluator<S> {
    store: Arc<S>,
    config: ClusterConfig,
    stemmer: Stemmer,
    keys: EphemeralKeys,
}

impl<S: SetStore> Evaluator<S> {
    pub fn new(store: Arc<S>, config: ClusterConfig) -> Self {
        Self {
            store,
            config,
            stemmer: Stemmer::english(),
            keys: EphemeralKeys::new(),
        }
    }

    /// Parse and evaluate query text in one call.
    pub fn evaluate_query(&self, text: &str) -> Result<Vec<String>, EvalError> {
        let ast = parse(text)?;
        tracing::debug!(terms = ast.term_count(), "evaluating query");
        self.evaluate(&ast)
    }

    /// Evaluate an AST against every shard, returning matching document ids
    /// in sorted order.
    ///
    /// Every ephemeral set created on the way is deleted before this returns,
    /// on the error paths included; the TTL armed at creation only matters if
    /// the process dies mid-evaluation.
    pub fn evaluate(&self, ast: &QueryNode) -> Result<Vec<String>, EvalError> {
        let scratch = Scratch::new();

        let result = self
            .eval_node(ast, &scratch)
            .and_then(|operand| match operand {
                Operand::Empty => Ok(Vec::new()),
                Operand::Set(key) => Ok(self.store.set_members(&key)?),
            });
        self.release(&scratch);

        let mut ids = result?;
        ids.sort_unstable_by(|a, b| compare_doc_ids(a, b));
        Ok(ids)
    }

    /// Delete every key the evaluation still owns. Failures are logged, not
    /// propagated: the TTL reclaims anything a dying store connection leaves
    /// behind.
    fn release(&self, scratch: &Scratch) {
        for key in scratch.drain() {
            if let Err(err) = self.store.delete(&key) {
                tracing::warn!(key = %key, err = %err, "failed to release ephemeral set");
            }
        }
    }

    fn eval_node(&self, node: &QueryNode, scratch: &Scratch) -> Result<Operand, EvalError> {
        let children: &[QueryNode] = match node {
            QueryNode::Term(text) => return self.eval_term(text, scratch),
            QueryNode::And(children) | QueryNode::Or(children) => children,
            QueryNode::Not(child) => std::slice::from_ref(&**child),
        };

        // Gather operands depth-first; empty operands contribute nothing.
        let mut operands = Vec::with_capacity(children.len());
        for child in children {
            if let Operand::Set(key) = self.eval_node(child, scratch)? {
                operands.push(key);
            }
        }
        if operands.is_empty() {
            return Ok(Operand::Empty);
        }

        let dest = self.keys.next();
        scratch.track(&dest);

        match node {
            QueryNode::And(_) => {
                self.store.intersect_into(&dest, &operands)?;
            }
            QueryNode::Or(_) => {
                self.store.union_into(&dest, &operands)?;
            }
            QueryNode::Not(_) => {
                // The global universe spans all shards and exists only as
                // the union of their docsets.
                let universe = self.keys.next();
                scratch.track(&universe);
                let docsets: Vec<String> =
                    self.config.tags().iter().map(|t| docset_key(t)).collect();
                self.store.union_into(&universe, &docsets)?;
                self.store.expire(&universe, EPHEMERAL_TTL)?;

                let mut sources = vec![universe.clone()];
                sources.extend(operands.iter().cloned());
                self.store.diff_into(&dest, &sources)?;
                operands.push(universe);
            }
            QueryNode::Term(_) => unreachable!("term handled above"),
        }
        self.store.expire(&dest, EPHEMERAL_TTL)?;

        // Only the freshly created result survives to the parent.
        for key in &operands {
            self.store.delete(key)?;
            scratch.untrack(key);
        }

        Ok(Operand::Set(dest))
    }

    /// A term leaf: union the shards' local posting sets for the stemmed
    /// term into one ephemeral set. Shards without the term are skipped; if
    /// no shard has it, the leaf is an empty operand.
    fn eval_term(&self, text: &str, scratch: &Scratch) -> Result<Operand, EvalError> {
        let stem = self.stemmer.stem(text);

        let mut existing = Vec::new();
        for tag in self.config.tags() {
            let key = term_key(&tag, &stem);
            if self.store.exists(&key)? {
                existing.push(key);
            }
        }
        if existing.is_empty() {
            tracing::debug!(term = %stem, "term missing from every shard");
            return Ok(Operand::Empty);
        }

        let dest = self.keys.next();
        scratch.track(&dest);
        self.store.union_into(&dest, &existing)?;
        self.store.expire(&dest, EPHEMERAL_TTL)?;
        Ok(Operand::Set(dest))
    }
}

/// Document-id ordering for result lists: numeric when both ids are pure
/// digit strings, lexicographic otherwise. Corpus ids are digit strings, so
/// multi-digit ids come out in numeric order (`2` before `10`).
pub fn compare_doc_ids(a: &str, b: &str) -> Ordering {
    let numeric =
        |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if numeric(a) && numeric(b) {
        (a.len(), a).cmp(&(b.len(), b))
    } else {
        a.cmp(b)
    }
}
