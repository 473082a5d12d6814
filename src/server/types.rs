//! Server Data Types
//!
//! Response DTOs for the HTTP surface. Serialized as JSON.

use crate::index::document::DocMetadata;
use serde::{Deserialize, Serialize};

/// Query string parameters for the query endpoint.
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    pub q: String,
}

/// One matching document, hydrated with its metadata record.
#[derive(Debug, Serialize)]
pub struct QueryHit {
    pub doc_id: String,
    pub name: Option<String>,
}

/// Response for the query endpoint.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub query: String,
    pub count: usize,
    pub hits: Vec<QueryHit>,
}

/// Rejected-query response; no partial result is ever returned.
#[derive(Debug, Serialize)]
pub struct QueryRejected {
    pub query: String,
    pub error: String,
}

/// Generic error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response for the document metadata endpoint.
#[derive(Debug, Serialize)]
pub struct DocResponse {
    pub doc_id: String,
    #[serde(flatten)]
    pub metadata: DocMetadata,
}

/// Per-shard diagnostics.
#[derive(Debug, Serialize)]
pub struct ShardStats {
    pub tag: String,
    pub documents: usize,
    pub terms: usize,
}

/// Response for the stats endpoint.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub shards: Vec<ShardStats>,
}
