//! HTTP Request Handlers

use super::types::{
    DocResponse, ErrorResponse, QueryHit, QueryParams, QueryRejected, QueryResponse, ShardStats,
    StatsResponse,
};
use crate::config::ClusterConfig;
use crate::eval::evaluator::{EvalError, Evaluator};
use crate::index::document::DocMetadata;
use crate::storage::memory::MemoryStore;
use crate::storage::protocol::{doc_key, docset_key, SetStore, StoreError};
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

/// Shared state behind the HTTP surface.
pub struct AppContext {
    pub store: Arc<MemoryStore>,
    pub evaluator: Evaluator<MemoryStore>,
    pub config: ClusterConfig,
}

impl AppContext {
    pub fn new(store: Arc<MemoryStore>, config: ClusterConfig) -> Self {
        let evaluator = Evaluator::new(store.clone(), config.clone());
        Self {
            store,
            evaluator,
            config,
        }
    }

    /// Find a document's metadata record, whichever shard holds it. A store
    /// failure is distinct from an absent document.
    fn find_metadata(&self, doc_id: &str) -> Result<Option<DocMetadata>, StoreError> {
        for tag in self.config.tags() {
            let record = self.store.hash_get_all(&doc_key(&tag, doc_id))?;
            if !record.is_empty() {
                return Ok(Some(DocMetadata {
                    name: record.get("name").cloned().unwrap_or_default(),
                    author: record.get("author").cloned().unwrap_or_default(),
                    date: record.get("date").cloned().unwrap_or_default(),
                }));
            }
        }
        Ok(None)
    }
}

/// `GET /query?q=...` — evaluate a boolean query and hydrate the hits.
pub async fn handle_query(
    Query(params): Query<QueryParams>,
    Extension(ctx): Extension<Arc<AppContext>>,
) -> Response {
    let result = ctx.evaluator.evaluate_query(&params.q).and_then(|ids| {
        let mut hits = Vec::with_capacity(ids.len());
        for doc_id in ids {
            let name = ctx.find_metadata(&doc_id)?.map(|m| m.name);
            hits.push(QueryHit { doc_id, name });
        }
        Ok(hits)
    });
    match result {
        Ok(hits) => {
            let response = QueryResponse {
                query: params.q,
                count: hits.len(),
                hits,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(EvalError::Query(err)) => {
            tracing::debug!(query = %params.q, %err, "rejected query");
            let response = QueryRejected {
                query: params.q,
                error: err.to_string(),
            };
            (StatusCode::BAD_REQUEST, Json(response)).into_response()
        }
        Err(EvalError::Store(err)) => {
            tracing::error!(query = %params.q, %err, "store failure during evaluation");
            let response = QueryRejected {
                query: params.q,
                error: err.to_string(),
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
        }
    }
}

/// `GET /doc/:id` — metadata record for one document.
pub async fn handle_doc(
    Path(doc_id): Path<String>,
    Extension(ctx): Extension<Arc<AppContext>>,
) -> Response {
    match ctx.find_metadata(&doc_id) {
        Ok(Some(metadata)) => {
            (StatusCode::OK, Json(DocResponse { doc_id, metadata })).into_response()
        }
        Ok(None) => {
            let response = ErrorResponse {
                error: format!("document {} not found", doc_id),
            };
            (StatusCode::NOT_FOUND, Json(response)).into_response()
        }
        Err(err) => {
            tracing::error!(doc_id = %doc_id, %err, "store failure reading metadata");
            let response = ErrorResponse {
                error: err.to_string(),
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
        }
    }
}

/// `GET /stats` — per-shard document universe and term counts.
pub async fn handle_stats(Extension(ctx): Extension<Arc<AppContext>>) -> Response {
    let mut shards = Vec::with_capacity(ctx.config.shard_count());
    for tag in ctx.config.tags() {
        let documents = ctx.store.set_card(&docset_key(&tag)).unwrap_or(0);
        let terms = ctx
            .store
            .keys_with_prefix(&format!("{{{tag}}}term:"))
            .len();
        shards.push(ShardStats {
            tag,
            documents,
            terms,
        });
    }
    (StatusCode::OK, Json(StatsResponse { shards })).into_response()
}
