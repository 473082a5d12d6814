//! Server Module Tests
//!
//! Exercises the handlers against an in-process store and pins the JSON
//! shape of the response DTOs.

#[cfg(test)]
mod tests {
    use crate::config::ClusterConfig;
    use crate::index::builder::IndexBuilder;
    use crate::index::document::{DocMetadata, Document};
    use crate::server::handlers::{handle_doc, handle_query, handle_stats, AppContext};
    use crate::server::types::{DocResponse, QueryParams};
    use crate::storage::memory::MemoryStore;
    use crate::storage::protocol::{doc_key, SetStore};
    use axum::body::to_bytes;
    use axum::extract::{Extension, Path, Query};
    use axum::http::StatusCode;
    use axum::response::Response;
    use std::sync::Arc;

    fn make_doc(doc_id: &str, body: &str) -> Document {
        Document {
            doc_id: doc_id.to_string(),
            metadata: DocMetadata {
                name: format!("Book {}", doc_id),
                author: "Anonymous".to_string(),
                date: "1900".to_string(),
            },
            body: vec![body.to_string()],
            content: body.to_string(),
        }
    }

    /// Index the given (id, body) pairs and return a ready handler context.
    fn setup(docs: &[(&str, &str)], shards: usize) -> Arc<AppContext> {
        let store = Arc::new(MemoryStore::new());
        let config = ClusterConfig::new(shards).unwrap();
        let documents: Vec<Document> = docs.iter().map(|(id, body)| make_doc(id, body)).collect();
        IndexBuilder::new(store.clone(), config.clone())
            .build(&documents)
            .unwrap();
        Arc::new(AppContext::new(store, config))
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ============================================================
    // QUERY ENDPOINT
    // ============================================================

    #[tokio::test]
    async fn test_query_returns_hydrated_hits() {
        let ctx = setup(&[("1", "blue dog"), ("2", "red dog")], 2);
        let params = Query(QueryParams {
            q: "dog".to_string(),
        });
        let response = handle_query(params, Extension(ctx)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["count"], 2);
        assert_eq!(body["hits"][0]["doc_id"], "1");
        assert_eq!(body["hits"][0]["name"], "Book 1");
        assert_eq!(body["hits"][1]["doc_id"], "2");
    }

    #[tokio::test]
    async fn test_rejected_query_is_bad_request() {
        let ctx = setup(&[("1", "blue dog")], 1);
        let params = Query(QueryParams {
            q: "dog2".to_string(),
        });
        let response = handle_query(params, Extension(ctx)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["query"], "dog2");
    }

    // ============================================================
    // DOCUMENT ENDPOINT
    // ============================================================

    #[tokio::test]
    async fn test_doc_found_flattens_metadata() {
        let ctx = setup(&[("7", "blue")], 1);
        let response = handle_doc(Path("7".to_string()), Extension(ctx)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["doc_id"], "7");
        assert_eq!(body["name"], "Book 7");
        assert_eq!(body["author"], "Anonymous");
    }

    #[tokio::test]
    async fn test_doc_missing_is_not_found() {
        let ctx = setup(&[("7", "blue")], 1);
        let response = handle_doc(Path("9".to_string()), Extension(ctx)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_doc_store_failure_is_service_unavailable() {
        // A metadata key holding the wrong value kind is a store failure,
        // not a missing document.
        let ctx = setup(&[("7", "blue")], 1);
        ctx.store
            .set_add(&doc_key("0", "9"), &["x".to_string()])
            .unwrap();
        let response = handle_doc(Path("9".to_string()), Extension(ctx)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    // ============================================================
    // STATS ENDPOINT
    // ============================================================

    #[tokio::test]
    async fn test_stats_reports_every_shard() {
        let ctx = setup(&[("1", "blue"), ("2", "red")], 2);
        let response = handle_stats(Extension(ctx)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["shards"].as_array().unwrap().len(), 2);
        assert_eq!(body["shards"][0]["documents"], 1);
        assert_eq!(body["shards"][1]["documents"], 1);
    }

    // ============================================================
    // DTO SHAPE
    // ============================================================

    #[test]
    fn test_doc_response_serializes_flat() {
        let response = DocResponse {
            doc_id: "35".to_string(),
            metadata: DocMetadata {
                name: "The Time Machine".to_string(),
                author: "H. G. Wells".to_string(),
                date: "1895".to_string(),
            },
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["doc_id"], "35");
        assert_eq!(value["name"], "The Time Machine");
        assert!(value.get("metadata").is_none());
    }
}
