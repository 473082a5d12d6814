use axum::{routing::get, Extension, Router};
use shardsearch::config::ClusterConfig;
use shardsearch::index::builder::IndexBuilder;
use shardsearch::index::document::load_corpus;
use shardsearch::server::handlers::{handle_doc, handle_query, handle_stats, AppContext};
use shardsearch::storage::memory::MemoryStore;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut shards: usize = 3;
    let mut corpus: Option<PathBuf> = None;
    let mut bind_addr: SocketAddr = "127.0.0.1:7700".parse()?;

    let mut i = 1;
    while i < args.len() {
        match (args[i].as_str(), args.get(i + 1)) {
            ("--shards", Some(value)) => shards = value.parse()?,
            ("--corpus", Some(value)) => corpus = Some(PathBuf::from(value)),
            ("--bind", Some(value)) => bind_addr = value.parse()?,
            _ => {
                eprintln!(
                    "Usage: {} [--shards N] [--corpus DIR] [--bind addr:port]",
                    args[0]
                );
                std::process::exit(1);
            }
        }
        i += 2;
    }

    // Zero shards is a configuration error and must fail here, not mid-query.
    let config = ClusterConfig::new(shards)?;
    let store = Arc::new(MemoryStore::new());

    if let Some(dir) = corpus {
        tracing::info!("Loading corpus from {}", dir.display());
        let documents = load_corpus(&dir)?;
        tracing::info!("Discovered {} documents", documents.len());

        let builder = IndexBuilder::new(store.clone(), config.clone());
        let stats = builder.build(&documents)?;
        tracing::info!(
            "Indexed {} documents, {} terms across {} shards",
            stats.documents,
            stats.terms,
            stats.shards
        );
    } else {
        tracing::info!("No corpus directory given, starting with an empty index");
    }

    let ctx = Arc::new(AppContext::new(store, config));

    let app = Router::new()
        .route("/query", get(handle_query))
        .route("/doc/:id", get(handle_doc))
        .route("/stats", get(handle_stats))
        .layer(Extension(ctx));

    tracing::info!("HTTP server listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
