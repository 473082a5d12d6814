//! HTTP Server Module
//!
//! Thin Axum surface over the evaluator and the store. Everything here calls
//! into the engine through the same contracts the library exposes; no
//! retrieval logic lives in the handlers.
//!
//! ## Submodules
//! - **`handlers`**: Request handlers for querying, document metadata and
//!   shard diagnostics.
//! - **`types`**: Response DTOs.

pub mod handlers;
pub mod types;

#[cfg(test)]
mod tests;
