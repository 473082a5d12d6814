//! Stemming Collaborator
//!
//! Thin wrapper around the Snowball English stemmer. The engine only relies
//! on two properties of the collaborator: determinism and idempotence
//! (stemming a stem yields itself).

use rust_stemmers::{Algorithm, Stemmer as Snowball};

/// Reduces tokens to their root form. Shared by the index builder and the
/// evaluator so the same term always maps to the same posting key.
pub struct Stemmer {
    inner: Snowball,
}

impl Stemmer {
    pub fn english() -> Self {
        Self {
            inner: Snowball::create(Algorithm::English),
        }
    }

    pub fn stem(&self, token: &str) -> String {
        self.inner.stem(token).into_owned()
    }
}

impl Default for Stemmer {
    fn default() -> Self {
        Self::english()
    }
}
