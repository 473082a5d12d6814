//! Ephemeral Key Lifecycle
//!
//! Intermediate result sets are named `tmp:<session>:<n>` where the session
//! id is random per evaluator and `n` is a monotonic counter. Wall-clock
//! names are not unique under concurrent evaluations sharing one store, so
//! they are never used here.
//!
//! The `Scratch` registry records every ephemeral key an evaluation creates.
//! Keys are untracked as they are deleted mid-walk; whatever remains when
//! the evaluation exits (normally just the final result, on errors possibly
//! more) is released in one sweep, with the per-key TTL as the backstop if
//! even that sweep is cut short.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

/// Lifetime armed on every ephemeral key at creation.
pub const EPHEMERAL_TTL: Duration = Duration::from_secs(60);

/// Generator of store-unique ephemeral key names.
#[derive(Debug)]
pub struct EphemeralKeys {
    session: String,
    counter: AtomicU64,
}

impl EphemeralKeys {
    pub fn new() -> Self {
        Self {
            session: Uuid::new_v4().simple().to_string(),
            counter: AtomicU64::new(0),
        }
    }

    pub fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("tmp:{}:{}", self.session, n)
    }
}

impl Default for EphemeralKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of ephemeral keys owned by one evaluation.
#[derive(Debug, Default)]
pub struct Scratch {
    keys: Mutex<Vec<String>>,
}

impl Scratch {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        // The registry is owned by a single evaluation; a poisoned lock can
        // only mean that evaluation already panicked, so the inner state is
        // still the right thing to clean up.
        self.keys.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn track(&self, key: &str) {
        self.guard().push(key.to_string());
    }

    pub fn untrack(&self, key: &str) {
        self.guard().retain(|k| k != key);
    }

    /// Take every still-tracked key, leaving the registry empty.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.guard())
    }
}
