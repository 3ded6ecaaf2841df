//! Write-through cache for derived names.
//!
//! Name derivation (pluralization, key casing) is deterministic over a small,
//! fixed input domain, so entries are computed once per distinct input and
//! kept for the lifetime of the cache. No TTL, no size bound.

use std::collections::HashMap;
use std::sync::RwLock;

/// Memoization store mapping a raw string to a derived string.
///
/// Constructed by the embedding application and passed by reference into the
/// naming utilities. Interior mutability sits behind an `RwLock` so a shared
/// reference works from multiple threads; a first-writer race on the same key
/// computes the same value twice and is harmless.
#[derive(Debug, Default)]
pub struct NameCache {
    entries: RwLock<HashMap<String, String>>,
}

impl NameCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `key` has a cached derivation.
    pub fn has(&self, key: &str) -> bool {
        self.entries.read().expect("name cache poisoned").contains_key(key)
    }

    /// Returns the cached derivation for `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().expect("name cache poisoned").get(key).cloned()
    }

    /// Stores `value` under `key` and returns the stored value.
    ///
    /// Returning the value allows expression-style memoized derivation:
    /// `cache.set(key, compute())` is the cache-miss arm of a lookup.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> String {
        let value = value.into();
        self.entries
            .write()
            .expect("name cache poisoned")
            .insert(key.into(), value.clone());
        value
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.entries.write().expect("name cache poisoned").clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().expect("name cache poisoned").len()
    }

    /// Returns whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
