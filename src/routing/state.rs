//! Runtime routing state shared between the host application and requests.
//!
//! # Responsibilities
//! - Enable/disable switch for the whole mechanism
//! - Optional global fallback base URL
//! - Dynamic key -> base URL table mutable at any time
//!
//! # Design Decisions
//! - `RoutingConfig` is a cheap cloneable handle (`Arc` inside); every clone
//!   observes the same state
//! - Each value is synchronized on its own: atomics for the switch,
//!   `ArcSwapOption` for the fallback, `DashMap` for the table
//! - No cross-value atomicity; readers see the old or the new value

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use dashmap::DashMap;

use crate::http::BaseUrlsLayer;

/// Dynamic base URL table.
#[derive(Debug, Clone, Default)]
pub struct DynamicBaseUrls {
    inner: Arc<DashMap<String, String>>,
}

impl DynamicBaseUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the base URL for `key`.
    pub fn insert(&self, key: impl Into<String>, base_url: impl Into<String>) -> Option<String> {
        self.inner.insert(key.into(), base_url.into())
    }

    /// Get the base URL stored for `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.inner.remove(key).map(|(_, v)| v)
    }

    pub fn clear(&self) {
        self.inner.clear();
    }

    pub fn extend<I, K, V>(&self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in pairs {
            self.inner.insert(key.into(), value.into());
        }
    }

    /// Make the table equal to `entries`.
    ///
    /// New values are written before stale keys are dropped, so a key present
    /// in both the old and new table never reads as missing.
    pub fn replace_all(&self, entries: &BTreeMap<String, String>) {
        self.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.inner.retain(|key, _| entries.contains_key(key));
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Sorted copy of the table.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.inner
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }
}

#[derive(Debug, Default)]
struct Inner {
    enabled: AtomicBool,
    global_base_url: ArcSwapOption<String>,
    base_urls: DynamicBaseUrls,
}

/// Handle to the routing state.
///
/// A fresh config is disabled; [`RoutingConfig::enable_multi_base_urls`]
/// turns it on when wiring the layer into a client.
#[derive(Debug, Clone, Default)]
pub struct RoutingConfig {
    inner: Arc<Inner>,
}

impl RoutingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.inner.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn global_base_url(&self) -> Option<Arc<String>> {
        self.inner.global_base_url.load_full()
    }

    pub fn set_global_base_url(&self, base_url: Option<String>) {
        self.inner.global_base_url.store(base_url.map(Arc::new));
    }

    pub fn base_urls(&self) -> &DynamicBaseUrls {
        &self.inner.base_urls
    }

    /// Enable routing, seed the dynamic table with `pairs` and return the
    /// layer to add to a client stack.
    pub fn enable_multi_base_urls<I, K, V>(&self, pairs: I) -> BaseUrlsLayer
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.set_enabled(true);
        self.inner.base_urls.extend(pairs);
        tracing::info!(
            base_urls = self.inner.base_urls.len(),
            "Multiple base URLs enabled"
        );
        BaseUrlsLayer::new(self.clone())
    }
}
