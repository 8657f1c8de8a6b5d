//! Per-endpoint routing metadata and its cache.
//!
//! # Responsibilities
//! - Extract the statically-known routing metadata of an endpoint
//! - Memoize it per endpoint identity for the process lifetime
//!
//! # Design Decisions
//! - Extraction is pure; the result is immutable and shared as `Arc`
//! - Slots are keyed by the address of the `Arc<Endpoint>`, not by its name;
//!   each slot holds the endpoint so the address stays unique while cached
//! - The cache slot is filled under the map's entry lock, so concurrent
//!   first calls for one endpoint run the extraction once
//! - No eviction: endpoints are a small set known at setup time

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use url::Url;

use crate::observability::metrics;
use crate::routing::endpoint::{BaseUrl, Endpoint};
use crate::routing::url::valid_base_url;

/// Routing metadata of one endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointRoutingMetadata {
    /// Endpoint-level static URL, else the API-level one.
    pub static_base_url: Option<Url>,
    /// Endpoint-level lookup key.
    pub method_key: Option<String>,
    /// API-level lookup key.
    pub type_key: Option<String>,
    /// Index of the argument carrying an explicit URL.
    pub explicit_url_arg: Option<usize>,
}

/// Source of endpoint metadata.
pub trait MetadataSource: Send + Sync + fmt::Debug {
    /// Compute the routing metadata for `endpoint`.
    fn extract(&self, endpoint: &Endpoint) -> EndpointRoutingMetadata;
}

/// Reads metadata from the endpoint's declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredMetadata;

impl MetadataSource for DeclaredMetadata {
    fn extract(&self, endpoint: &Endpoint) -> EndpointRoutingMetadata {
        let method_hint = endpoint.base_url();
        let type_hint = endpoint.api_base_url();

        let static_base_url = method_hint
            .and_then(|hint| valid_base_url(&hint.value))
            .or_else(|| type_hint.and_then(|hint| valid_base_url(&hint.value)));

        EndpointRoutingMetadata {
            static_base_url,
            method_key: method_hint.and_then(non_empty_key),
            type_key: type_hint.and_then(non_empty_key),
            explicit_url_arg: endpoint.url_arg(),
        }
    }
}

fn non_empty_key(hint: &BaseUrl) -> Option<String> {
    (!hint.key.is_empty()).then(|| hint.key.clone())
}

#[derive(Debug)]
struct CacheSlot {
    // Pins the endpoint so its address is not reused by another declaration.
    _endpoint: Arc<Endpoint>,
    metadata: Arc<EndpointRoutingMetadata>,
}

/// Concurrent endpoint -> metadata cache.
#[derive(Debug)]
pub struct ResolutionCache {
    entries: DashMap<usize, CacheSlot>,
    source: Arc<dyn MetadataSource>,
}

impl ResolutionCache {
    /// Create a cache reading endpoint declarations.
    pub fn new() -> Self {
        Self::with_source(Arc::new(DeclaredMetadata))
    }

    /// Create a cache backed by a custom metadata source.
    pub fn with_source(source: Arc<dyn MetadataSource>) -> Self {
        Self {
            entries: DashMap::new(),
            source,
        }
    }

    /// Return the metadata for `endpoint`, extracting it on first use.
    ///
    /// Two endpoints declared with the same name get separate slots.
    pub fn metadata(&self, endpoint: &Arc<Endpoint>) -> Arc<EndpointRoutingMetadata> {
        let slot_key = Arc::as_ptr(endpoint) as usize;
        if let Some(cached) = self.entries.get(&slot_key) {
            return cached.metadata.clone();
        }

        self.entries
            .entry(slot_key)
            .or_insert_with(|| {
                let metadata = self.source.extract(endpoint);
                tracing::debug!(endpoint = %endpoint.id(), metadata = ?metadata, "Routing metadata extracted");
                metrics::record_metadata_extraction();
                CacheSlot {
                    _endpoint: endpoint.clone(),
                    metadata: Arc::new(metadata),
                }
            })
            .metadata
            .clone()
    }

    /// Number of endpoints seen so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::endpoint::Api;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    impl MetadataSource for CountingSource {
        fn extract(&self, endpoint: &Endpoint) -> EndpointRoutingMetadata {
            self.calls.fetch_add(1, Ordering::SeqCst);
            DeclaredMetadata.extract(endpoint)
        }
    }

    #[test]
    fn test_method_hint_wins_over_api_hint() {
        let api = Api::new("Api").with_base_url(BaseUrl::new("https://api.example.com").with_key("t"));
        let endpoint = api
            .endpoint("get")
            .base_url(BaseUrl::new("https://method.example.com/v2").with_key("m"))
            .build();

        let metadata = DeclaredMetadata.extract(&endpoint);
        assert_eq!(metadata.static_base_url.unwrap().as_str(), "https://method.example.com/v2");
        assert_eq!(metadata.method_key.as_deref(), Some("m"));
        assert_eq!(metadata.type_key.as_deref(), Some("t"));
        assert_eq!(metadata.explicit_url_arg, None);
    }

    #[test]
    fn test_invalid_method_url_falls_back_to_api_url() {
        let api = Api::new("Api").with_base_url(BaseUrl::new("https://api.example.com/"));
        let endpoint = api
            .endpoint("get")
            .base_url(BaseUrl::new("ftp://files.example.com"))
            .build();

        let metadata = DeclaredMetadata.extract(&endpoint);
        assert_eq!(metadata.static_base_url.unwrap().as_str(), "https://api.example.com/");
        assert!(metadata.method_key.is_none());
    }

    #[test]
    fn test_empty_values_are_absent() {
        let api = Api::new("Api").with_base_url(BaseUrl::default());
        let endpoint = api.endpoint("get").base_url(BaseUrl::default()).url_arg(1).build();

        let metadata = DeclaredMetadata.extract(&endpoint);
        assert_eq!(
            metadata,
            EndpointRoutingMetadata {
                explicit_url_arg: Some(1),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_metadata_extracted_once() {
        let source = Arc::new(CountingSource::default());
        let cache = ResolutionCache::with_source(source.clone());
        let api = Api::new("Api").with_base_url(BaseUrl::key("mock1"));
        let endpoint = api.endpoint("get").base_url(BaseUrl::key("mock2")).build();

        let first = cache.metadata(&endpoint);
        let second = cache.metadata(&endpoint);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_concurrent_first_calls_converge() {
        let source = Arc::new(CountingSource::default());
        let cache = Arc::new(ResolutionCache::with_source(source.clone()));
        let endpoint = Api::new("Api").endpoint("get").base_url(BaseUrl::key("k")).build();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                let endpoint = endpoint.clone();
                std::thread::spawn(move || cache.metadata(&endpoint))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_same_named_endpoints_get_separate_slots() {
        let cache = ResolutionCache::new();
        let api = Api::new("Api");
        let users = api.endpoint("get").base_url(BaseUrl::key("users")).build();
        let orders = api.endpoint("get").base_url(BaseUrl::key("orders")).build();
        assert_eq!(users.id(), orders.id());

        assert_eq!(cache.metadata(&users).method_key.as_deref(), Some("users"));
        assert_eq!(cache.metadata(&orders).method_key.as_deref(), Some("orders"));
        assert_eq!(cache.len(), 2);
    }
}
