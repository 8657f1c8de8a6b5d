//! Per-request routing gate.
//!
//! # Responsibilities
//! - Bypass everything when routing is disabled
//! - Leave requests without an `Invocation` untouched
//! - Resolve and apply the base URL for tagged requests
//!
//! # Design Decisions
//! - Never fails a request; URI conversion problems mean pass-through
//! - Disabled check happens before any lookup

use std::sync::Arc;

use axum::http::{header, HeaderValue, Request, Uri};
use url::Url;

use crate::observability::metrics;
use crate::routing::{resolve, rewrite, Invocation, Resolution, ResolutionCache, RoutingConfig};

/// What the interceptor did with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intercepted {
    /// Routing switched off.
    Disabled,
    /// Request carries no endpoint invocation.
    Untagged,
    /// Request went through resolution.
    Routed(Resolution),
}

impl Intercepted {
    pub fn label(&self) -> &'static str {
        match self {
            Intercepted::Disabled => "disabled",
            Intercepted::Untagged => "untagged",
            Intercepted::Routed(resolution) => resolution.label(),
        }
    }
}

/// Applies base URL routing to outgoing requests.
#[derive(Debug, Clone)]
pub struct BaseUrlsInterceptor {
    config: RoutingConfig,
    cache: Arc<ResolutionCache>,
}

impl BaseUrlsInterceptor {
    pub fn new(config: RoutingConfig) -> Self {
        Self::with_cache(config, Arc::new(ResolutionCache::new()))
    }

    pub fn with_cache(config: RoutingConfig, cache: Arc<ResolutionCache>) -> Self {
        Self { config, cache }
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<ResolutionCache> {
        &self.cache
    }

    /// Route `request` in place.
    pub fn intercept<B>(&self, request: &mut Request<B>) -> Intercepted {
        let outcome = self.route(request);
        metrics::record_request(outcome.label());
        outcome
    }

    fn route<B>(&self, request: &mut Request<B>) -> Intercepted {
        if !self.config.is_enabled() {
            return Intercepted::Disabled;
        }

        let Some(invocation) = request.extensions().get::<Invocation>().cloned() else {
            return Intercepted::Untagged;
        };
        let endpoint = invocation.endpoint();

        let metadata = self.cache.metadata(endpoint);
        let global = self.config.global_base_url();
        let resolution = resolve(
            &metadata,
            invocation.arguments(),
            self.config.base_urls(),
            global.as_deref().map(String::as_str),
        );

        let Some(resolved) = resolution.base_url() else {
            tracing::debug!(endpoint = %endpoint.id(), outcome = resolution.label(), "Request left unchanged");
            return Intercepted::Routed(resolution);
        };

        match rebase_uri(request.uri(), &resolved.url) {
            Some(uri) => {
                tracing::debug!(
                    endpoint = %endpoint.id(),
                    source = %resolved.source,
                    from = %request.uri(),
                    to = %uri,
                    "Request rebased"
                );
                if request.headers().contains_key(header::HOST) {
                    if let Some(host) = uri.authority().and_then(|a| HeaderValue::from_str(a.as_str()).ok()) {
                        request.headers_mut().insert(header::HOST, host);
                    }
                }
                *request.uri_mut() = uri;
                Intercepted::Routed(resolution)
            }
            None => {
                tracing::debug!(endpoint = %endpoint.id(), uri = %request.uri(), "Request URI cannot be rebased");
                Intercepted::Routed(Resolution::Passthrough)
            }
        }
    }
}

fn rebase_uri(uri: &Uri, base: &Url) -> Option<Uri> {
    let original = Url::parse(&uri.to_string()).ok()?;
    rewrite(&original, base).as_str().parse().ok()
}
