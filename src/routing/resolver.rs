//! Base URL resolution.
//!
//! # Responsibilities
//! - Pick the base URL for one call from the priority ladder
//!
//! # Priority (first match wins)
//! 1. explicit URL argument (request is left untouched)
//! 2. dynamic table entry for the endpoint key
//! 3. dynamic table entry for the API key
//! 4. declared static base URL
//! 5. global fallback
//! 6. pass-through
//!
//! # Design Decisions
//! - Invalid candidates count as absent; resolution never fails
//! - Pure over its inputs; table reads are per-key snapshots

use std::fmt;

use url::Url;

use crate::routing::cache::EndpointRoutingMetadata;
use crate::routing::state::DynamicBaseUrls;
use crate::routing::url::valid_base_url;

/// Tier a resolved base URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseUrlSource {
    MethodKey,
    TypeKey,
    Declared,
    Global,
}

impl BaseUrlSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseUrlSource::MethodKey => "method_key",
            BaseUrlSource::TypeKey => "type_key",
            BaseUrlSource::Declared => "declared",
            BaseUrlSource::Global => "global",
        }
    }
}

impl fmt::Display for BaseUrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A base URL chosen for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBaseUrl {
    pub url: Url,
    pub source: BaseUrlSource,
}

/// Outcome of resolving one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The call carries its own absolute URL.
    Explicit,
    /// Rebase the request onto this base URL.
    Rebase(ResolvedBaseUrl),
    /// Nothing applies.
    Passthrough,
}

impl Resolution {
    pub fn base_url(&self) -> Option<&ResolvedBaseUrl> {
        match self {
            Resolution::Rebase(resolved) => Some(resolved),
            _ => None,
        }
    }

    /// Short label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Explicit => "explicit",
            Resolution::Rebase(resolved) => resolved.source.as_str(),
            Resolution::Passthrough => "passthrough",
        }
    }
}

/// Resolve the base URL for one call of an endpoint.
pub fn resolve(
    metadata: &EndpointRoutingMetadata,
    arguments: &[String],
    base_urls: &DynamicBaseUrls,
    global_base_url: Option<&str>,
) -> Resolution {
    let explicit = metadata
        .explicit_url_arg
        .and_then(|index| arguments.get(index))
        .and_then(|arg| valid_base_url(arg));
    if explicit.is_some() {
        return Resolution::Explicit;
    }

    let lookup = |key: &Option<String>| {
        key.as_deref()
            .and_then(|key| base_urls.get(key))
            .and_then(|candidate| valid_base_url(&candidate))
    };

    let resolved = lookup(&metadata.method_key)
        .map(|url| (url, BaseUrlSource::MethodKey))
        .or_else(|| lookup(&metadata.type_key).map(|url| (url, BaseUrlSource::TypeKey)))
        .or_else(|| {
            metadata
                .static_base_url
                .clone()
                .map(|url| (url, BaseUrlSource::Declared))
        })
        .or_else(|| {
            global_base_url
                .and_then(valid_base_url)
                .map(|url| (url, BaseUrlSource::Global))
        });

    match resolved {
        Some((url, source)) => Resolution::Rebase(ResolvedBaseUrl { url, source }),
        None => Resolution::Passthrough,
    }
}
