//! HTTP client with base URL routing.
//!
//! # Responsibilities
//! - Build request URLs from the client base URL and endpoint declarations
//! - Tag requests with their `Invocation`
//! - Send them through `BaseUrlsLayer` on top of the hyper client
//!
//! # Design Decisions
//! - The explicit URL argument, when declared and present, replaces the
//!   endpoint path; both are joined onto the client base URL
//! - Transport errors are the only errors routing can surface to callers
//! - The transport is a plain `HttpConnector`: only `http` targets can be
//!   reached, so an `https` client base URL is rejected at construction and
//!   a request rebased onto an `https` base fails with `Transport`

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use tower::{Layer, Service, ServiceExt};
use url::Url;

use crate::http::layer::{BaseUrlsLayer, BaseUrlsService};
use crate::routing::{Endpoint, Invocation, RoutingConfig};

/// Errors returned by [`ApiClient::call`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client base URL or request target is not a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Endpoint has neither a path nor an explicit URL argument.
    #[error("endpoint {0} has no path and no URL argument")]
    MissingUrl(String),

    /// Client base URL uses a scheme the plain HTTP transport cannot reach.
    #[error("unsupported client base URL scheme {0:?}, only http is supported")]
    UnsupportedScheme(String),

    #[error("invalid request URI: {0}")]
    Uri(#[from] axum::http::uri::InvalidUri),

    #[error("failed to build request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),
}

type Transport = BaseUrlsService<Client<HttpConnector, Body>>;

/// Client for declared endpoints over plain HTTP.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    config: RoutingConfig,
    service: Transport,
}

impl ApiClient {
    /// Create a client whose requests go through `layer`.
    pub fn new(base_url: &str, layer: BaseUrlsLayer) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)?;
        if base_url.scheme() != "http" {
            return Err(ClientError::UnsupportedScheme(base_url.scheme().to_string()));
        }
        let config = layer.interceptor().config().clone();
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self {
            base_url,
            config,
            service: layer.layer(client),
        })
    }

    /// Create a client with routing enabled on `config`, seeding its dynamic
    /// table with `pairs`.
    pub fn with_routing<I, K, V>(base_url: &str, config: &RoutingConfig, pairs: I) -> Result<Self, ClientError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(base_url, config.enable_multi_base_urls(pairs))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn routing(&self) -> &RoutingConfig {
        &self.config
    }

    /// URL a call would request before routing.
    pub fn request_url(&self, endpoint: &Endpoint, arguments: &[String]) -> Result<Url, ClientError> {
        let target = endpoint
            .url_arg()
            .and_then(|index| arguments.get(index))
            .map(String::as_str)
            .or_else(|| endpoint.path())
            .ok_or_else(|| ClientError::MissingUrl(endpoint.id().to_string()))?;

        Ok(self.base_url.join(target)?)
    }

    /// Call `endpoint` with `arguments`.
    pub async fn call(&self, endpoint: &Arc<Endpoint>, arguments: Vec<String>) -> Result<Response<Body>, ClientError> {
        let url = self.request_url(endpoint, &arguments)?;
        let uri: Uri = url.as_str().parse()?;

        let request = Request::builder()
            .method(endpoint.method().clone())
            .uri(uri)
            .extension(Invocation::new(endpoint.clone(), arguments))
            .body(Body::empty())?;

        tracing::debug!(endpoint = %endpoint.id(), url = %url, "Calling endpoint");

        let mut service = self.service.clone();
        let response = service.ready().await?.call(request).await?;

        let (parts, body) = response.into_parts();
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("enabled", &self.config.is_enabled())
            .finish()
    }
}
