//! Endpoint declarations.
//!
//! # Responsibilities
//! - Describe an API and its endpoints together with their routing hints
//! - Give every endpoint a readable id for logs and lookups
//! - Carry the per-call invocation (endpoint + arguments) on outgoing requests
//!
//! # Design Decisions
//! - Declarations are explicit builder calls made once at setup time
//! - An endpoint copies its API-level hint, so it is self-contained once built
//! - Endpoints are shared as `Arc<Endpoint>`; the `Arc` itself is the
//!   endpoint's identity, `EndpointId` is only its name and need not be unique

use std::fmt;
use std::sync::Arc;

use axum::http::Method;
use serde::{Deserialize, Serialize};

/// Routing hint attached to an API or to a single endpoint.
///
/// `value` is a static base URL and `key` names an entry of the dynamic
/// base URL table. Empty strings mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BaseUrl {
    pub value: String,
    pub key: String,
}

impl BaseUrl {
    /// A hint with a static base URL only.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            key: String::new(),
        }
    }

    /// A hint with a lookup key only.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            key: key.into(),
        }
    }

    /// Add a lookup key to this hint.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

/// Name of a declared endpoint, `"<api>::<endpoint>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointId(Arc<str>);

impl EndpointId {
    pub fn new(api: &str, endpoint: &str) -> Self {
        Self(Arc::from(format!("{api}::{endpoint}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EndpointId {
    fn from(id: &str) -> Self {
        Self(Arc::from(id))
    }
}

/// An API declaration grouping endpoints under a common routing hint.
#[derive(Debug, Clone)]
pub struct Api {
    name: String,
    base_url: Option<BaseUrl>,
}

impl Api {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: None,
        }
    }

    /// Attach an API-level routing hint.
    pub fn with_base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_url(&self) -> Option<&BaseUrl> {
        self.base_url.as_ref()
    }

    /// Start declaring an endpoint of this API.
    pub fn endpoint(&self, name: impl Into<String>) -> EndpointBuilder {
        EndpointBuilder {
            api_name: self.name.clone(),
            api_base_url: self.base_url.clone(),
            name: name.into(),
            method: Method::GET,
            path: None,
            base_url: None,
            url_arg: None,
        }
    }
}

/// Builder for a single endpoint.
#[derive(Debug, Clone)]
pub struct EndpointBuilder {
    api_name: String,
    api_base_url: Option<BaseUrl>,
    name: String,
    method: Method,
    path: Option<String>,
    base_url: Option<BaseUrl>,
    url_arg: Option<usize>,
}

impl EndpointBuilder {
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Relative path requested when no explicit URL argument is given.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach an endpoint-level routing hint.
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Mark the argument at `index` as carrying the request URL.
    pub fn url_arg(mut self, index: usize) -> Self {
        self.url_arg = Some(index);
        self
    }

    pub fn build(self) -> Arc<Endpoint> {
        Arc::new(Endpoint {
            id: EndpointId::new(&self.api_name, &self.name),
            method: self.method,
            path: self.path,
            base_url: self.base_url,
            api_base_url: self.api_base_url,
            url_arg: self.url_arg,
        })
    }
}

/// A declared endpoint.
#[derive(Debug)]
pub struct Endpoint {
    id: EndpointId,
    method: Method,
    path: Option<String>,
    base_url: Option<BaseUrl>,
    api_base_url: Option<BaseUrl>,
    url_arg: Option<usize>,
}

impl Endpoint {
    pub fn id(&self) -> &EndpointId {
        &self.id
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Endpoint-level routing hint.
    pub fn base_url(&self) -> Option<&BaseUrl> {
        self.base_url.as_ref()
    }

    /// Routing hint inherited from the declaring API.
    pub fn api_base_url(&self) -> Option<&BaseUrl> {
        self.api_base_url.as_ref()
    }

    pub fn url_arg(&self) -> Option<usize> {
        self.url_arg
    }
}

/// One call of an endpoint, attached to the outgoing request as an extension.
#[derive(Debug, Clone)]
pub struct Invocation {
    endpoint: Arc<Endpoint>,
    arguments: Arc<[String]>,
}

impl Invocation {
    pub fn new(endpoint: Arc<Endpoint>, arguments: Vec<String>) -> Self {
        Self {
            endpoint,
            arguments: arguments.into(),
        }
    }

    pub fn endpoint(&self) -> &Arc<Endpoint> {
        &self.endpoint
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }
}
