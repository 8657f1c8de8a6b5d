//! Configuration schema definitions.
//!
//! This module defines the routing configuration file structure.
//! All types derive Serde traits for deserialization from TOML.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::http::Method;
use serde::{Deserialize, Serialize};

use crate::routing::{Api, BaseUrl, Endpoint};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingSettings {
    /// Enable base URL routing.
    pub enabled: bool,

    /// Fallback base URL used when nothing more specific applies.
    pub global_base_url: Option<String>,

    /// Dynamic base URL table (key -> base URL).
    pub base_urls: BTreeMap<String, String>,

    /// Declared APIs and their endpoints.
    pub apis: Vec<ApiConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            global_base_url: None,
            base_urls: BTreeMap::new(),
            apis: Vec::new(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl RoutingSettings {
    /// Build endpoint declarations from the `[[apis]]` tables.
    ///
    /// Endpoints with an unknown HTTP method are skipped; validation reports them.
    pub fn endpoints(&self) -> Vec<Arc<Endpoint>> {
        let mut endpoints = Vec::new();
        for api_config in &self.apis {
            let mut api = Api::new(&api_config.name);
            if let Some(base_url) = &api_config.base_url {
                api = api.with_base_url(base_url.clone());
            }

            for endpoint_config in &api_config.endpoints {
                let Ok(method) = endpoint_config.method.parse::<Method>() else {
                    continue;
                };
                let mut builder = api.endpoint(&endpoint_config.name).method(method);
                if let Some(path) = &endpoint_config.path {
                    builder = builder.path(path);
                }
                if let Some(base_url) = &endpoint_config.base_url {
                    builder = builder.base_url(base_url.clone());
                }
                if let Some(index) = endpoint_config.url_arg {
                    builder = builder.url_arg(index);
                }
                endpoints.push(builder.build());
            }
        }
        endpoints
    }
}

/// API declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// API name, first half of the endpoint id.
    pub name: String,

    /// API-level routing hint.
    #[serde(default)]
    pub base_url: Option<BaseUrl>,

    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

/// Endpoint declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub name: String,

    /// HTTP method (default: GET).
    #[serde(default = "default_method")]
    pub method: String,

    /// Relative request path.
    #[serde(default)]
    pub path: Option<String>,

    /// Endpoint-level routing hint.
    #[serde(default)]
    pub base_url: Option<BaseUrl>,

    /// Index of the argument carrying an explicit URL.
    #[serde(default)]
    pub url_arg: Option<usize>,
}

fn default_method() -> String {
    "GET".to_string()
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
