//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject structurally broken declarations (empty names/keys, duplicate
//!   endpoint ids, invalid HTTP methods)
//! - Warn about URLs the router would ignore
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Invalid URLs are warnings: at runtime they count as absent
//! - Validation is pure apart from logging

use std::collections::HashSet;

use axum::http::Method;
use thiserror::Error;

use crate::config::schema::RoutingSettings;
use crate::routing::url::is_valid_base_url;
use crate::routing::{BaseUrl, EndpointId};

/// A semantic problem in the routing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("API name must not be empty")]
    EmptyApiName,

    #[error("endpoint name must not be empty (API {api})")]
    EmptyEndpointName { api: String },

    #[error("base URL key must not be empty")]
    EmptyBaseUrlKey,

    #[error("duplicate endpoint {0}")]
    DuplicateEndpoint(String),

    #[error("invalid HTTP method {method:?} for endpoint {endpoint}")]
    InvalidMethod { endpoint: String, method: String },
}

/// Validate `settings`, collecting every error.
pub fn validate_settings(settings: &RoutingSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (key, url) in &settings.base_urls {
        if key.is_empty() {
            errors.push(ValidationError::EmptyBaseUrlKey);
        }
        warn_if_invalid(url, key);
    }

    if let Some(url) = &settings.global_base_url {
        warn_if_invalid(url, "global_base_url");
    }

    for api in &settings.apis {
        if api.name.is_empty() {
            errors.push(ValidationError::EmptyApiName);
        }
        if let Some(hint) = &api.base_url {
            warn_if_invalid_hint(hint, &api.name);
        }

        for endpoint in &api.endpoints {
            let id = EndpointId::new(&api.name, &endpoint.name);
            if endpoint.name.is_empty() {
                errors.push(ValidationError::EmptyEndpointName {
                    api: api.name.clone(),
                });
            }
            if endpoint.method.parse::<Method>().is_err() {
                errors.push(ValidationError::InvalidMethod {
                    endpoint: id.to_string(),
                    method: endpoint.method.clone(),
                });
            }
            if let Some(hint) = &endpoint.base_url {
                warn_if_invalid_hint(hint, id.as_str());
            }
            if !seen.insert(id.clone()) {
                errors.push(ValidationError::DuplicateEndpoint(id.to_string()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn warn_if_invalid_hint(hint: &BaseUrl, owner: &str) {
    if !hint.value.is_empty() {
        warn_if_invalid(&hint.value, owner);
    }
}

fn warn_if_invalid(url: &str, owner: &str) {
    if !is_valid_base_url(url) {
        tracing::warn!(owner = %owner, url = %url, "Ignoring invalid base URL");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ApiConfig, EndpointConfig};

    fn endpoint(name: &str, method: &str) -> EndpointConfig {
        EndpointConfig {
            name: name.into(),
            method: method.into(),
            path: None,
            base_url: None,
            url_arg: None,
        }
    }

    #[test]
    fn test_valid_settings() {
        let mut settings = RoutingSettings::default();
        settings.base_urls.insert("svc".into(), "ftp://ignored.example.com".into());
        settings.apis.push(ApiConfig {
            name: "Api".into(),
            base_url: Some(BaseUrl::key("svc")),
            endpoints: vec![endpoint("get", "GET"), endpoint("post", "POST")],
        });

        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut settings = RoutingSettings::default();
        settings.base_urls.insert(String::new(), "https://example.com".into());
        settings.apis.push(ApiConfig {
            name: "Api".into(),
            base_url: None,
            endpoints: vec![endpoint("get", "GET"), endpoint("get", "GET"), endpoint("", "BAD METHOD")],
        });
        settings.apis.push(ApiConfig {
            name: String::new(),
            base_url: None,
            endpoints: Vec::new(),
        });

        let errors = validate_settings(&settings).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyBaseUrlKey,
                ValidationError::DuplicateEndpoint("Api::get".into()),
                ValidationError::EmptyEndpointName { api: "Api".into() },
                ValidationError::InvalidMethod {
                    endpoint: "Api::".into(),
                    method: "BAD METHOD".into(),
                },
                ValidationError::EmptyApiName,
            ]
        );
    }
}
