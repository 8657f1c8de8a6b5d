//! Multiple base URLs for HTTP clients.
//!
//! Rebases outgoing requests onto a base URL chosen per call from, in order:
//! an explicit URL argument, a dynamic key/value table (endpoint key, then API
//! key), a declared static base URL and a global fallback.

pub mod config;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::RoutingSettings;
pub use http::{ApiClient, BaseUrlsLayer};
pub use routing::{Api, BaseUrl, RoutingConfig};
