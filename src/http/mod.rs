//! HTTP client integration.
//!
//! # Data Flow
//! ```text
//! ApiClient::call(endpoint, arguments)
//!     → client.rs (build URL, tag request with Invocation)
//!     → layer.rs (tower Layer/Service around the transport)
//!     → interceptor.rs (switch, metadata, resolve, rewrite)
//!     → hyper-util client (transport)
//! ```

pub mod client;
pub mod interceptor;
pub mod layer;

pub use client::{ApiClient, ClientError};
pub use interceptor::{BaseUrlsInterceptor, Intercepted};
pub use layer::{BaseUrlsLayer, BaseUrlsService};
