//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing request tagged with an Invocation (endpoint + arguments)
//!     → cache.rs (endpoint metadata, extracted once per endpoint)
//!     → resolver.rs (priority ladder over arguments, dynamic table,
//!                    declared base URL, global fallback)
//!     → rewriter.rs (rebase request URL onto the chosen base URL)
//!     → Return: rewritten URL or untouched request
//!
//! Declarations (at setup):
//!     endpoint.rs (Api / EndpointBuilder / BaseUrl)
//!     → Arc<Endpoint> shared by every call
//! ```
//!
//! # Design Decisions
//! - Decision logic is synchronous and allocation-light
//! - Malformed URLs degrade to "absent", never to an error
//! - Shared state lives in `RoutingConfig`, not in globals

pub mod cache;
pub mod endpoint;
pub mod resolver;
pub mod rewriter;
pub mod state;
pub mod url;

pub use cache::{EndpointRoutingMetadata, MetadataSource, ResolutionCache};
pub use endpoint::{Api, BaseUrl, Endpoint, EndpointBuilder, EndpointId, Invocation};
pub use resolver::{resolve, BaseUrlSource, Resolution, ResolvedBaseUrl};
pub use rewriter::rewrite;
pub use state::{DynamicBaseUrls, RoutingConfig};
