//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! routing file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RoutingSettings
//!     → apply_settings() pushes switch, fallback and table into RoutingConfig
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new settings
//!     → validation.rs validates
//!     → apply_settings() updates the live RoutingConfig
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal files
//! - A failed reload keeps the current state
//! - Endpoint declarations are read at startup only; reloads touch runtime state

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_settings, parse_settings, ConfigError};
pub use schema::{ApiConfig, EndpointConfig, ObservabilityConfig, RoutingSettings};

use crate::routing::RoutingConfig;

/// Push the runtime parts of `settings` into `config`.
pub fn apply_settings(config: &RoutingConfig, settings: &RoutingSettings) {
    config.base_urls().replace_all(&settings.base_urls);
    config.set_global_base_url(settings.global_base_url.clone());
    config.set_enabled(settings.enabled);

    tracing::info!(
        enabled = settings.enabled,
        global_base_url = ?settings.global_base_url,
        base_urls = settings.base_urls.len(),
        "Routing settings applied"
    );
}
