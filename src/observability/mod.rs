//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing + http layer produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters per routing outcome)
//! ```
//!
//! # Design Decisions
//! - Routing decisions are logged at debug level; config problems at warn
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
