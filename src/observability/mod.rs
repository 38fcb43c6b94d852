//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! ContextLogger → engine Logger → TracingHandler
//!     → tracing events (logger, kwargs, rendered message)
//!     → subscriber installed by init() (fmt layer, EnvFilter)
//! ```
//!
//! # Design Decisions
//! - Filter comes from `RUST_LOG`, falling back to the caller's default
//! - Installing twice is a no-op so libraries and tests can both call it

pub mod tracing;

pub use self::tracing::{init, try_init};
