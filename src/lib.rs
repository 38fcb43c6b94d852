//! Context logger: log messages enriched with context-scoped variables.
//!
//! Metadata such as request or tenant ids is set once, where it becomes
//! known, and shows up in every message logged further down the call graph
//! without being passed through function signatures.
//!
//! ```no_run
//! use clogger::{get_clogger, ScopedVariable};
//!
//! let clogger = get_clogger("api", None, false).unwrap();
//! clogger.set_clogvars(vec![
//!     ScopedVariable::with_setter("request_id", || uuid::Uuid::new_v4().to_string()),
//!     ScopedVariable::new("tenant"),
//! ]);
//!
//! clogger.set_var("request_id", None).unwrap();
//! clogger.set_var("tenant", serde_json::json!("acme")).unwrap();
//! clogger.info("handling request").unwrap();
//! // {'request_id': '…', 'tenant': 'acme'} - handling request
//! ```

// Core
pub mod adapter;
pub mod context;
pub mod logger;
pub mod registry;
pub mod variable;

// Supporting
pub mod config;
pub mod engine;
pub mod error;
pub mod observability;
pub mod setters;
pub mod value;

pub use adapter::Adapter;
pub use context::Context;
pub use engine::{Handler, Kwargs, Level, Record};
pub use error::{ConfigError, HandlerError, RegistryArgumentError, VariableSetError};
pub use logger::{get_clogger, ContextLogger};
pub use registry::VariableRegistry;
pub use value::Value;
pub use variable::{ScopedVariable, Setter};
