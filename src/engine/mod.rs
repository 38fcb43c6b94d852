//! Leveled logging engine wrapped by the context logger.
//!
//! # Data Flow
//! ```text
//! ContextLogger / Adapter
//!     → Logger::handle(Record)      (level check)
//!     → Handler::handle(Record)     (each handler at or below record level)
//!         → TracingHandler          (tracing events, default)
//! ```
//!
//! # Design Decisions
//! - Engine loggers are shared process-wide by name
//! - Handler errors are returned to the caller unchanged

pub mod handler;
pub mod level;
pub mod logger;
pub mod record;

pub use handler::{Handler, TracingHandler};
pub use level::Level;
pub use logger::{get_logger, logger_names, Logger};
pub use record::{Kwargs, Record};
