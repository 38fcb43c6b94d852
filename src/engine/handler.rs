//! Record destinations.
//!
//! # Design Decisions
//! - Handlers return their own errors; the engine never swallows them
//! - `TracingHandler` bridges records into the `tracing` ecosystem and is the
//!   fallback for loggers without handlers; formatting and destinations are
//!   left to the installed `tracing` subscriber

use std::fmt;

use crate::engine::{Level, Record};
use crate::error::HandlerError;

/// A destination for log records.
pub trait Handler: Send + Sync + fmt::Debug {
    /// Deliver `record`.
    fn handle(&self, record: &Record) -> Result<(), HandlerError>;

    /// Minimum level this handler accepts.
    fn level(&self) -> Level {
        Level::Debug
    }
}

/// Emits each record as a `tracing` event.
///
/// The engine logger name goes in the `logger` field and kwargs are attached
/// as one JSON `kwargs` field. `Critical` maps to `ERROR` with
/// `critical = true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHandler;

macro_rules! emit {
    ($macro:ident, $record:ident, $kwargs:ident $(, $field:ident = $value:expr)*) => {
        tracing::$macro!(
            logger = %$record.logger,
            kwargs = %$kwargs,
            exc_info = $record.exc_info.as_deref(),
            $($field = $value,)*
            "{}",
            $record.message
        )
    };
}

impl Handler for TracingHandler {
    fn handle(&self, record: &Record) -> Result<(), HandlerError> {
        let kwargs = record.kwargs.to_json();
        match record.level {
            Level::Debug => emit!(debug, record, kwargs),
            Level::Info => emit!(info, record, kwargs),
            Level::Warning => emit!(warn, record, kwargs),
            Level::Error => emit!(error, record, kwargs),
            Level::Critical => emit!(error, record, kwargs, critical = true),
        }
        Ok(())
    }
}
