//! Message rendering with live variable values.
//!
//! # Responsibilities
//! - Read every registered variable in the emitting context
//! - Drop unset and falsy values
//! - Render surviving pairs into the message, structured or compact
//! - Hand the rendered record to the engine logger
//!
//! # Rendering
//! ```text
//! structured: 'msg': 'A test message', 'static': '1'
//! compact:    {'static': 1} - A test message
//! compact, nothing set: A test message
//! ```

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::engine::{Kwargs, Level, Logger, Record};
use crate::error::HandlerError;
use crate::registry::VariableRegistry;
use crate::value::{self, Value};

/// Slot holding the registry shared by a context logger and its adapter.
pub type SharedRegistry = Arc<ArcSwap<VariableRegistry>>;

/// Merges live variable values into messages before emission.
#[derive(Debug, Clone)]
pub struct Adapter {
    logger: Arc<Logger>,
    registry: SharedRegistry,
    structured: bool,
}

impl Adapter {
    pub fn new(logger: Arc<Logger>, registry: SharedRegistry, structured: bool) -> Self {
        Self {
            logger,
            registry,
            structured,
        }
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn is_structured(&self) -> bool {
        self.structured
    }

    /// Render `msg` with the values visible in the current context.
    ///
    /// Kwargs are returned untouched.
    pub fn process(&self, msg: &str, kwargs: Kwargs) -> (String, Kwargs) {
        let values = self.registry.load().values();
        (self.format_msg(msg, &values), kwargs)
    }

    /// Render `msg` with the given pairs.
    pub fn format_msg(&self, msg: &str, values: &[(String, Value)]) -> String {
        if self.structured {
            let mut out = format!("'msg': '{msg}'");
            for (name, val) in values {
                out.push_str(&format!(", '{}': '{}'", name, value::display(val)));
            }
            out
        } else if values.is_empty() {
            msg.to_string()
        } else {
            format!("{} - {}", mapping_literal(values), msg)
        }
    }

    /// Render and emit one record at `level`.
    pub fn log(
        &self,
        level: Level,
        msg: &str,
        kwargs: Kwargs,
        exc_info: Option<String>,
    ) -> Result<(), HandlerError> {
        if !self.logger.is_enabled_for(level) {
            return Ok(());
        }

        let (message, kwargs) = self.process(msg, kwargs);
        let mut record = Record::new(self.logger.name(), level, message)
            .with_kwargs(kwargs)
            .with_extra(self.registry.load_full());
        record.exc_info = exc_info;

        self.logger.handle(&record)
    }
}

/// `{'name': literal, ...}` for the given pairs.
fn mapping_literal(values: &[(String, Value)]) -> String {
    let body = values
        .iter()
        .map(|(name, val)| format!("{}: {}", value::quote(name), value::literal(val)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{body}}}")
}
