//! The context logger.
//!
//! # Data Flow
//! ```text
//! set_clogvars([ScopedVariable, ...])
//!     → VariableRegistry
//!     → atomic swap into the slot shared with the Adapter
//!
//! set_var(name, value)  → registry lookup → ScopedVariable::set (current context)
//! info(msg)             → Adapter::log → render with live values → engine Logger
//! ```
//!
//! # Design Decisions
//! - The registry slot is shared with the adapter, so values set after
//!   registration show up without re-registering
//! - Setting an unregistered variable is a silent no-op
//! - Level lives on the engine logger, which is shared by name process-wide

use std::sync::Arc;

use crate::adapter::{Adapter, SharedRegistry};
use crate::config::CloggerConfig;
use crate::engine::{self, Handler, Kwargs, Level, Logger};
use crate::error::{ConfigError, HandlerError, RegistryArgumentError, VariableSetError};
use crate::registry::VariableRegistry;
use crate::value::Value;
use crate::variable::ScopedVariable;

/// Default level of a new context logger.
pub const DEFAULT_LEVEL: Level = Level::Info;

/// Logger that enriches every message with the live values of its variables.
#[derive(Debug, Clone)]
pub struct ContextLogger {
    logger: Arc<Logger>,
    adapter: Adapter,
    clogvars: SharedRegistry,
}

macro_rules! level_methods {
    ($($(#[$doc:meta])* $name:ident, $with:ident => $level:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&self, msg: impl AsRef<str>) -> Result<(), HandlerError> {
                self.log($level, msg, Kwargs::new())
            }

            $(#[$doc])*
            ///
            /// `kwargs` are passed to handlers as given.
            pub fn $with(&self, msg: impl AsRef<str>, kwargs: Kwargs) -> Result<(), HandlerError> {
                self.log($level, msg, kwargs)
            }
        )*
    };
}

impl ContextLogger {
    /// Wrap the engine logger called `name` at [`DEFAULT_LEVEL`], compact mode,
    /// with an empty registry.
    pub fn new(name: &str) -> Self {
        let logger = engine::get_logger(name);
        logger.set_level(DEFAULT_LEVEL);
        let clogvars = SharedRegistry::default();
        let adapter = Adapter::new(logger.clone(), clogvars.clone(), false);
        Self {
            logger,
            adapter,
            clogvars,
        }
    }

    pub fn with_level(self, level: Level) -> Self {
        self.set_level(level);
        self
    }

    /// Select structured or compact rendering.
    pub fn with_structured(mut self, structured: bool) -> Self {
        self.adapter = Adapter::new(self.logger.clone(), self.clogvars.clone(), structured);
        self
    }

    /// Build a logger and its variables from configuration.
    pub fn from_config(config: &CloggerConfig) -> Result<Self, ConfigError> {
        let level: Level = config.level.parse()?;
        let clogger = Self::new(&config.name)
            .with_level(level)
            .with_structured(config.structured);
        clogger.set_clogvars(config.build_variables());
        Ok(clogger)
    }

    pub fn name(&self) -> &str {
        self.logger.name()
    }

    pub fn is_structured(&self) -> bool {
        self.adapter.is_structured()
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    /// Current registry.
    pub fn clogvars(&self) -> Arc<VariableRegistry> {
        self.clogvars.load_full()
    }

    /// Replace the registry with one built from `vars`.
    ///
    /// The previous mapping is discarded, not merged.
    pub fn set_clogvars(&self, vars: Vec<ScopedVariable>) {
        self.replace_clogvars(VariableRegistry::new(vars));
    }

    /// Replace the registry from a JSON array of variable descriptions.
    ///
    /// On error the current registry is kept.
    pub fn set_clogvars_json(&self, input: &Value) -> Result<(), RegistryArgumentError> {
        let registry = VariableRegistry::from_json(input)?;
        self.replace_clogvars(registry);
        Ok(())
    }

    fn replace_clogvars(&self, registry: VariableRegistry) {
        tracing::debug!(
            logger = %self.name(),
            variables = registry.len(),
            "Context variables replaced"
        );
        self.clogvars.store(Arc::new(registry));
    }

    /// Current value of the variable called `name`.
    pub fn get_var(&self, name: &str) -> Option<Value> {
        self.clogvars.load().get(name).and_then(ScopedVariable::get)
    }

    /// Set the variable called `name` in the current context.
    ///
    /// Returns the stored value, or `None` when no such variable is registered.
    pub fn set_var(
        &self,
        name: &str,
        value: impl Into<Option<Value>>,
    ) -> Result<Option<Value>, VariableSetError> {
        match self.clogvars.load().get(name) {
            Some(var) => var.set(value).map(Some),
            None => Ok(None),
        }
    }

    pub fn add_handler(&self, handler: Arc<dyn Handler>) {
        self.logger.add_handler(handler);
    }

    pub fn set_level(&self, level: Level) {
        self.logger.set_level(level);
    }

    pub fn level(&self) -> Level {
        self.logger.level()
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        self.logger.is_enabled_for(level)
    }

    /// Render `msg` and emit it at `level`.
    pub fn log(&self, level: Level, msg: impl AsRef<str>, kwargs: Kwargs) -> Result<(), HandlerError> {
        self.adapter.log(level, msg.as_ref(), kwargs, None)
    }

    level_methods! {
        /// Emit at `Debug`.
        debug, debug_with => Level::Debug;
        /// Emit at `Info`.
        info, info_with => Level::Info;
        /// Emit at `Warning`.
        warning, warning_with => Level::Warning;
        /// Emit at `Error`.
        error, error_with => Level::Error;
        /// Emit at `Critical`.
        critical, critical_with => Level::Critical;
    }

    /// Emit at `Error` with the chain of `err` attached to the record.
    pub fn exception(
        &self,
        msg: impl AsRef<str>,
        err: &(dyn std::error::Error + 'static),
    ) -> Result<(), HandlerError> {
        self.adapter
            .log(Level::Error, msg.as_ref(), Kwargs::new(), Some(error_chain(err)))
    }
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str("\nCaused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// Build a context logger wrapping the engine logger called `name`.
///
/// `level` defaults to `INFO`.
pub fn get_clogger(
    name: &str,
    level: Option<&str>,
    structured: bool,
) -> Result<ContextLogger, ConfigError> {
    let level = match level {
        Some(level) => level.parse()?,
        None => DEFAULT_LEVEL,
    };
    Ok(ContextLogger::new(name)
        .with_level(level)
        .with_structured(structured))
}
