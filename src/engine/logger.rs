//! Named engine loggers and the process-wide logger registry.
//!
//! # Design Decisions
//! - Loggers are process-wide: looking a name up twice returns the same
//!   instance, created on first lookup and never torn down
//! - Level is an atomic so it can be changed through any shared handle
//! - A logger without handlers falls back to `TracingHandler`

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, LazyLock, RwLock};

use dashmap::DashMap;

use crate::engine::{Handler, Level, Record, TracingHandler};
use crate::error::HandlerError;

static LOGGERS: LazyLock<DashMap<String, Arc<Logger>>> = LazyLock::new(DashMap::new);

/// Return the process-wide logger called `name`, creating it on first use.
pub fn get_logger(name: &str) -> Arc<Logger> {
    LOGGERS
        .entry(name.to_string())
        .or_insert_with(|| Arc::new(Logger::new(name)))
        .value()
        .clone()
}

/// Names of every logger created so far.
pub fn logger_names() -> Vec<String> {
    LOGGERS.iter().map(|r| r.key().clone()).collect()
}

/// A named, leveled logger dispatching records to its handlers.
#[derive(Debug)]
pub struct Logger {
    name: String,
    level: AtomicU8,
    handlers: RwLock<Vec<Arc<dyn Handler>>>,
}

impl Logger {
    /// New loggers start at `Warning`, like an unconfigured logger.
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: AtomicU8::new(Level::Warning as u8),
            handlers: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        Level::from_repr(self.level.load(Ordering::Relaxed)).unwrap_or(Level::Warning)
    }

    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.level()
    }

    pub fn add_handler(&self, handler: Arc<dyn Handler>) {
        self.handlers
            .write()
            .expect("logger handlers lock poisoned")
            .push(handler);
    }

    pub fn handlers(&self) -> Vec<Arc<dyn Handler>> {
        self.handlers
            .read()
            .expect("logger handlers lock poisoned")
            .clone()
    }

    /// Dispatch `record` to every handler accepting its level.
    ///
    /// Records below the logger level are dropped. The first handler error
    /// is returned as is and stops dispatch.
    pub fn handle(&self, record: &Record) -> Result<(), HandlerError> {
        if !self.is_enabled_for(record.level) {
            return Ok(());
        }

        let handlers = self.handlers();
        if handlers.is_empty() {
            return TracingHandler.handle(record);
        }

        for handler in handlers.iter().filter(|h| record.level >= h.level()) {
            handler.handle(record)?;
        }
        Ok(())
    }
}
