//! Log levels.
//!
//! Levels are a view over `tracing::Level` with the two extra names log
//! configuration usually carries: `WARNING` and `CRITICAL`.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Severity of a log record, ordered from least to most severe.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug = 10,
    Info = 20,
    Warning = 30,
    Error = 40,
    Critical = 50,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Inverse of `level as u8`.
    pub(crate) fn from_repr(repr: u8) -> Option<Self> {
        [Level::Debug, Level::Info, Level::Warning, Level::Error, Level::Critical]
            .into_iter()
            .find(|level| *level as u8 == repr)
    }
}

impl From<tracing::Level> for Level {
    /// `TRACE` folds into `Debug`.
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warning,
            tracing::Level::ERROR => Level::Error,
            _ => Level::Debug,
        }
    }
}

impl From<Level> for tracing::Level {
    /// `Critical` has no tracing counterpart and maps to `ERROR`.
    fn from(level: Level) -> Self {
        match level {
            Level::Debug => tracing::Level::DEBUG,
            Level::Info => tracing::Level::INFO,
            Level::Warning => tracing::Level::WARN,
            Level::Error | Level::Critical => tracing::Level::ERROR,
        }
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    /// Accepts every name `tracing::Level` parses, plus `WARNING`,
    /// `CRITICAL` and `FATAL`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("warning") {
            return Ok(Level::Warning);
        }
        if name.eq_ignore_ascii_case("critical") || name.eq_ignore_ascii_case("fatal") {
            return Ok(Level::Critical);
        }
        name.parse::<tracing::Level>()
            .map(Level::from)
            .map_err(|_| ConfigError::Level(s.to_string()))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
