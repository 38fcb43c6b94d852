//! Error types surfaced to callers.
//!
//! Every failure is raised synchronously at the call that caused it and is
//! never caught inside the crate. Handler failures are not wrapped: they are
//! returned as the opaque [`HandlerError`] the handler produced.

use thiserror::Error;

/// Error returned by a [`Handler`](crate::engine::Handler), passed through unchanged.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by [`ScopedVariable::set`](crate::ScopedVariable::set).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableSetError {
    /// Neither a value nor a setter was available.
    #[error("nothing to set for variable '{name}': no value given and no setter configured")]
    NothingToSet { name: String },

    /// A setter was configured but cannot be invoked.
    #[error("setter for variable '{name}' should be callable, not {found}")]
    SetterNotCallable { name: String, found: String },
}

/// Errors raised when a registry is built from dynamic input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryArgumentError {
    /// The input was not a sequence.
    #[error("variables should be a list of scoped variables, not {found}")]
    NotASequence { found: String },

    /// An element of the input was not a scoped variable.
    #[error("item {index} should be a scoped variable, not {found}")]
    NotAVariable { index: usize, found: String },
}

/// Errors raised while building a logger from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid log level '{0}'")]
    Level(String),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<crate::config::validation::ValidationError>),

    #[error(transparent)]
    Registry(#[from] RegistryArgumentError),
}

fn join(errors: &[crate::config::validation::ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
