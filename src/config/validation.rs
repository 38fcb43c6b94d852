//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the level parses
//! - Reject empty and duplicate variable names
//! - Reject unknown setter names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CloggerConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::CloggerConfig;
use crate::engine::Level;
use crate::setters;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("logger name must not be empty")]
    EmptyLoggerName,

    #[error("invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("variable {index} has an empty name")]
    EmptyVariableName { index: usize },

    #[error("duplicate variable name '{0}'")]
    DuplicateVariable(String),

    #[error("unknown setter '{setter}' for variable '{variable}'")]
    UnknownSetter { variable: String, setter: String },
}

/// Validate `config`, collecting every problem found.
pub fn validate_config(config: &CloggerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.name.trim().is_empty() {
        errors.push(ValidationError::EmptyLoggerName);
    }

    if config.level.parse::<Level>().is_err() {
        errors.push(ValidationError::InvalidLevel(config.level.clone()));
    }

    let mut seen = HashSet::new();
    for (index, var) in config.variables.iter().enumerate() {
        if var.name.trim().is_empty() {
            errors.push(ValidationError::EmptyVariableName { index });
            continue;
        }
        if !seen.insert(var.name.as_str()) {
            errors.push(ValidationError::DuplicateVariable(var.name.clone()));
        }
        if let Some(setter) = &var.setter {
            if setters::builtin(setter).is_none() {
                errors.push(ValidationError::UnknownSetter {
                    variable: var.name.clone(),
                    setter: setter.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
