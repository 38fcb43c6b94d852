//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

use crate::setters;
use crate::variable::{ScopedVariable, Setter};

/// Root configuration for a context logger.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CloggerConfig {
    /// Engine logger name.
    pub name: String,

    /// Log level (debug, info, warning, error, critical).
    pub level: String,

    /// Render variables as explicit key/value pairs.
    pub structured: bool,

    /// Context variables, in rendering order.
    pub variables: Vec<VariableConfig>,
}

impl Default for CloggerConfig {
    fn default() -> Self {
        Self {
            name: "root".to_string(),
            level: "INFO".to_string(),
            structured: false,
            variables: Vec::new(),
        }
    }
}

/// A single context variable.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VariableConfig {
    /// Variable name, unique within the logger.
    pub name: String,

    /// Built-in setter used when the variable is set without a value.
    #[serde(default)]
    pub setter: Option<String>,
}

impl CloggerConfig {
    /// Build the configured variables.
    ///
    /// An unknown setter name yields a variable whose `set` fails; validation
    /// reports it earlier.
    pub fn build_variables(&self) -> Vec<ScopedVariable> {
        self.variables.iter().map(VariableConfig::build).collect()
    }
}

impl VariableConfig {
    pub fn build(&self) -> ScopedVariable {
        match &self.setter {
            None => ScopedVariable::new(&self.name),
            Some(name) => match setters::builtin(name) {
                Some(setter) => ScopedVariable::from_setter(&self.name, setter),
                None => ScopedVariable::from_setter(
                    &self.name,
                    Setter::NotCallable {
                        found: format!("unknown setter '{name}'"),
                    },
                ),
            },
        }
    }
}
