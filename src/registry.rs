//! Ordered, name-keyed collection of scoped variables.
//!
//! # Design Decisions
//! - Built from an ordered list; iteration follows first-appearance order
//! - A later variable sharing a name replaces the earlier one in place
//! - The static constructor takes `ScopedVariable`s only, so the element type
//!   check happens at compile time; `from_json` is the dynamic entry point and
//!   the only place a `RegistryArgumentError` can come from

use crate::error::RegistryArgumentError;
use crate::setters;
use crate::value::{self, Value};
use crate::variable::{ScopedVariable, Setter};

/// Mapping from variable name to [`ScopedVariable`].
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    entries: Vec<ScopedVariable>,
}

impl VariableRegistry {
    pub fn new(vars: impl IntoIterator<Item = ScopedVariable>) -> Self {
        let mut entries: Vec<ScopedVariable> = Vec::new();
        for var in vars {
            match entries.iter_mut().find(|e| e.name() == var.name()) {
                Some(slot) => *slot = var,
                None => entries.push(var),
            }
        }
        Self { entries }
    }

    /// Build a registry from a JSON array of variable descriptions.
    ///
    /// Each element is an object with a string `name` and an optional `setter`
    /// naming a built-in setter. A setter of any other shape yields a variable
    /// whose `set` fails with `SetterNotCallable`.
    pub fn from_json(input: &Value) -> Result<Self, RegistryArgumentError> {
        let items = input
            .as_array()
            .ok_or_else(|| RegistryArgumentError::NotASequence {
                found: value::type_name(input).to_string(),
            })?;

        let mut vars = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let name = item
                .as_object()
                .and_then(|o| o.get("name"))
                .and_then(Value::as_str)
                .ok_or_else(|| RegistryArgumentError::NotAVariable {
                    index,
                    found: value::type_name(item).to_string(),
                })?;

            let var = match item.get("setter") {
                None | Some(Value::Null) => ScopedVariable::new(name),
                Some(Value::String(setter)) => match setters::builtin(setter) {
                    Some(s) => ScopedVariable::from_setter(name, s),
                    None => ScopedVariable::from_setter(
                        name,
                        Setter::NotCallable {
                            found: format!("unknown setter '{setter}'"),
                        },
                    ),
                },
                Some(other) => ScopedVariable::from_setter(
                    name,
                    Setter::NotCallable {
                        found: value::type_name(other).to_string(),
                    },
                ),
            };
            vars.push(var);
        }

        Ok(Self::new(vars))
    }

    /// Variable registered under `name`.
    pub fn get(&self, name: &str) -> Option<&ScopedVariable> {
        self.entries.iter().find(|v| v.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScopedVariable> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(ScopedVariable::name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live values in the current context, in registry order.
    ///
    /// Unset and falsy values are left out.
    pub fn values(&self) -> Vec<(String, Value)> {
        self.entries
            .iter()
            .filter_map(|var| {
                var.get()
                    .filter(value::is_truthy)
                    .map(|v| (var.name().to_string(), v))
            })
            .collect()
    }
}

impl FromIterator<ScopedVariable> for VariableRegistry {
    fn from_iter<I: IntoIterator<Item = ScopedVariable>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_registered_variable() {
        let var = ScopedVariable::new("static");
        let registry = VariableRegistry::new(vec![var.clone()]);

        let found = registry.get("static").unwrap();
        found.set(json!(1)).unwrap();
        assert_eq!(var.get(), Some(json!(1)));
        assert!(registry.get("UNKNOWN").is_none());
    }

    #[test]
    fn test_duplicate_names_keep_last_in_first_position() {
        let first = ScopedVariable::new("a");
        let b = ScopedVariable::new("b");
        let second = ScopedVariable::new("a");
        second.set(json!("second")).unwrap();

        let registry = VariableRegistry::new(vec![first, b, second]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(registry.get("a").unwrap().get(), Some(json!("second")));
    }

    #[test]
    fn test_values_skip_unset_and_falsy() {
        let a = ScopedVariable::new("a");
        let b = ScopedVariable::new("b");
        let c = ScopedVariable::new("c");
        let registry: VariableRegistry = vec![a.clone(), b, c.clone()].into_iter().collect();

        c.set(json!("x")).unwrap();
        a.set(json!(2)).unwrap();

        assert_eq!(
            registry.values(),
            vec![("a".to_string(), json!(2)), ("c".to_string(), json!("x"))]
        );
    }

    #[test]
    fn test_from_json_rejects_non_list() {
        let err = VariableRegistry::from_json(&json!("Not a list")).unwrap_err();
        assert_eq!(err, RegistryArgumentError::NotASequence { found: "string".into() });
    }

    #[test]
    fn test_from_json_rejects_non_variable_items() {
        let err = VariableRegistry::from_json(&json!(["Not a variable"])).unwrap_err();
        assert_eq!(
            err,
            RegistryArgumentError::NotAVariable { index: 0, found: "string".into() }
        );

        let err = VariableRegistry::from_json(&json!([{"name": "ok"}, {"name": 3}])).unwrap_err();
        assert!(matches!(err, RegistryArgumentError::NotAVariable { index: 1, .. }));
    }

    #[test]
    fn test_from_json_setters() {
        let registry = VariableRegistry::from_json(&json!([
            {"name": "static"},
            {"name": "request_id", "setter": "uuid4"},
            {"name": "broken", "setter": 1},
        ]))
        .unwrap();

        assert_eq!(registry.len(), 3);
        assert!(registry.get("static").unwrap().setter().is_none());
        assert!(registry.get("request_id").unwrap().set(None).is_ok());
        assert!(registry.get("broken").unwrap().set(None).is_err());
    }
}
