//! Named context-scoped variables.
//!
//! A [`ScopedVariable`] is a handle: clones refer to the same variable and
//! observe the same value in a given context. The value itself lives in the
//! current [`Context`](crate::context::Context), so two concurrent requests
//! setting `request_id` never see each other's value.

use std::fmt;
use std::sync::Arc;

use crate::context::{self, VarKey};
use crate::error::VariableSetError;
use crate::value::{is_truthy, Value};

/// Deferred initializer of a [`ScopedVariable`].
#[derive(Clone)]
pub enum Setter {
    /// A zero-argument function producing the value.
    Callable(Arc<dyn Fn() -> Value + Send + Sync>),
    /// A setter that was supplied through a dynamic entry point but cannot be
    /// invoked. `found` names what was supplied instead.
    NotCallable { found: String },
}

impl Setter {
    pub fn new<F, T>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Into<Value>,
    {
        Setter::Callable(Arc::new(move || f().into()))
    }
}

impl fmt::Debug for Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setter::Callable(_) => f.write_str("Setter::Callable"),
            Setter::NotCallable { found } => write!(f, "Setter::NotCallable({found})"),
        }
    }
}

/// A named variable whose value is scoped to the current execution context.
#[derive(Debug, Clone)]
pub struct ScopedVariable {
    name: Arc<str>,
    setter: Option<Setter>,
    key: VarKey,
}

impl ScopedVariable {
    /// Create a variable without a setter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().into(),
            setter: None,
            key: VarKey::next(),
        }
    }

    /// Create a variable whose value can be produced on demand by `setter`.
    pub fn with_setter<F, T>(name: impl Into<String>, setter: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Into<Value>,
    {
        Self::from_setter(name, Setter::new(setter))
    }

    pub fn from_setter(name: impl Into<String>, setter: Setter) -> Self {
        Self {
            setter: Some(setter),
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn setter(&self) -> Option<&Setter> {
        self.setter.as_ref()
    }

    /// Set the value in the current context and return it.
    ///
    /// A truthy `value` is stored as given. Otherwise the setter is invoked and
    /// its result stored. Fails when there is neither.
    pub fn set(&self, value: impl Into<Option<Value>>) -> Result<Value, VariableSetError> {
        if let Some(value) = value.into().filter(is_truthy) {
            context::write(self.key, value.clone());
            return Ok(value);
        }

        match &self.setter {
            Some(Setter::Callable(f)) => {
                let value = f();
                context::write(self.key, value.clone());
                Ok(value)
            }
            Some(Setter::NotCallable { found }) => Err(VariableSetError::SetterNotCallable {
                name: self.name.to_string(),
                found: found.clone(),
            }),
            None => Err(VariableSetError::NothingToSet {
                name: self.name.to_string(),
            }),
        }
    }

    /// Value visible in the current context, if any.
    pub fn get(&self) -> Option<Value> {
        context::read(self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use serde_json::json;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn test_set_value() {
        let var = ScopedVariable::new("static");
        assert_eq!(var.get(), None);

        assert_eq!(var.set(json!(1)).unwrap(), json!(1));
        assert_eq!(var.get(), Some(json!(1)));
        assert_eq!(var.get(), var.get());
    }

    #[test]
    fn test_set_without_value_or_setter_fails() {
        let var = ScopedVariable::new("static");
        let err = var.set(None).unwrap_err();
        assert_eq!(err, VariableSetError::NothingToSet { name: "static".into() });
        assert_eq!(var.get(), None);
    }

    #[test]
    fn test_falsy_value_falls_back_to_setter() {
        let var = ScopedVariable::with_setter("request_id", || "generated");
        assert_eq!(var.set(json!(0)).unwrap(), json!("generated"));

        let bare = ScopedVariable::new("static");
        assert!(bare.set(json!("")).is_err());
    }

    #[test]
    fn test_setter_is_reinvoked() {
        let counter = Arc::new(AtomicU64::new(0));
        let c = counter.clone();
        let var = ScopedVariable::with_setter("seq", move || c.fetch_add(1, Ordering::SeqCst) + 1);

        assert_eq!(var.set(None).unwrap(), json!(1));
        assert_eq!(var.get(), Some(json!(1)));
        assert_eq!(var.set(None).unwrap(), json!(2));
        assert_eq!(var.get(), Some(json!(2)));
    }

    #[test]
    fn test_not_callable_setter_is_not_invoked() {
        let var = ScopedVariable::from_setter(
            "request_id",
            Setter::NotCallable { found: "number".into() },
        );
        assert!(matches!(
            var.set(None),
            Err(VariableSetError::SetterNotCallable { .. })
        ));
        assert_eq!(var.get(), None);
    }

    #[test]
    fn test_clone_shares_identity() {
        let var = ScopedVariable::new("tenant");
        let handle = var.clone();
        var.set(json!("acme")).unwrap();
        assert_eq!(handle.get(), Some(json!("acme")));

        let other = ScopedVariable::new("tenant");
        assert_eq!(other.get(), None);
    }

    #[test]
    fn test_sibling_context_sees_nothing() {
        let var = ScopedVariable::new("tenant");
        let sibling = Context::new();
        var.set(json!("acme")).unwrap();
        assert_eq!(sibling.run(|| var.get()), None);
    }
}
