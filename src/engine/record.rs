//! Log records handed to handlers.

use std::sync::Arc;

use serde_json::Map;

use crate::engine::Level;
use crate::registry::VariableRegistry;
use crate::value::Value;

/// Free-form key/value arguments attached to a log call.
///
/// Passed to handlers untouched; the adapter never rewrites them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kwargs(Vec<(String, Value)>);

impl Kwargs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Kwargs as a JSON object. Later duplicates win.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self.0.iter().cloned().collect();
        Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Kwargs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A single log event after message rendering.
#[derive(Debug, Clone)]
pub struct Record {
    /// Name of the engine logger that produced the record.
    pub logger: String,
    pub level: Level,
    /// Rendered message.
    pub message: String,
    pub kwargs: Kwargs,
    /// Live variable registry of the emitting context logger, for handlers
    /// that want raw access to the variables.
    pub extra: Option<Arc<VariableRegistry>>,
    /// Error chain attached by `exception` calls.
    pub exc_info: Option<String>,
}

impl Record {
    pub fn new(logger: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            logger: logger.into(),
            level,
            message: message.into(),
            kwargs: Kwargs::new(),
            extra: None,
            exc_info: None,
        }
    }

    pub fn with_kwargs(mut self, kwargs: Kwargs) -> Self {
        self.kwargs = kwargs;
        self
    }

    pub fn with_extra(mut self, extra: Arc<VariableRegistry>) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn with_exc_info(mut self, exc_info: impl Into<String>) -> Self {
        self.exc_info = Some(exc_info.into());
        self
    }
}
