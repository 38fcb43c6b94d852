//! Built-in setters available to configuration and dynamic registries.

use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::value::Value;
use crate::variable::Setter;

/// Names accepted by [`builtin`].
pub const BUILTIN_NAMES: &[&str] = &["uuid4", "unix_time", "thread_name"];

/// Look up a built-in setter by name.
pub fn builtin(name: &str) -> Option<Setter> {
    match name {
        "uuid4" => Some(Setter::new(|| Uuid::new_v4().to_string())),
        "unix_time" => Some(Setter::new(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs()
        })),
        "thread_name" => Some(Setter::new(|| {
            std::thread::current()
                .name()
                .map(Value::from)
                .unwrap_or(Value::Null)
        })),
        _ => None,
    }
}
