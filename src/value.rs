//! Values carried by scoped variables and their textual forms.
//!
//! Two renderings are used when weaving values into a message:
//! - display form: strings unquoted, everything else as compact JSON
//! - literal form: strings single-quoted, everything else as compact JSON

pub use serde_json::Value;

/// Returns false for values treated as "unset" when rendering.
///
/// `null`, `false`, zero, the empty string and empty collections are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Short name of the value's kind, used in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Display form of a value.
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Literal form of a value, as it appears inside a mapping literal.
pub fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => quote(s),
        other => other.to_string(),
    }
}

/// Quotes `s` as a string literal.
///
/// Single quotes are used unless `s` contains `'` and no `"`. Backslashes,
/// the chosen quote character, `\n`, `\r` and `\t` are escaped.
pub fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_falsy_values() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&v), "{v} should be falsy");
        }
        for v in [json!(true), json!(1), json!(-2.5), json!("x"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&v), "{v} should be truthy");
        }
    }

    #[test]
    fn test_renderings() {
        assert_eq!(display(&json!("abc")), "abc");
        assert_eq!(display(&json!(1)), "1");
        assert_eq!(literal(&json!("abc")), "'abc'");
        assert_eq!(literal(&json!(1)), "1");
        assert_eq!(literal(&json!([1, "a"])), "[1,\"a\"]");
        assert_eq!(quote("it's"), "\"it's\"");
        assert_eq!(quote("it's \"x\""), "'it\\'s \"x\"'");
        assert_eq!(quote("a\nb"), "'a\\nb'");
    }
}
