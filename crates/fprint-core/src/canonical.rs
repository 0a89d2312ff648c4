//! # Canonical Input — Fingerprint Byte Production
//!
//! Defines `CanonicalInput`, the sole construction path for the bytes a
//! fingerprint digest is computed over.
//!
//! ## Format
//!
//! The selected `(name, value)` pairs render as a map literal in iteration
//! order:
//!
//! ```text
//! {name1=value1, name2=value2}
//! ```
//!
//! Values render without quoting or escaping:
//!
//! 1. **Strings**: the raw text.
//! 2. **`null`**: `null`.
//! 3. **Booleans and numbers**: their JSON textual form.
//! 4. **Arrays**: `[a, b, c]`, elements rendered recursively.
//! 5. **Objects**: `{k1=v1, k2=v2}` in key order, values rendered recursively.
//!
//! This is the form every published fingerprint of the ingest fingerprint
//! processor was computed over. Because nothing is escaped, a value that
//! itself contains `", "` or `"="` can produce the same bytes as a different
//! field split. Published digests depend on the exact bytes, so the format
//! is kept as is.

use serde_json::Value;

/// Bytes produced exclusively by rendering selected document fields.
///
/// # Invariants
///
/// - The only constructors are [`CanonicalInput::from_fields()`] and
///   [`CanonicalInput::empty()`].
/// - Field pairs appear in exactly the order supplied by the caller.
/// - Object keys inside values appear in the map's key order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalInput(String);

impl CanonicalInput {
    /// Render `(name, value)` pairs into canonical input.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let mut out = String::from("{");
        for (i, (name, value)) in fields.into_iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(name);
            out.push('=');
            render_value(value, &mut out);
        }
        out.push('}');
        Self(out)
    }

    /// Canonical input with no fields, `{}`.
    pub fn empty() -> Self {
        Self("{}".to_string())
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// The canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty. An empty field
    /// selection still renders as `{}`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalInput {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Append the canonical rendering of `value` to `out`.
pub fn render_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_value(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(k);
                out.push('=');
                render_value(v, out);
            }
            out.push('}');
        }
    }
}

/// Render a single value to a new string.
pub fn value_to_string(value: &Value) -> String {
    let mut out = String::new();
    render_value(value, &mut out);
    out
}

/// Type name of a JSON value, as used in error messages.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_string_field() {
        let value = json!("test content");
        let input = CanonicalInput::from_fields([("_field", &value)]);
        assert_eq!(input.as_str(), "{_field=test content}");
        assert_eq!(input.as_bytes(), b"{_field=test content}");
    }

    #[test]
    fn multiple_fields_keep_caller_order() {
        let a = json!(1);
        let b = json!(true);
        let input = CanonicalInput::from_fields([("z", &a), ("a", &b)]);
        assert_eq!(input.as_str(), "{z=1, a=true}");
    }

    #[test]
    fn no_fields_renders_empty_map() {
        let input = CanonicalInput::from_fields(std::iter::empty::<(&str, &Value)>());
        assert_eq!(input, CanonicalInput::empty());
        assert_eq!(input.as_str(), "{}");
        assert!(!input.is_empty());
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn nested_values() {
        let value = json!({"b": [1, "x", null], "a": {"c": false}});
        assert_eq!(value_to_string(&value), "{a={c=false}, b=[1, x, null]}");
    }

    #[test]
    fn numbers_render_textually() {
        assert_eq!(value_to_string(&json!(-42)), "-42");
        assert_eq!(value_to_string(&json!(1.5)), "1.5");
        assert_eq!(value_to_string(&json!(9999999999i64)), "9999999999");
    }

    #[test]
    fn strings_are_not_quoted_or_escaped() {
        assert_eq!(value_to_string(&json!("a \"b\"\n")), "a \"b\"\n");
        assert_eq!(value_to_string(&json!("\u{00e9}")), "\u{00e9}");
    }

    #[test]
    fn field_boundaries_can_collide() {
        // `{a=1, b=2}` is reachable from one field whose value embeds the
        // separator; the format does not escape it.
        let one = json!(1);
        let two = json!(2);
        let split = CanonicalInput::from_fields([("a", &one), ("b", &two)]);
        let joined_value = json!("1, b=2");
        let joined = CanonicalInput::from_fields([("a", &joined_value)]);
        assert_eq!(split, joined);
    }

    #[test]
    fn type_names() {
        assert_eq!(value_type_name(&json!(null)), "null");
        assert_eq!(value_type_name(&json!("s")), "string");
        assert_eq!(value_type_name(&json!(1)), "number");
        assert_eq!(value_type_name(&json!(true)), "boolean");
        assert_eq!(value_type_name(&json!([])), "list");
        assert_eq!(value_type_name(&json!({})), "map");
    }
}
