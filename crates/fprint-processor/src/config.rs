//! # Processor Configuration Reader
//!
//! Wraps the raw configuration map handed to a processor. Each `take_*`
//! reader removes its key, so whatever remains after the processor has read
//! everything it understands is, by construction, unsupported.
//!
//! An explicit JSON `null` is treated the same as an absent key.

use serde_json::{Map, Value};

use fprint_core::value_type_name;

use crate::error::ConfigError;

/// A processor configuration map consumed key by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessorConfig {
    map: Map<String, Value>,
}

impl ProcessorConfig {
    /// Wrap a configuration map.
    pub fn new(map: Map<String, Value>) -> Self {
        Self { map }
    }

    /// Remove and return `key` as a string.
    pub fn take_string(&mut self, key: &str) -> Result<Option<String>, ConfigError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(wrong_type(key, "string", &other)),
        }
    }

    /// Remove and return `key` as a boolean.
    pub fn take_bool(&mut self, key: &str) -> Result<Option<bool>, ConfigError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(b)),
            Some(other) => Err(wrong_type(key, "boolean", &other)),
        }
    }

    /// Remove and return `key` as a list of strings.
    ///
    /// Every element must itself be a string; a non-string element is
    /// reported against `key`.
    pub fn take_string_list(&mut self, key: &str) -> Result<Option<Vec<String>>, ConfigError> {
        let items = match self.take(key) {
            None => return Ok(None),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(wrong_type(key, "list", &other)),
        };
        items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(wrong_type(key, "string", &other)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Keys not yet consumed, in map order.
    pub fn remaining_keys(&self) -> Vec<&str> {
        self.map.keys().map(String::as_str).collect()
    }

    /// Fail if any key was left unread.
    pub fn finish(self, processor_type: &'static str) -> Result<(), ConfigError> {
        if self.map.is_empty() {
            return Ok(());
        }
        Err(ConfigError::UnsupportedParameters {
            processor_type,
            keys: self.remaining_keys().join(", "),
        })
    }

    fn take(&mut self, key: &str) -> Option<Value> {
        match self.map.remove(key) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }
}

impl From<Map<String, Value>> for ProcessorConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self::new(map)
    }
}

fn wrong_type(key: &str, expected: &'static str, actual: &Value) -> ConfigError {
    ConfigError::WrongType {
        property: key.to_string(),
        expected,
        actual: value_type_name(actual),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: Value) -> ProcessorConfig {
        match value {
            Value::Object(map) => ProcessorConfig::new(map),
            other => panic!("test config must be an object, got {other}"),
        }
    }

    #[test]
    fn reads_and_consumes_keys() {
        let mut cfg = config(json!({
            "method": "SHA1",
            "base64_encode": true,
            "fields": ["b", "a"],
        }));
        assert_eq!(cfg.take_string("method").unwrap().as_deref(), Some("SHA1"));
        assert_eq!(cfg.take_bool("base64_encode").unwrap(), Some(true));
        assert_eq!(
            cfg.take_string_list("fields").unwrap(),
            Some(vec!["b".to_string(), "a".to_string()])
        );
        assert!(cfg.remaining_keys().is_empty());
        cfg.finish("fingerprint").unwrap();
    }

    #[test]
    fn absent_and_null_keys_read_as_none() {
        let mut cfg = config(json!({ "method": null }));
        assert_eq!(cfg.take_string("method").unwrap(), None);
        assert_eq!(cfg.take_bool("ignore_missing").unwrap(), None);
        assert_eq!(cfg.take_string_list("fields").unwrap(), None);
    }

    #[test]
    fn wrong_types_are_reported() {
        let mut cfg = config(json!({
            "method": 5,
            "base64_encode": "yes",
            "fields": "a",
        }));
        assert_eq!(
            cfg.take_string("method").unwrap_err().to_string(),
            "[method] property isn't a string, but of type [number]"
        );
        assert_eq!(
            cfg.take_bool("base64_encode").unwrap_err().to_string(),
            "[base64_encode] property isn't a boolean, but of type [string]"
        );
        assert_eq!(
            cfg.take_string_list("fields").unwrap_err().to_string(),
            "[fields] property isn't a list, but of type [string]"
        );
    }

    #[test]
    fn non_string_list_element_is_reported_against_key() {
        let mut cfg = config(json!({ "fields": ["a", true] }));
        assert_eq!(
            cfg.take_string_list("fields").unwrap_err().to_string(),
            "[fields] property isn't a string, but of type [boolean]"
        );
    }

    #[test]
    fn leftover_keys_are_unsupported() {
        let mut cfg = config(json!({ "fields": ["a"], "algorithm": "MD5", "salt": "x" }));
        cfg.take_string_list("fields").unwrap();
        assert_eq!(
            cfg.finish("fingerprint").unwrap_err().to_string(),
            "processor [fingerprint] doesn't support one or more provided configuration parameters [algorithm, salt]"
        );
    }
}
