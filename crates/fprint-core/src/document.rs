//! # Documents
//!
//! The [`Document`] trait is the only view of a document the fingerprint
//! engine has: read a field by path, write a field by path, and enumerate
//! every field. [`IngestDocument`] is the in-memory implementation: a JSON
//! source object plus ingest metadata.
//!
//! ## Envelope form
//!
//! An `IngestDocument` serializes as the envelope used by the ingest
//! simulate API, metadata at the top level and the source under `_source`:
//!
//! ```json
//! {"_index": "logs", "_id": "1", "_source": {"message": "hello"}}
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::canonical::value_type_name;
use crate::error::DocumentError;
use crate::metadata::MetadataField;
use crate::path::FieldPath;

/// Key under which the envelope form stores the document source.
pub const SOURCE_KEY: &str = "_source";

/// Capabilities the fingerprint engine requires from a document.
pub trait Document {
    /// Resolve `path` to a value.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] when the path is malformed or any segment
    /// cannot be resolved.
    fn get_field(&self, path: &str) -> Result<&Value, DocumentError>;

    /// Write `value` at `path`, creating missing intermediate objects and
    /// overwriting any existing value.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] when a segment passes through a scalar
    /// or an invalid array index. The document is unchanged on error.
    fn set_field(&mut self, path: &str, value: Value) -> Result<(), DocumentError>;

    /// Every top-level field in the document's enumeration order, metadata
    /// included.
    fn all_fields(&self) -> Vec<(&str, &Value)>;

    /// True when `path` resolves to a value (which may be `null`).
    fn has_field(&self, path: &str) -> bool {
        self.get_field(path).is_ok()
    }
}

/// An ingest document: metadata plus a JSON source object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct IngestDocument {
    metadata: BTreeMap<MetadataField, Value>,
    source: Map<String, Value>,
}

impl IngestDocument {
    /// Create a document from its source with no metadata.
    pub fn new(source: Map<String, Value>) -> Self {
        Self {
            metadata: BTreeMap::new(),
            source,
        }
    }

    /// Builder-style metadata assignment.
    pub fn with_metadata(mut self, field: MetadataField, value: impl Into<Value>) -> Self {
        self.metadata.insert(field, value.into());
        self
    }

    /// Read a metadata field.
    pub fn metadata(&self, field: MetadataField) -> Option<&Value> {
        self.metadata.get(&field)
    }

    /// Set a metadata field, returning the previous value.
    pub fn set_metadata(&mut self, field: MetadataField, value: impl Into<Value>) -> Option<Value> {
        self.metadata.insert(field, value.into())
    }

    /// Remove a metadata field.
    pub fn remove_metadata(&mut self, field: MetadataField) -> Option<Value> {
        self.metadata.remove(&field)
    }

    /// The document source.
    pub fn source(&self) -> &Map<String, Value> {
        &self.source
    }

    /// Parse a document from its envelope form.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::InvalidEnvelope` when the value is not an
    /// object, `_source` is not an object, or an unknown top-level key is
    /// present.
    pub fn from_envelope(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Object(map) => Self::try_from(map),
            other => Err(DocumentError::InvalidEnvelope(format!(
                "expected an object, found [{}]",
                value_type_name(&other)
            ))),
        }
    }

    /// Render the document in envelope form.
    pub fn to_envelope(&self) -> Value {
        Value::Object(self.clone().into())
    }

    fn resolve(&self, path: &FieldPath) -> Result<&Value, DocumentError> {
        let segments = path.segments();
        let head = &segments[0];

        if path.is_top_level() {
            if let Some(field) = MetadataField::from_name(head) {
                return self.metadata.get(&field).ok_or_else(|| not_present(head, path));
            }
        }

        let mut current = self.source.get(head).ok_or_else(|| not_present(head, path))?;
        for segment in &segments[1..] {
            current = match current {
                Value::Object(map) => map.get(segment).ok_or_else(|| not_present(segment, path))?,
                Value::Array(items) => {
                    let index = path.index(segment)?;
                    items.get(index).ok_or_else(|| DocumentError::IndexOutOfBounds {
                        index,
                        len: items.len(),
                        path: path.to_string(),
                    })?
                }
                scalar => {
                    return Err(DocumentError::CannotResolve {
                        segment: segment.clone(),
                        parent_type: value_type_name(scalar),
                        path: path.to_string(),
                    })
                }
            };
        }
        Ok(current)
    }
}

impl Document for IngestDocument {
    fn get_field(&self, path: &str) -> Result<&Value, DocumentError> {
        let path = FieldPath::parse(path)?;
        self.resolve(&path)
    }

    fn set_field(&mut self, path: &str, value: Value) -> Result<(), DocumentError> {
        let path = FieldPath::parse(path)?;
        let segments = path.segments();
        let (head, rest) = (&segments[0], &segments[1..]);

        if rest.is_empty() {
            match MetadataField::from_name(head) {
                Some(field) => self.metadata.insert(field, value),
                None => self.source.insert(head.clone(), value),
            };
            return Ok(());
        }

        // An intermediate is only created once the walk has left existing
        // values, and everything below a created object is created too, so
        // a failure can only happen before the first insertion.
        let child = self
            .source
            .entry(head.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        assign(child, rest, &path, value)
    }

    fn all_fields(&self) -> Vec<(&str, &Value)> {
        self.metadata
            .iter()
            .map(|(field, value)| (field.as_str(), value))
            .chain(self.source.iter().map(|(k, v)| (k.as_str(), v)))
            .collect()
    }
}

fn assign(
    container: &mut Value,
    segments: &[String],
    path: &FieldPath,
    value: Value,
) -> Result<(), DocumentError> {
    let (head, rest) = (&segments[0], &segments[1..]);
    match container {
        Value::Object(map) => {
            if rest.is_empty() {
                map.insert(head.clone(), value);
                return Ok(());
            }
            let child = map
                .entry(head.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            assign(child, rest, path, value)
        }
        Value::Array(items) => {
            let index = path.index(head)?;
            let len = items.len();
            let slot = items
                .get_mut(index)
                .ok_or_else(|| DocumentError::IndexOutOfBounds {
                    index,
                    len,
                    path: path.to_string(),
                })?;
            if rest.is_empty() {
                *slot = value;
                Ok(())
            } else {
                assign(slot, rest, path, value)
            }
        }
        scalar => Err(DocumentError::NotAContainer {
            segment: head.clone(),
            parent_type: value_type_name(scalar),
            path: path.to_string(),
        }),
    }
}

fn not_present(segment: &str, path: &FieldPath) -> DocumentError {
    DocumentError::FieldNotPresent {
        segment: segment.to_string(),
        path: path.to_string(),
    }
}

impl TryFrom<Map<String, Value>> for IngestDocument {
    type Error = DocumentError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut doc = IngestDocument::default();
        for (key, value) in map {
            if key == SOURCE_KEY {
                match value {
                    Value::Object(source) => doc.source = source,
                    other => {
                        return Err(DocumentError::InvalidEnvelope(format!(
                            "[{SOURCE_KEY}] must be an object, found [{}]",
                            value_type_name(&other)
                        )))
                    }
                }
            } else if let Some(field) = MetadataField::from_name(&key) {
                doc.metadata.insert(field, value);
            } else {
                return Err(DocumentError::InvalidEnvelope(format!(
                    "unknown top-level key [{key}]"
                )));
            }
        }
        Ok(doc)
    }
}

impl From<IngestDocument> for Map<String, Value> {
    fn from(doc: IngestDocument) -> Self {
        let mut map: Map<String, Value> = doc
            .metadata
            .into_iter()
            .map(|(field, value)| (field.as_str().to_string(), value))
            .collect();
        map.insert(SOURCE_KEY.to_string(), Value::Object(doc.source));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(source: Value) -> IngestDocument {
        match source {
            Value::Object(map) => IngestDocument::new(map),
            _ => panic!("test source must be an object"),
        }
    }

    #[test]
    fn get_top_level_field() {
        let d = doc(json!({"_field": "test content"}));
        assert_eq!(d.get_field("_field").unwrap(), &json!("test content"));
    }

    #[test]
    fn get_missing_field() {
        let d = doc(json!({}));
        let err = d.get_field("_field").unwrap_err();
        assert_eq!(
            err.to_string(),
            "field [_field] not present as part of path [_field]"
        );
    }

    #[test]
    fn get_nested_missing_segment_names_segment() {
        let d = doc(json!({"a": {"b": 1}}));
        let err = d.get_field("a.c").unwrap_err();
        assert_eq!(err.to_string(), "field [c] not present as part of path [a.c]");
    }

    #[test]
    fn get_nested_and_indexed() {
        let d = doc(json!({"a": {"list": [{"x": 1}, {"x": 2}]}}));
        assert_eq!(d.get_field("a.list.1.x").unwrap(), &json!(2));
        assert!(matches!(
            d.get_field("a.list.5"),
            Err(DocumentError::IndexOutOfBounds { index: 5, len: 2, .. })
        ));
        assert!(matches!(
            d.get_field("a.list.x"),
            Err(DocumentError::NotAnIndex { .. })
        ));
    }

    #[test]
    fn get_through_scalar_fails() {
        let d = doc(json!({"a": "text"}));
        let err = d.get_field("a.b").unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot resolve [b] from object of type [string] as part of path [a.b]"
        );
    }

    #[test]
    fn null_value_is_present() {
        let d = doc(json!({"_field": null}));
        assert_eq!(d.get_field("_field").unwrap(), &Value::Null);
        assert!(d.has_field("_field"));
        assert!(!d.has_field("other"));
    }

    #[test]
    fn metadata_is_addressable_by_name() {
        let d = doc(json!({})).with_metadata(MetadataField::Id, "1");
        assert_eq!(d.get_field("_id").unwrap(), &json!("1"));
        assert!(d.get_field("_routing").is_err());
    }

    #[test]
    fn set_top_level_overwrites() {
        let mut d = doc(json!({"fingerprint": "old"}));
        d.set_field("fingerprint", json!("new")).unwrap();
        assert_eq!(d.source()["fingerprint"], json!("new"));
    }

    #[test]
    fn set_nested_creates_intermediates() {
        let mut d = doc(json!({}));
        d.set_field("meta.hash.value", json!("abc")).unwrap();
        assert_eq!(d.source()["meta"], json!({"hash": {"value": "abc"}}));
    }

    #[test]
    fn set_into_array_slot() {
        let mut d = doc(json!({"list": [1, 2]}));
        d.set_field("list.1", json!("x")).unwrap();
        assert_eq!(d.source()["list"], json!([1, "x"]));
        assert!(d.set_field("list.2", json!("y")).is_err());
    }

    #[test]
    fn set_through_scalar_leaves_document_untouched() {
        let mut d = doc(json!({"a": {"b": "text"}}));
        let before = d.clone();
        let err = d.set_field("a.b.c", json!(1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot set [c] with parent object of type [string] as part of path [a.b.c]"
        );
        assert_eq!(d, before);
    }

    #[test]
    fn set_metadata_by_name() {
        let mut d = doc(json!({}));
        d.set_field("_id", json!("42")).unwrap();
        assert_eq!(d.metadata(MetadataField::Id), Some(&json!("42")));
        assert!(d.source().is_empty());
    }

    #[test]
    fn all_fields_lists_metadata_first() {
        let d = doc(json!({"b": 2, "a": 1}))
            .with_metadata(MetadataField::Id, "7")
            .with_metadata(MetadataField::Index, "my_index");
        let names: Vec<&str> = d.all_fields().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["_index", "_id", "a", "b"]);
    }

    #[test]
    fn envelope_roundtrip() {
        let envelope = json!({"_index": "logs", "_id": "1", "_source": {"message": "hi"}});
        let d = IngestDocument::from_envelope(envelope.clone()).unwrap();
        assert_eq!(d.metadata(MetadataField::Index), Some(&json!("logs")));
        assert_eq!(d.get_field("message").unwrap(), &json!("hi"));
        assert_eq!(d.to_envelope(), envelope);
    }

    #[test]
    fn envelope_deserializes_through_serde() {
        let d: IngestDocument =
            serde_json::from_str(r#"{"_id": "9", "_source": {"x": 1}}"#).unwrap();
        assert_eq!(d.get_field("_id").unwrap(), &json!("9"));
        let text = serde_json::to_string(&d).unwrap();
        assert_eq!(text, r#"{"_id":"9","_source":{"x":1}}"#);
    }

    #[test]
    fn envelope_rejects_unknown_keys_and_bad_source() {
        let err = IngestDocument::from_envelope(json!({"message": "x"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid document envelope: unknown top-level key [message]"
        );
        assert!(IngestDocument::from_envelope(json!({"_source": [1]})).is_err());
        assert!(IngestDocument::from_envelope(json!("text")).is_err());
    }
}
