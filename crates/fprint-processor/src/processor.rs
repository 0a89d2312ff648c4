//! # Fingerprint Engine
//!
//! [`FingerprintProcessor`] applies a [`ProcessorDefinition`] to one document
//! at a time. Per document it:
//!
//! 1. selects `(name, value)` pairs, either the configured fields in
//!    lexicographic order or every field the document enumerates;
//! 2. renders them into a [`CanonicalInput`];
//! 3. digests the input with the configured method and encodes the result;
//! 4. writes the text into the target field.
//!
//! All fallible work happens before the single write, and a failed write
//! leaves the document unchanged, so a document is never partially updated.
//!
//! The processor holds no mutable state and is `Send + Sync`.

use serde_json::{Map, Value};

use fprint_core::{CanonicalInput, Document};
use fprint_crypto::Fingerprint;

use crate::config::ProcessorConfig;
use crate::definition::ProcessorDefinition;
use crate::error::{ConfigError, FingerprintError};

/// Computes a fingerprint over selected document fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintProcessor {
    tag: Option<String>,
    definition: ProcessorDefinition,
}

impl FingerprintProcessor {
    /// Processor type name used in pipeline definitions.
    pub const TYPE: &'static str = "fingerprint";

    /// Create an untagged processor from a validated definition.
    pub fn new(definition: ProcessorDefinition) -> Self {
        tracing::debug!(
            method = %definition.method(),
            target_field = definition.target_field(),
            fields = ?definition.fields(),
            concatenate_all_fields = definition.concatenate_all_fields(),
            "fingerprint processor created"
        );
        Self {
            tag: None,
            definition,
        }
    }

    /// Validate a raw configuration map and build a processor from it.
    pub fn from_config(
        tag: Option<&str>,
        config: Map<String, Value>,
    ) -> Result<Self, ConfigError> {
        let definition = ProcessorDefinition::from_config(Self::TYPE, ProcessorConfig::new(config))?;
        let processor = Self::new(definition);
        Ok(match tag {
            Some(tag) => processor.with_tag(tag),
            None => processor,
        })
    }

    /// Attach an instance tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// The instance tag, if any.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Always [`Self::TYPE`].
    pub fn processor_type(&self) -> &'static str {
        Self::TYPE
    }

    /// The type name, with `:tag` appended when tagged.
    pub fn describe(&self) -> String {
        match &self.tag {
            Some(tag) => format!("{}:{tag}", Self::TYPE),
            None => Self::TYPE.to_string(),
        }
    }

    /// The validated settings.
    pub fn definition(&self) -> &ProcessorDefinition {
        &self.definition
    }

    /// Compute the fingerprint of a document without modifying it.
    pub fn fingerprint<D: Document + ?Sized>(&self, doc: &D) -> Result<Fingerprint, FingerprintError> {
        let input = self.canonical_input(doc)?;
        Ok(self.definition.method().digest(&input))
    }

    /// Fingerprint a document and write the result into the target field.
    pub fn execute<D: Document>(&self, mut doc: D) -> Result<D, FingerprintError> {
        self.execute_in_place(&mut doc)?;
        Ok(doc)
    }

    /// As [`execute`](Self::execute), on a borrowed document.
    pub fn execute_in_place<D: Document + ?Sized>(&self, doc: &mut D) -> Result<(), FingerprintError> {
        let text = self
            .fingerprint(doc)?
            .encode(self.definition.base64_encode());
        tracing::debug!(
            tag = self.tag.as_deref().unwrap_or_default(),
            method = %self.definition.method(),
            target_field = self.definition.target_field(),
            "writing fingerprint"
        );
        doc.set_field(self.definition.target_field(), Value::String(text))?;
        Ok(())
    }

    fn canonical_input<D: Document + ?Sized>(&self, doc: &D) -> Result<CanonicalInput, FingerprintError> {
        if self.definition.concatenate_all_fields() {
            return Ok(CanonicalInput::from_fields(doc.all_fields()));
        }

        let ignore_missing = self.definition.ignore_missing();
        let mut selected = Vec::with_capacity(self.definition.fields().len());
        for field in self.definition.fields() {
            match doc.get_field(field) {
                Ok(value) if is_null_or_empty(value) => {
                    if !ignore_missing {
                        return Err(FingerprintError::NullField(field.clone()));
                    }
                    tracing::trace!(field = %field, "skipping null field");
                }
                Ok(value) => selected.push((field.as_str(), value)),
                Err(err) if ignore_missing => {
                    tracing::trace!(field = %field, error = %err, "skipping missing field");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(CanonicalInput::from_fields(selected))
    }
}

fn is_null_or_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
