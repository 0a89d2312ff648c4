//! # Pipelines
//!
//! An ordered list of processors read from a definition of the form
//!
//! ```json
//! {
//!   "description": "dedup key",
//!   "processors": [
//!     { "fingerprint": { "tag": "dedup", "fields": ["user", "message"] } }
//!   ]
//! }
//! ```
//!
//! Each entry has exactly one key naming the processor type. The optional
//! `tag` key is consumed here and never reaches the processor's own
//! validation. `fingerprint` is the only registered type.

use serde_json::{Map, Value};

use fprint_core::{value_type_name, Document};

use crate::error::{ConfigError, PipelineError};
use crate::processor::FingerprintProcessor;

/// Key naming the processor list.
pub const PROCESSORS_KEY: &str = "processors";
/// Key holding the optional pipeline description.
pub const DESCRIPTION_KEY: &str = "description";
/// Key holding the optional processor tag inside a processor config.
pub const TAG_KEY: &str = "tag";

/// An ordered, immutable list of processors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    description: Option<String>,
    processors: Vec<FingerprintProcessor>,
}

impl Pipeline {
    /// Build a pipeline from an explicit processor list.
    pub fn new(description: Option<String>, processors: Vec<FingerprintProcessor>) -> Self {
        Self {
            description,
            processors,
        }
    }

    /// Read and validate a pipeline definition.
    pub fn from_value(value: Value) -> Result<Self, PipelineError> {
        let mut root = match value {
            Value::Object(map) => map,
            other => return Err(PipelineError::NotAMap(value_type_name(&other))),
        };

        let description = match root.remove(DESCRIPTION_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                return Err(PipelineError::Property(wrong_type(
                    DESCRIPTION_KEY,
                    "string",
                    &other,
                )))
            }
        };

        let entries = match root.remove(PROCESSORS_KEY) {
            None | Some(Value::Null) => return Err(PipelineError::MissingProcessors),
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(PipelineError::Property(wrong_type(
                    PROCESSORS_KEY,
                    "list",
                    &other,
                )))
            }
        };

        let processors = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| read_processor(index, entry))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(processors = processors.len(), "pipeline loaded");
        Ok(Self::new(description, processors))
    }

    /// The optional free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Processors in execution order.
    pub fn processors(&self) -> &[FingerprintProcessor] {
        &self.processors
    }

    /// Run every processor in order, stopping at the first failure.
    ///
    /// On failure the document is dropped; earlier processors may already
    /// have written to it.
    pub fn execute<D: Document>(&self, mut doc: D) -> Result<D, PipelineError> {
        for (index, processor) in self.processors.iter().enumerate() {
            processor
                .execute_in_place(&mut doc)
                .map_err(|source| PipelineError::Execution {
                    processor: processor.describe(),
                    index,
                    source,
                })?;
        }
        Ok(doc)
    }
}

fn read_processor(index: usize, entry: Value) -> Result<FingerprintProcessor, PipelineError> {
    let Value::Object(entry) = entry else {
        return Err(PipelineError::MalformedEntry(index));
    };
    if entry.len() != 1 {
        return Err(PipelineError::MalformedEntry(index));
    }
    let Some((processor_type, config)) = entry.into_iter().next() else {
        return Err(PipelineError::MalformedEntry(index));
    };
    if processor_type != FingerprintProcessor::TYPE {
        return Err(PipelineError::UnknownProcessorType(processor_type));
    }

    let mut config = match config {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(PipelineError::Config {
                index,
                source: wrong_type(&processor_type, "map", &other),
            })
        }
    };
    let tag = match config.remove(TAG_KEY) {
        None | Some(Value::Null) => None,
        Some(Value::String(tag)) => Some(tag),
        Some(other) => {
            return Err(PipelineError::Config {
                index,
                source: wrong_type(TAG_KEY, "string", &other),
            })
        }
    };

    FingerprintProcessor::from_config(tag.as_deref(), config)
        .map_err(|source| PipelineError::Config { index, source })
}

fn wrong_type(property: &str, expected: &'static str, actual: &Value) -> ConfigError {
    ConfigError::WrongType {
        property: property.to_string(),
        expected,
        actual: value_type_name(actual),
    }
}
