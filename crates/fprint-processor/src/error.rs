//! # Error Types
//!
//! Construction-time errors ([`ConfigError`], [`PipelineError`]) and the
//! execution-time [`FingerprintError`]. All messages are user-facing and
//! fixed; tests pin the exact text.
//!
//! - Configuration errors are never retryable: the configuration must change.
//! - Fingerprint errors are specific to one document. The processor stays
//!   usable and never retries internally.

use thiserror::Error;

use fprint_core::DocumentError;

/// Invalid processor configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No fields were configured and all-fields mode is off.
    #[error("[fields] can't be empty when 'concatenateAllFields' is false")]
    EmptyFields,

    /// The `method` value is not one of the known method names.
    #[error("[method] illegal method option [{value}]. valid values are [{valid}]")]
    IllegalMethod {
        /// The rejected value.
        value: String,
        /// Comma-separated valid names, in table order.
        valid: String,
    },

    /// A property holds a value of the wrong JSON type.
    #[error("[{property}] property isn't a {expected}, but of type [{actual}]")]
    WrongType {
        /// The property name.
        property: String,
        /// The expected type name.
        expected: &'static str,
        /// The actual type name.
        actual: &'static str,
    },

    /// A field path in the configuration is malformed.
    #[error("[{property}] {source}")]
    InvalidPath {
        /// The property holding the path.
        property: &'static str,
        /// Why the path was rejected.
        source: DocumentError,
    },

    /// Keys the processor does not understand were left in the configuration.
    #[error("processor [{processor_type}] doesn't support one or more provided configuration parameters [{keys}]")]
    UnsupportedParameters {
        /// The processor type.
        processor_type: &'static str,
        /// Comma-separated unsupported keys.
        keys: String,
    },
}

/// Failure to fingerprint a single document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    /// A source field could not be resolved, or the target could not be
    /// written.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// A source field is present but null or an empty string.
    #[error("field [{0}] is null, cannot generate fingerprint from it.")]
    NullField(String),
}

/// Invalid pipeline definition, or a processor failure while running one.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The definition is not a map.
    #[error("pipeline definition must be a map, found [{0}]")]
    NotAMap(&'static str),

    /// The `processors` key is absent.
    #[error("[processors] required property is missing")]
    MissingProcessors,

    /// A top-level pipeline property has the wrong type.
    #[error(transparent)]
    Property(ConfigError),

    /// A processor entry is not a single-key map.
    #[error("processor entry at position [{0}] must be a map with exactly one key")]
    MalformedEntry(usize),

    /// A processor type is not registered.
    #[error("No processor type exists with name [{0}]")]
    UnknownProcessorType(String),

    /// A processor rejected its configuration.
    #[error("processor at position [{index}]: {source}")]
    Config {
        /// Position of the processor in the pipeline.
        index: usize,
        /// The configuration failure.
        source: ConfigError,
    },

    /// A processor failed on a document.
    #[error("processor [{processor}] at position [{index}] failed: {source}")]
    Execution {
        /// Processor type, with `:tag` appended when tagged.
        processor: String,
        /// Position of the processor in the pipeline.
        index: usize,
        /// The document failure.
        source: FingerprintError,
    },
}
