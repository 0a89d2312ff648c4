//! # Processor Definition
//!
//! The immutable, validated form of a fingerprint processor's configuration.
//! A [`ProcessorDefinition`] can only be obtained through validation, either
//! from a raw configuration map ([`ProcessorDefinition::from_config`]) or
//! from the typed [`DefinitionBuilder`]. Both paths enforce the same rules:
//!
//! - `fields` is deduplicated and iterated in lexicographic order.
//! - `fields` may be empty only in all-fields mode; in all-fields mode it is
//!   always empty.
//! - Every configured path is well-formed.

use std::collections::BTreeSet;

use serde::Serialize;

use fprint_core::FieldPath;
use fprint_crypto::DigestMethod;

use crate::config::ProcessorConfig;
use crate::error::ConfigError;

/// Default field the fingerprint is written to.
pub const DEFAULT_TARGET_FIELD: &str = "fingerprint";

/// Configuration keys understood by the fingerprint processor.
pub mod keys {
    pub const FIELDS: &str = "fields";
    pub const TARGET_FIELD: &str = "target_field";
    pub const METHOD: &str = "method";
    pub const BASE64_ENCODE: &str = "base64_encode";
    pub const CONCATENATE_ALL_FIELDS: &str = "concatenate_all_fields";
    pub const IGNORE_MISSING: &str = "ignore_missing";
}

/// Validated fingerprint processor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessorDefinition {
    fields: BTreeSet<String>,
    target_field: String,
    method: DigestMethod,
    base64_encode: bool,
    concatenate_all_fields: bool,
    ignore_missing: bool,
}

impl ProcessorDefinition {
    /// Start a typed builder with every setting at its default.
    pub fn builder() -> DefinitionBuilder {
        DefinitionBuilder::default()
    }

    /// Validate a raw configuration map.
    ///
    /// Consumes the keys it understands and rejects anything left over.
    pub fn from_config(
        processor_type: &'static str,
        mut config: ProcessorConfig,
    ) -> Result<Self, ConfigError> {
        let fields = config.take_string_list(keys::FIELDS)?.unwrap_or_default();
        let target_field = config.take_string(keys::TARGET_FIELD)?;
        let method = match config.take_string(keys::METHOD)? {
            Some(name) => Some(parse_method(&name)?),
            None => None,
        };
        let base64_encode = config.take_bool(keys::BASE64_ENCODE)?;
        let concatenate_all_fields = config.take_bool(keys::CONCATENATE_ALL_FIELDS)?;
        let ignore_missing = config.take_bool(keys::IGNORE_MISSING)?;
        config.finish(processor_type)?;

        let mut builder = DefinitionBuilder::default().fields(fields);
        if let Some(target) = target_field {
            builder = builder.target_field(target);
        }
        if let Some(method) = method {
            builder = builder.method(method);
        }
        builder
            .base64_encode(base64_encode.unwrap_or(false))
            .concatenate_all_fields(concatenate_all_fields.unwrap_or(false))
            .ignore_missing(ignore_missing.unwrap_or(false))
            .build()
    }

    /// Source fields in lexicographic order. Empty in all-fields mode.
    pub fn fields(&self) -> &BTreeSet<String> {
        &self.fields
    }

    /// Path the fingerprint is written to.
    pub fn target_field(&self) -> &str {
        &self.target_field
    }

    /// Digest method.
    pub fn method(&self) -> DigestMethod {
        self.method
    }

    /// Whether the digest is written as base64 rather than its text form.
    pub fn base64_encode(&self) -> bool {
        self.base64_encode
    }

    /// Whether every document field is used instead of `fields`.
    pub fn concatenate_all_fields(&self) -> bool {
        self.concatenate_all_fields
    }

    /// Whether missing or null fields are skipped instead of failing.
    pub fn ignore_missing(&self) -> bool {
        self.ignore_missing
    }
}

/// Typed builder for [`ProcessorDefinition`].
#[derive(Debug, Clone)]
pub struct DefinitionBuilder {
    fields: Vec<String>,
    target_field: String,
    method: DigestMethod,
    base64_encode: bool,
    concatenate_all_fields: bool,
    ignore_missing: bool,
}

impl Default for DefinitionBuilder {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            target_field: DEFAULT_TARGET_FIELD.to_string(),
            method: DigestMethod::default(),
            base64_encode: false,
            concatenate_all_fields: false,
            ignore_missing: false,
        }
    }
}

impl DefinitionBuilder {
    /// Source fields; duplicates collapse at build time.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Path the fingerprint is written to.
    pub fn target_field(mut self, target_field: impl Into<String>) -> Self {
        self.target_field = target_field.into();
        self
    }

    /// Digest method.
    pub fn method(mut self, method: DigestMethod) -> Self {
        self.method = method;
        self
    }

    /// Write base64 instead of the method's text form.
    pub fn base64_encode(mut self, base64_encode: bool) -> Self {
        self.base64_encode = base64_encode;
        self
    }

    /// Use every document field; configured fields are discarded.
    pub fn concatenate_all_fields(mut self, concatenate_all_fields: bool) -> Self {
        self.concatenate_all_fields = concatenate_all_fields;
        self
    }

    /// Skip missing or null fields instead of failing.
    pub fn ignore_missing(mut self, ignore_missing: bool) -> Self {
        self.ignore_missing = ignore_missing;
        self
    }

    /// Validate and freeze the definition.
    pub fn build(self) -> Result<ProcessorDefinition, ConfigError> {
        let fields: BTreeSet<String> = if self.concatenate_all_fields {
            BTreeSet::new()
        } else {
            self.fields.into_iter().collect()
        };
        if fields.is_empty() && !self.concatenate_all_fields {
            return Err(ConfigError::EmptyFields);
        }
        for field in &fields {
            validate_path(keys::FIELDS, field)?;
        }
        validate_path(keys::TARGET_FIELD, &self.target_field)?;

        Ok(ProcessorDefinition {
            fields,
            target_field: self.target_field,
            method: self.method,
            base64_encode: self.base64_encode,
            concatenate_all_fields: self.concatenate_all_fields,
            ignore_missing: self.ignore_missing,
        })
    }
}

fn parse_method(name: &str) -> Result<DigestMethod, ConfigError> {
    DigestMethod::from_name(name).ok_or_else(|| ConfigError::IllegalMethod {
        value: name.to_string(),
        valid: DigestMethod::valid_names(),
    })
}

fn validate_path(property: &'static str, path: &str) -> Result<(), ConfigError> {
    FieldPath::parse(path)
        .map(drop)
        .map_err(|source| ConfigError::InvalidPath { property, source })
}
