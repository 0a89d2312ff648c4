//! # Field Paths
//!
//! Dotted paths (`user.address.city`, `tags.0`) addressing values inside a
//! document. Object segments are keys; segments applied to arrays must be
//! decimal indices.

use std::fmt;

use crate::error::DocumentError;

/// A validated, non-empty dotted field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::EmptyPath` for `""` and
    /// `DocumentError::EmptySegment` when any segment is empty.
    pub fn parse(raw: &str) -> Result<Self, DocumentError> {
        if raw.is_empty() {
            return Err(DocumentError::EmptyPath);
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(DocumentError::EmptySegment(raw.to_string()));
        }
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The path as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The individual segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True when the path has no dots.
    pub fn is_top_level(&self) -> bool {
        self.segments.len() == 1
    }

    /// Interpret `segment` as an array index.
    pub(crate) fn index(&self, segment: &str) -> Result<usize, DocumentError> {
        segment.parse::<usize>().map_err(|_| DocumentError::NotAnIndex {
            segment: segment.to_string(),
            path: self.raw.clone(),
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
