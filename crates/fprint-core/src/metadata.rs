//! # Ingest Metadata
//!
//! The metadata fields an ingest document carries next to its source. The
//! declaration order of [`MetadataField`] is the enumeration order used
//! whenever a document lists all of its fields, so it must not change:
//! reordering variants changes every "concatenate all fields" fingerprint.

use std::fmt;

/// A document metadata field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetadataField {
    /// `_index`
    Index,
    /// `_type`
    Type,
    /// `_id`
    Id,
    /// `_routing`
    Routing,
    /// `_version`
    Version,
    /// `_version_type`
    VersionType,
}

impl MetadataField {
    /// All metadata fields in enumeration order.
    pub const ALL: [MetadataField; 6] = [
        Self::Index,
        Self::Type,
        Self::Id,
        Self::Routing,
        Self::Version,
        Self::VersionType,
    ];

    /// The field name as it appears in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "_index",
            Self::Type => "_type",
            Self::Id => "_id",
            Self::Routing => "_routing",
            Self::Version => "_version",
            Self::VersionType => "_version_type",
        }
    }

    /// Look up a metadata field by its document name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
