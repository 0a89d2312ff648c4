//! # fprint-core — Foundational Types for the Fingerprint Stack
//!
//! This crate defines the document model the fingerprint processor runs
//! against and the canonical byte form every fingerprint is computed over.
//! Every other crate in the workspace depends on `fprint-core`; it depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`Document` trait at the seam.** The processor never sees a concrete
//!    document type. It reads by path, writes by path, and asks the document
//!    to enumerate its own fields (metadata included).
//!
//! 2. **`CanonicalInput` newtype.** ALL fingerprint digests are computed over
//!    `CanonicalInput`, whose only constructor renders `(name, value)` pairs.
//!    No ad-hoc string building for digests.
//!
//! 3. **Contractual error text.** `DocumentError` messages are surfaced to
//!    pipeline operators verbatim and are covered by tests.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fprint-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod document;
pub mod error;
pub mod metadata;
pub mod path;

// Re-export primary types for ergonomic imports.
pub use canonical::{render_value, value_to_string, value_type_name, CanonicalInput};
pub use document::{Document, IngestDocument, SOURCE_KEY};
pub use error::DocumentError;
pub use metadata::MetadataField;
pub use path::FieldPath;
