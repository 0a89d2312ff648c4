//! # fprint-processor — The Fingerprint Ingest Processor
//!
//! Turns a raw configuration map into a validated, immutable
//! [`ProcessorDefinition`] and applies it to documents through
//! [`FingerprintProcessor`]. [`Pipeline`] chains processors read from a
//! pipeline definition.
//!
//! ## Key Design Principles
//!
//! 1. **Validate once, run many.** All configuration checks happen at
//!    construction. The engine only fails on document content.
//!
//! 2. **No partial mutation.** A processor computes its fingerprint before
//!    touching the document and writes exactly once.
//!
//! 3. **Shareable.** Processors and pipelines are immutable and `Send + Sync`;
//!    one instance serves any number of threads.
//!
//! ## Crate Policy
//!
//! - Depends on `fprint-core` for documents and `fprint-crypto` for digests.
//! - Error texts are contractual and pinned by tests.
//! - No `.unwrap()` outside tests.

pub mod config;
pub mod definition;
pub mod error;
pub mod pipeline;
pub mod processor;

pub use config::ProcessorConfig;
pub use definition::{DefinitionBuilder, ProcessorDefinition, DEFAULT_TARGET_FIELD};
pub use error::{ConfigError, FingerprintError, PipelineError};
pub use pipeline::Pipeline;
pub use processor::FingerprintProcessor;
