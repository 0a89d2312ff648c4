//! # fprint-crypto — Digest Methods
//!
//! Provides the digest building blocks for the fingerprint stack:
//!
//! - **MD5, SHA-1, SHA-256** via the RustCrypto `Digest` API.
//! - **MurmurHash3 x64-128** for fast, non-cryptographic fingerprints.
//! - **Name-based UUIDs** (version 3) derived from the input bytes.
//! - **Hex and base64** text encodings of the resulting digests.
//!
//! Methods are selected through a static strategy table
//! ([`method::MethodSpec`]); there is no dynamic dispatch.
//!
//! ## Crate Policy
//!
//! - Depends only on `fprint-core` internally.
//! - Digests are computed from `CanonicalInput` only.
//! - Every method is pinned by known-answer tests.

pub mod fingerprint;
pub mod method;
pub mod murmur3;

pub use fingerprint::Fingerprint;
pub use method::{DigestMethod, MethodSpec, TextForm};
pub use murmur3::murmur3_x64_128;
