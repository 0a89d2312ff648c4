//! # Fingerprint Values
//!
//! A computed digest tagged with the method that produced it, plus the text
//! encodings a fingerprint can be written to a document in.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::method::{uuid_text, DigestMethod, TextForm};

/// A raw digest and the method that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    method: DigestMethod,
    bytes: Vec<u8>,
}

impl Fingerprint {
    /// Wrap raw digest bytes. Prefer [`DigestMethod::digest()`].
    pub fn new(method: DigestMethod, bytes: Vec<u8>) -> Self {
        Self { method, bytes }
    }

    /// The method that produced this fingerprint.
    pub fn method(&self) -> DigestMethod {
        self.method
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase hex of the raw bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Standard padded base64 of the raw bytes.
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }

    /// The text written to a document.
    ///
    /// `base64` selects base64 for methods that support it; it is ignored
    /// for methods that do not (UUID).
    pub fn encode(&self, base64: bool) -> String {
        if base64 && self.method.supports_base64() {
            return self.to_base64();
        }
        match self.method.spec().text_form {
            TextForm::Hex => self.to_hex(),
            TextForm::Uuid => uuid_text(&self.bytes).unwrap_or_else(|| self.to_hex()),
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.method, self.encode(false))
    }
}
