//! # Digest Methods — Strategy Table
//!
//! Defines `DigestMethod`, the closed set of algorithms a fingerprint can be
//! computed with, and the static strategy table that maps each method to its
//! digest function, output width, default text form, and whether base64
//! encoding applies.
//!
//! ## Invariant
//!
//! Digest functions accept only `&CanonicalInput`. Every fingerprint in the
//! stack is therefore computed over bytes produced by the canonical renderer.

use std::fmt;

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use uuid::{Builder, Uuid};

use fprint_core::CanonicalInput;

use crate::fingerprint::Fingerprint;
use crate::murmur3::murmur3_fingerprint_bytes;

/// The algorithm used to compute a fingerprint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestMethod {
    /// SHA-1, 160-bit.
    #[serde(rename = "SHA1")]
    Sha1,
    /// SHA-256, 256-bit.
    #[serde(rename = "SHA256")]
    Sha256,
    /// MD5, 128-bit. The default method.
    #[default]
    #[serde(rename = "MD5")]
    Md5,
    /// MurmurHash3 x64-128 with the fingerprint seed. Not cryptographic.
    #[serde(rename = "MURMUR3")]
    Murmur3,
    /// Name-based (version 3) UUID derived from the input bytes.
    #[serde(rename = "UUID")]
    Uuid,
}

/// How a digest renders as text when base64 is not requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextForm {
    /// Lowercase hex.
    Hex,
    /// Hyphenated lowercase UUID.
    Uuid,
}

/// One row of the strategy table.
#[derive(Debug, Clone, Copy)]
pub struct MethodSpec {
    /// The method this row describes.
    pub method: DigestMethod,
    /// Configuration name, matched case-sensitively.
    pub name: &'static str,
    /// Digest width in bytes.
    pub output_len: usize,
    /// Whether the base64 encoding flag applies.
    pub supports_base64: bool,
    /// Text form used when base64 is off or unsupported.
    pub text_form: TextForm,
    digest: fn(&[u8]) -> Vec<u8>,
}

/// The strategy table, in the order valid method names are listed to users.
static METHODS: [MethodSpec; 5] = [
    MethodSpec {
        method: DigestMethod::Sha1,
        name: "SHA1",
        output_len: 20,
        supports_base64: true,
        text_form: TextForm::Hex,
        digest: sha1_digest,
    },
    MethodSpec {
        method: DigestMethod::Sha256,
        name: "SHA256",
        output_len: 32,
        supports_base64: true,
        text_form: TextForm::Hex,
        digest: sha256_digest,
    },
    MethodSpec {
        method: DigestMethod::Md5,
        name: "MD5",
        output_len: 16,
        supports_base64: true,
        text_form: TextForm::Hex,
        digest: md5_digest,
    },
    MethodSpec {
        method: DigestMethod::Murmur3,
        name: "MURMUR3",
        output_len: 16,
        supports_base64: true,
        text_form: TextForm::Hex,
        digest: murmur3_digest,
    },
    MethodSpec {
        method: DigestMethod::Uuid,
        name: "UUID",
        output_len: 16,
        supports_base64: false,
        text_form: TextForm::Uuid,
        digest: uuid_digest,
    },
];

impl DigestMethod {
    /// All methods in table order.
    pub const ALL: [DigestMethod; 5] = [
        Self::Sha1,
        Self::Sha256,
        Self::Md5,
        Self::Murmur3,
        Self::Uuid,
    ];

    /// The strategy table row for this method.
    pub fn spec(&self) -> &'static MethodSpec {
        let index = match self {
            Self::Sha1 => 0,
            Self::Sha256 => 1,
            Self::Md5 => 2,
            Self::Murmur3 => 3,
            Self::Uuid => 4,
        };
        &METHODS[index]
    }

    /// Configuration name of the method.
    pub fn as_str(&self) -> &'static str {
        self.spec().name
    }

    /// Look up a method by its configuration name. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        METHODS
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.method)
    }

    /// Comma-separated list of valid names, `SHA1, SHA256, MD5, MURMUR3, UUID`.
    pub fn valid_names() -> String {
        METHODS
            .iter()
            .map(|spec| spec.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Digest width in bytes.
    pub fn output_len(&self) -> usize {
        self.spec().output_len
    }

    /// Whether the base64 encoding flag applies to this method.
    pub fn supports_base64(&self) -> bool {
        self.spec().supports_base64
    }

    /// Compute the fingerprint of canonical input.
    pub fn digest(&self, input: &CanonicalInput) -> Fingerprint {
        let spec = self.spec();
        Fingerprint::new(*self, (spec.digest)(input.as_bytes()))
    }
}

impl fmt::Display for DigestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn sha1_digest(data: &[u8]) -> Vec<u8> {
    Sha1::digest(data).to_vec()
}

fn sha256_digest(data: &[u8]) -> Vec<u8> {
    Sha256::digest(data).to_vec()
}

fn md5_digest(data: &[u8]) -> Vec<u8> {
    Md5::digest(data).to_vec()
}

fn murmur3_digest(data: &[u8]) -> Vec<u8> {
    murmur3_fingerprint_bytes(data).to_vec()
}

/// MD5 of the bytes with the version 3 and RFC 4122 variant bits set.
fn uuid_digest(data: &[u8]) -> Vec<u8> {
    let mut md5 = [0u8; 16];
    md5.copy_from_slice(&Md5::digest(data));
    Builder::from_md5_bytes(md5).into_uuid().as_bytes().to_vec()
}

/// Render 16 UUID bytes in hyphenated form.
pub(crate) fn uuid_text(bytes: &[u8]) -> Option<String> {
    let bytes: [u8; 16] = bytes.try_into().ok()?;
    Some(Uuid::from_bytes(bytes).hyphenated().to_string())
}
