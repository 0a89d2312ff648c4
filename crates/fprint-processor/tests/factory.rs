//! Building processors from raw configuration maps, as a pipeline reader
//! would.

use std::collections::BTreeSet;

use fprint_crypto::DigestMethod;
use fprint_processor::{ConfigError, FingerprintProcessor};
use serde_json::{json, Map, Value};

const TAG: &str = "fp-under-test";

fn config(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("config must be an object, got {other}"),
    }
}

fn create(value: Value) -> Result<FingerprintProcessor, ConfigError> {
    FingerprintProcessor::from_config(Some(TAG), config(value))
}

fn field_set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn build_defaults() {
    let processor = create(json!({ "fields": ["_field"] })).unwrap();
    assert_eq!(processor.tag(), Some(TAG));
    assert_eq!(processor.processor_type(), FingerprintProcessor::TYPE);

    let def = processor.definition();
    assert_eq!(def.fields(), &field_set(&["_field"]));
    assert_eq!(def.target_field(), "fingerprint");
    assert_eq!(def.method(), DigestMethod::Md5);
    assert!(!def.base64_encode());
    assert!(!def.concatenate_all_fields());
    assert!(!def.ignore_missing());
}

#[test]
fn empty_fields_throws() {
    let err = create(json!({})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "[fields] can't be empty when 'concatenateAllFields' is false"
    );
}

#[test]
fn concatenate_all_fields_without_fields() {
    let processor = create(json!({ "concatenate_all_fields": true })).unwrap();
    let def = processor.definition();
    assert!(def.fields().is_empty());
    assert_eq!(def.target_field(), "fingerprint");
    assert_eq!(def.method(), DigestMethod::Md5);
    assert!(def.concatenate_all_fields());
    assert!(!def.ignore_missing());
}

#[test]
fn concatenate_all_fields_with_fields() {
    let processor = create(json!({
        "fields": ["_field"],
        "concatenate_all_fields": true,
    }))
    .unwrap();
    assert!(processor.definition().fields().is_empty());
    assert!(processor.definition().concatenate_all_fields());
}

#[test]
fn valid_method() {
    let processor = create(json!({ "fields": ["_field"], "method": "SHA256" })).unwrap();
    assert_eq!(processor.definition().method(), DigestMethod::Sha256);
    assert_eq!(processor.definition().fields(), &field_set(&["_field"]));
    assert!(!processor.definition().base64_encode());
}

#[test]
fn invalid_method() {
    let err = create(json!({ "fields": ["_field"], "method": "Invalid method" })).unwrap_err();
    assert_eq!(
        err.to_string(),
        "[method] illegal method option [Invalid method]. valid values are [SHA1, SHA256, MD5, MURMUR3, UUID]"
    );
}

#[test]
fn base64_encode() {
    let processor = create(json!({ "fields": ["_field"], "base64_encode": true })).unwrap();
    assert!(processor.definition().base64_encode());
    assert_eq!(processor.definition().method(), DigestMethod::Md5);
}

#[test]
fn ignore_missing() {
    let processor = create(json!({ "fields": ["_field"], "ignore_missing": true })).unwrap();
    assert!(processor.definition().ignore_missing());
    assert!(!processor.definition().base64_encode());
}

#[test]
fn duplicate_fields_collapse() {
    let processor = create(json!({ "fields": ["b", "a", "b", "a"] })).unwrap();
    assert_eq!(processor.definition().fields(), &field_set(&["a", "b"]));
}

#[test]
fn unsupported_parameters() {
    let err = create(json!({ "fields": ["_field"], "algorithm": "MD5" })).unwrap_err();
    assert_eq!(
        err.to_string(),
        "processor [fingerprint] doesn't support one or more provided configuration parameters [algorithm]"
    );
}

#[test]
fn malformed_property_types() {
    let cases = [
        (
            json!({ "fields": "_field" }),
            "[fields] property isn't a list, but of type [string]",
        ),
        (
            json!({ "fields": ["_field"], "target_field": 1 }),
            "[target_field] property isn't a string, but of type [number]",
        ),
        (
            json!({ "fields": ["_field"], "ignore_missing": "true" }),
            "[ignore_missing] property isn't a boolean, but of type [string]",
        ),
    ];
    for (value, expected) in cases {
        assert_eq!(create(value).unwrap_err().to_string(), expected);
    }
}

#[test]
fn untagged_processor() {
    let processor = FingerprintProcessor::from_config(None, config(json!({ "fields": ["a"] })))
        .unwrap();
    assert_eq!(processor.tag(), None);
}
