//! # fprint-cli — CLI for the Fingerprint Stack
//!
//! Provides the `fprint` command-line interface.
//!
//! ## Subcommands
//!
//! - `fprint run`: Run a pipeline over newline-delimited JSON documents.
//! - `fprint validate`: Build a pipeline and print its resolved processors.
//!
//! ```bash
//! fprint validate pipeline.yaml
//! fprint run pipeline.yaml --input docs.ndjson --output out.ndjson
//! cat docs.ndjson | fprint run pipeline.yaml -v
//! ```

pub mod run;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use fprint_processor::Pipeline;

/// Load a YAML or JSON pipeline definition from disk.
pub fn load_pipeline(path: &Path) -> Result<Pipeline> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read pipeline: {}", path.display()))?;
    parse_pipeline(&content).with_context(|| format!("invalid pipeline: {}", path.display()))
}

/// Parse a YAML or JSON pipeline definition.
pub fn parse_pipeline(content: &str) -> Result<Pipeline> {
    let value: serde_json::Value =
        serde_yaml::from_str(content).context("failed to parse pipeline definition")?;
    Ok(Pipeline::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_yaml_pipeline() {
        let pipeline = parse_pipeline(
            "description: dedup\nprocessors:\n  - fingerprint:\n      tag: fp\n      fields: [user, message]\n      method: SHA256\n",
        )
        .unwrap();
        assert_eq!(pipeline.description(), Some("dedup"));
        assert_eq!(pipeline.processors()[0].tag(), Some("fp"));
    }

    #[test]
    fn parses_json_pipeline() {
        let pipeline =
            parse_pipeline(r#"{"processors": [{"fingerprint": {"fields": ["a"]}}]}"#).unwrap();
        assert_eq!(pipeline.processors().len(), 1);
    }

    #[test]
    fn reports_configuration_errors() {
        let err = parse_pipeline("processors:\n  - fingerprint: {}\n").unwrap_err();
        assert!(format!("{err:#}").contains("[fields] can't be empty"));
    }

    #[test]
    fn missing_file_has_context() {
        let err = load_pipeline(Path::new("/nonexistent/pipeline.yaml")).unwrap_err();
        assert!(err.to_string().contains("failed to read pipeline"));
    }
}
