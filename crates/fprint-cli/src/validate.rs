//! # Validate CLI — Check a pipeline definition.
//!
//! Builds the pipeline exactly as `fprint run` would and prints each
//! processor's resolved settings, defaults included, as JSON.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_json::{json, Value};

use fprint_processor::Pipeline;

use crate::load_pipeline;

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Pipeline definition (YAML or JSON).
    pub pipeline: PathBuf,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let pipeline = load_pipeline(&args.pipeline)?;
    println!("{}", serde_json::to_string_pretty(&describe(&pipeline))?);
    tracing::info!(
        path = %args.pipeline.display(),
        processors = pipeline.processors().len(),
        "pipeline is valid"
    );
    Ok(0)
}

/// Resolved view of a pipeline.
pub fn describe(pipeline: &Pipeline) -> Value {
    let processors: Vec<Value> = pipeline
        .processors()
        .iter()
        .map(|p| {
            json!({
                "type": p.processor_type(),
                "tag": p.tag(),
                "definition": p.definition(),
            })
        })
        .collect();
    json!({
        "description": pipeline.description(),
        "processors": processors,
    })
}
