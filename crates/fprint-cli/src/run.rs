//! # Run CLI — Fingerprint a stream of documents.
//!
//! Reads newline-delimited JSON document envelopes, runs each through the
//! pipeline, and writes the processed envelopes as NDJSON. A document that
//! fails to parse or to process is reported and skipped; the remaining
//! documents are still processed.
//!
//! ```bash
//! fprint run pipeline.yaml --input docs.ndjson --output out.ndjson
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use fprint_core::IngestDocument;
use fprint_processor::Pipeline;

use crate::load_pipeline;

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Pipeline definition (YAML or JSON).
    pub pipeline: PathBuf,

    /// NDJSON document envelopes to read. Defaults to stdin.
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Where to write processed envelopes. Defaults to stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Counts of processed and failed documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Execute the run subcommand.
///
/// Returns exit code 1 when any document failed.
pub fn run_documents(args: &RunArgs) -> Result<u8> {
    let pipeline = load_pipeline(&args.pipeline)?;

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open input: {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("failed to create output: {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let summary = process_stream(&pipeline, reader, writer)?;
    tracing::info!(
        processed = summary.processed,
        failed = summary.failed,
        "run complete"
    );
    Ok(if summary.failed > 0 { 1 } else { 0 })
}

/// Run every line of `reader` through the pipeline, writing successes to
/// `writer`. Blank lines are ignored.
///
/// Only I/O failures abort the stream.
pub fn process_stream<R: BufRead, W: Write>(
    pipeline: &Pipeline,
    reader: R,
    mut writer: W,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read input line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }

        match process_line(pipeline, &line) {
            Ok(envelope) => {
                serde_json::to_writer(&mut writer, &envelope)
                    .with_context(|| format!("failed to write document from line {line_no}"))?;
                writer.write_all(b"\n")?;
                summary.processed += 1;
            }
            Err(e) => {
                tracing::error!(line = line_no, "document skipped: {e:#}");
                summary.failed += 1;
            }
        }
    }

    writer.flush().context("failed to flush output")?;
    Ok(summary)
}

fn process_line(pipeline: &Pipeline, line: &str) -> Result<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_str(line).context("invalid JSON")?;
    let doc = IngestDocument::from_envelope(value)?;
    let doc = pipeline.execute(doc)?;
    Ok(doc.to_envelope())
}
