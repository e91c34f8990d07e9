use std::path::{Path, PathBuf};

use decoder_core::Marker;
use decoder_logging::decoder_info;
use serde::Serialize;

use crate::batch::{BatchMode, BatchOutcome};
use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub output_filename: String,
    pub report_filename: Option<String>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            output_filename: "decoded.txt".to_string(),
            report_filename: Some("report.json".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSummary {
    pub sequence_count: usize,
    pub token_count: usize,
    pub output_path: PathBuf,
    pub report_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Machine-readable summary of one decoding run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub source: String,
    pub marker: String,
    pub mode: BatchMode,
    pub sequence_count: usize,
    pub token_count: usize,
    pub decoded_utc: String,
    pub sequences: Vec<SequenceEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceEntry {
    pub line: usize,
    pub tokens: usize,
}

pub fn build_report(
    outcome: &BatchOutcome,
    marker: &Marker,
    source: &str,
    decoded_utc: &str,
) -> RunReport {
    RunReport {
        source: source.to_string(),
        marker: marker.as_str().to_string(),
        mode: outcome.mode,
        sequence_count: outcome.sequence_count(),
        token_count: outcome.token_count(),
        decoded_utc: decoded_utc.to_string(),
        sequences: outcome
            .lines
            .iter()
            .map(|line| SequenceEntry {
                line: line.line_no,
                tokens: line.decoded.token_count(),
            })
            .collect(),
    }
}

/// Write the rendered outcome, and the report when both a report and a report
/// filename are given, into `output_dir`.
pub fn write_outputs(
    output_dir: &Path,
    outcome: &BatchOutcome,
    report: Option<&RunReport>,
    options: &OutputOptions,
) -> Result<OutputSummary, OutputError> {
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let output_path = writer.write(&options.output_filename, &outcome.render())?;

    let report_path = match (report, options.report_filename.as_deref()) {
        (Some(report), Some(name)) => {
            let json = serde_json::to_string_pretty(report)?;
            Some(writer.write(name, &json)?)
        }
        _ => None,
    };

    decoder_info!(
        "Wrote {} decoded sequence(s) to {:?}",
        outcome.sequence_count(),
        output_path
    );

    Ok(OutputSummary {
        sequence_count: outcome.sequence_count(),
        token_count: outcome.token_count(),
        output_path,
        report_path,
    })
}
