use std::fs;

use decoder_core::{Marker, MarkerDecoder};
use decoder_engine::{
    build_report, decode_batch, write_outputs, BatchMode, BatchOptions, OutputOptions,
    SequenceEntry,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn sample_outcome() -> decoder_engine::BatchOutcome {
    let decoder = MarkerDecoder::new(Marker::new("wub").unwrap());
    decode_batch(
        "WUBWEWUBAREWUBWUBTHEWUBCHAMPIONS\nMYWUBFRIEND",
        &decoder,
        BatchOptions {
            mode: BatchMode::Lines,
            keep_blank: false,
        },
    )
}

#[test]
fn report_summarizes_outcome() {
    let outcome = sample_outcome();
    let report = build_report(&outcome, &Marker::default(), "song.txt", "2024-01-01T00:00:00Z");

    assert_eq!(report.source, "song.txt");
    assert_eq!(report.marker, "WUB");
    assert_eq!(report.mode, BatchMode::Lines);
    assert_eq!(report.sequence_count, 2);
    assert_eq!(report.token_count, 6);
    assert_eq!(
        report.sequences,
        vec![
            SequenceEntry { line: 1, tokens: 4 },
            SequenceEntry { line: 2, tokens: 2 },
        ]
    );
}

#[test]
fn writes_decoded_text_and_report() {
    let temp = TempDir::new().unwrap();
    let outcome = sample_outcome();
    let report = build_report(&outcome, &Marker::default(), "stdin", "2024-01-01T00:00:00Z");

    let summary =
        write_outputs(temp.path(), &outcome, Some(&report), &OutputOptions::default()).unwrap();

    assert_eq!(summary.sequence_count, 2);
    assert_eq!(summary.token_count, 6);
    assert_eq!(
        fs::read_to_string(&summary.output_path).unwrap(),
        "WE ARE THE CHAMPIONS\nMY FRIEND\n"
    );

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(summary.report_path.unwrap()).unwrap()).unwrap();
    assert_eq!(json["marker"], "WUB");
    assert_eq!(json["mode"], "lines");
    assert_eq!(json["token_count"], 6);
    assert_eq!(json["sequences"][1]["line"], 2);
    assert_eq!(json["decoded_utc"], "2024-01-01T00:00:00Z");
}

#[test]
fn report_is_skipped_without_report() {
    let temp = TempDir::new().unwrap();
    let missing_dir = temp.path().join("missing_output");
    let outcome = sample_outcome();

    let summary = write_outputs(&missing_dir, &outcome, None, &OutputOptions::default()).unwrap();

    assert!(summary.output_path.exists());
    assert!(summary.report_path.is_none());
    assert!(!missing_dir.join("report.json").exists());
}
