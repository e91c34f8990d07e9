use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use decoder_core::{DecodeError, Marker, MarkerDecoder, DEFAULT_MARKER};
use decoder_engine::{
    build_report, decode_batch, decode_sequences, read_text, write_outputs, BatchMode,
    BatchOptions, BatchOutcome, OutputOptions,
};
use decoder_logging::{decoder_debug, decoder_error, decoder_info, decoder_warn, LogDestination};
use log::LevelFilter;

use crate::cli::Cli;
use crate::settings::{load_settings, Settings};

const LOG_FILENAME: &str = "wubdecode.log";

/// Where the encoded text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Args(Vec<String>),
    File(PathBuf),
    Stdin,
}

impl InputSource {
    fn label(&self) -> String {
        match self {
            InputSource::Args(_) => "args".to_string(),
            InputSource::File(path) => path.display().to_string(),
            InputSource::Stdin => "stdin".to_string(),
        }
    }
}

/// Command-line flags merged over settings over built-in defaults.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: InputSource,
    pub marker: Marker,
    pub batch: BatchOptions,
    pub encoding: Option<String>,
    pub output: Option<PathBuf>,
    pub report: bool,
    pub log: LogDestination,
    pub level: LevelFilter,
}

impl RunConfig {
    /// Options that are set but change nothing for this run.
    pub fn ignored_options(&self) -> Vec<String> {
        let literal_args = matches!(self.source, InputSource::Args(_));
        let mut notes = Vec::new();
        if self.batch.keep_blank && (literal_args || self.batch.mode == BatchMode::Whole) {
            notes.push(
                "keep_blank has no effect unless input text is decoded line by line".to_string(),
            );
        }
        if literal_args {
            if let Some(label) = &self.encoding {
                notes.push(format!("encoding {label:?} has no effect on literal arguments"));
            }
        }
        notes
    }
}

pub fn resolve(cli: Cli, settings: &Settings) -> anyhow::Result<RunConfig> {
    let marker_text = cli
        .marker
        .as_deref()
        .or(settings.marker.as_deref())
        .unwrap_or(DEFAULT_MARKER);
    let marker =
        Marker::new(marker_text).with_context(|| format!("invalid marker {marker_text:?}"))?;

    let mode = if cli.lines {
        BatchMode::Lines
    } else {
        settings.mode.unwrap_or_default()
    };
    let keep_blank = cli.keep_blank || settings.keep_blank.unwrap_or(false);

    let source = if !cli.inputs.is_empty() {
        InputSource::Args(cli.inputs)
    } else if let Some(path) = cli.file {
        InputSource::File(path)
    } else {
        InputSource::Stdin
    };

    Ok(RunConfig {
        source,
        marker,
        batch: BatchOptions { mode, keep_blank },
        encoding: cli.encoding.or_else(|| settings.encoding.clone()),
        output: cli.output,
        report: cli.report,
        log: cli.log.or(settings.log).map(Into::into).unwrap_or_default(),
        level: if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
    })
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let loaded = load_settings(cli.config.as_deref())?;
    let config = resolve(cli, &loaded.settings)?;

    decoder_logging::initialize(config.log, config.level, Path::new(LOG_FILENAME));
    if let Some(warning) = &loaded.warning {
        decoder_warn!("{}", warning);
    }
    if let Some(path) = &loaded.source {
        decoder_info!("Loaded settings from {:?}", path);
    }
    for note in config.ignored_options() {
        decoder_warn!("{}", note);
    }
    decoder_debug!("Resolved run config: {:?}", config);

    let outcome = decode_input(&config, &mut io::stdin().lock())?;
    emit(&config, &outcome, &mut io::stdout().lock()).inspect_err(|err| {
        decoder_error!("{:#}", err);
    })
}

/// Print the decoded text to `out`, or write it (and the report) into the
/// output directory and print the written paths instead.
pub fn emit(
    config: &RunConfig,
    outcome: &BatchOutcome,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match &config.output {
        Some(dir) => {
            let report = config.report.then(|| {
                let decoded_utc = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
                build_report(outcome, &config.marker, &config.source.label(), &decoded_utc)
            });
            let summary = write_outputs(dir, outcome, report.as_ref(), &OutputOptions::default())
                .with_context(|| format!("failed to write output to {}", dir.display()))?;
            writeln!(out, "{}", summary.output_path.display())?;
            if let Some(path) = summary.report_path {
                writeln!(out, "{}", path.display())?;
            }
        }
        None => out.write_all(outcome.render().as_bytes())?,
    }
    out.flush().context("failed to write decoded output")
}

/// Read and decode the configured input. `stdin` is only read for `InputSource::Stdin`.
pub fn decode_input(config: &RunConfig, stdin: &mut dyn Read) -> anyhow::Result<BatchOutcome> {
    let decoder = MarkerDecoder::new(config.marker.clone());

    let bytes = match &config.source {
        InputSource::Args(inputs) => {
            return Ok(decode_sequences(inputs.iter().map(String::as_str), &decoder));
        }
        InputSource::File(path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        InputSource::Stdin => {
            let mut bytes = Vec::new();
            stdin
                .read_to_end(&mut bytes)
                .context("failed to read stdin")?;
            bytes
        }
    };

    let input = read_text(&bytes, config.encoding.as_deref())
        .map_err(DecodeError::from)
        .with_context(|| format!("cannot decode {}", config.source.label()))?;
    decoder_debug!(
        "Read {} bytes from {} as {}",
        bytes.len(),
        config.source.label(),
        input.encoding_label
    );

    Ok(decode_batch(&input.text, &decoder, config.batch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::LogChoice;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["wubdecode"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    fn resolve_args(args: &[&str]) -> RunConfig {
        resolve(parse(args), &Settings::default()).unwrap()
    }

    #[test]
    fn defaults_without_flags_or_settings() {
        let config = resolve_args(&[]);
        assert_eq!(config.marker, Marker::default());
        assert_eq!(config.batch, BatchOptions::default());
        assert_eq!(config.source, InputSource::Stdin);
        assert_eq!(config.log, LogDestination::Off);
        assert_eq!(config.level, LevelFilter::Info);
        assert!(config.output.is_none());
    }

    #[test]
    fn flags_override_settings() {
        let settings = Settings {
            marker: Some("beep".to_string()),
            mode: Some(BatchMode::Whole),
            keep_blank: None,
            encoding: Some("latin1".to_string()),
            log: Some(LogChoice::File),
        };

        let args = parse(&["-m", "drop", "--lines", "--log", "terminal"]);
        let config = resolve(args, &settings).unwrap();
        assert_eq!(config.marker.as_str(), "DROP");
        assert_eq!(config.batch.mode, BatchMode::Lines);
        assert_eq!(config.encoding.as_deref(), Some("latin1"));
        assert_eq!(config.log, LogDestination::Terminal);

        let config = resolve(parse(&[]), &settings).unwrap();
        assert_eq!(config.marker.as_str(), "BEEP");
        assert_eq!(config.batch.mode, BatchMode::Whole);
        assert_eq!(config.log, LogDestination::File);
    }

    #[test]
    fn invalid_marker_is_an_error() {
        let err = resolve(parse(&["--marker", ""]), &Settings::default()).unwrap_err();
        assert!(err.to_string().contains("invalid marker"));
    }

    #[test]
    fn literal_arguments_decode_individually() {
        let config = resolve_args(&["AWUBBWUBC", "WUBWEWUBAREWUB"]);
        let outcome = decode_input(&config, &mut io::empty()).unwrap();
        assert_eq!(outcome.render(), "A B C\nWE ARE\n");
    }

    #[test]
    fn stdin_is_decoded_as_one_sequence_by_default() {
        let config = resolve_args(&[]);
        let mut stdin: &[u8] = b"AWUBB\nWUBC\n";
        let outcome = decode_input(&config, &mut stdin).unwrap();
        assert_eq!(outcome.render(), "A B C\n");
    }

    #[test]
    fn file_lines_are_decoded_separately() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("song.txt");
        fs::write(&path, "AWUBB\n\nxDROPy\n").unwrap();

        let path_arg = path.to_str().unwrap();
        let config = resolve_args(&["-f", path_arg, "--lines", "-m", "drop"]);
        let outcome = decode_input(&config, &mut io::empty()).unwrap();
        assert_eq!(outcome.render(), "AWUBB\nX Y\n");
    }

    #[test]
    fn non_utf8_input_is_rejected() {
        let config = resolve_args(&[]);
        let mut stdin: &[u8] = b"A\xffWUBB";
        let err = decode_input(&config, &mut stdin).unwrap_err();
        assert!(err.to_string().contains("cannot decode stdin"));
        let root = err.root_cause().to_string();
        assert!(root.starts_with("invalid input kind"), "root cause {root:?}");
    }

    #[test]
    fn labelled_input_is_transcoded() {
        let config = resolve_args(&["--encoding", "latin1"]);
        let mut stdin: &[u8] = b"caf\xe9WUBol\xe9";
        let outcome = decode_input(&config, &mut stdin).unwrap();
        assert_eq!(outcome.render(), "CAFÉ OLÉ\n");
    }

    #[test]
    fn emit_prints_decoded_text_without_output_dir() {
        let config = resolve_args(&["AWUBBWUBC", "WUB"]);
        let outcome = decode_input(&config, &mut io::empty()).unwrap();

        let mut out = Vec::new();
        emit(&config, &outcome, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "A B C\n\n");
    }

    #[test]
    fn emit_writes_files_and_prints_their_paths() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("out");
        let dir_arg = dir.to_str().unwrap();
        let config = resolve_args(&["-o", dir_arg, "--report", "WUBWEWUBAREWUB"]);
        let outcome = decode_input(&config, &mut io::empty()).unwrap();

        let mut out = Vec::new();
        emit(&config, &outcome, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        let paths: Vec<_> = printed.lines().map(PathBuf::from).collect();
        assert_eq!(paths, vec![dir.join("decoded.txt"), dir.join("report.json")]);
        assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "WE ARE\n");
        let report = fs::read_to_string(&paths[1]).unwrap();
        assert!(report.contains("\"source\": \"args\""), "{report}");
    }

    #[test]
    fn emit_without_report_prints_only_output_path() {
        let temp = TempDir::new().unwrap();
        let dir_arg = temp.path().to_str().unwrap();
        let config = resolve_args(&["-o", dir_arg, "AWUBB"]);
        let outcome = decode_input(&config, &mut io::empty()).unwrap();

        let mut out = Vec::new();
        emit(&config, &outcome, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
        assert!(!temp.path().join("report.json").exists());
    }

    #[test]
    fn keep_blank_without_line_mode_is_flagged() {
        let config = resolve_args(&["--keep-blank"]);
        assert_eq!(
            config.ignored_options(),
            vec!["keep_blank has no effect unless input text is decoded line by line"]
        );

        let config = resolve_args(&["--keep-blank", "--lines"]);
        assert!(config.ignored_options().is_empty());

        let config = resolve_args(&["--keep-blank", "--lines", "AWUBB"]);
        assert_eq!(config.ignored_options().len(), 1);
    }

    #[test]
    fn encoding_with_literal_arguments_is_flagged() {
        let config = resolve_args(&["--encoding", "latin1", "AWUBB"]);
        assert_eq!(
            config.ignored_options(),
            vec!["encoding \"latin1\" has no effect on literal arguments"]
        );
        assert!(resolve_args(&["--encoding", "latin1"]).ignored_options().is_empty());
    }
}
