use decoder_core::{DecodedSequence, SequenceDecoder};
use decoder_logging::{decoder_debug, decoder_trace};
use serde::{Deserialize, Serialize};

/// How an input text is split into encoded sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchMode {
    /// The whole input is one sequence.
    #[default]
    Whole,
    /// Every line is its own sequence.
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchOptions {
    pub mode: BatchMode,
    /// In `Lines` mode, keep whitespace-only lines as empty outputs.
    pub keep_blank: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLine {
    /// 1-based line number in the input (always 1 in `Whole` mode).
    pub line_no: usize,
    pub decoded: DecodedSequence,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchOutcome {
    pub mode: BatchMode,
    pub lines: Vec<DecodedLine>,
}

impl BatchOutcome {
    pub fn sequence_count(&self) -> usize {
        self.lines.len()
    }

    pub fn token_count(&self) -> usize {
        self.lines.iter().map(|line| line.decoded.token_count()).sum()
    }

    /// Every decoded sequence followed by a newline.
    pub fn render(&self) -> String {
        let mut buffer = String::new();
        for line in &self.lines {
            buffer.push_str(line.decoded.as_str());
            buffer.push('\n');
        }
        buffer
    }
}

pub fn decode_batch(
    text: &str,
    decoder: &dyn SequenceDecoder,
    options: BatchOptions,
) -> BatchOutcome {
    let lines = match options.mode {
        BatchMode::Whole => vec![DecodedLine {
            line_no: 1,
            decoded: decoder.decode(text),
        }],
        BatchMode::Lines => text
            .lines()
            .enumerate()
            .filter(|(_, line)| options.keep_blank || !line.trim().is_empty())
            .map(|(idx, line)| DecodedLine {
                line_no: idx + 1,
                decoded: decoder.decode(line),
            })
            .collect(),
    };

    finish(decoder, options.mode, lines)
}

/// Decode already separated sequences, numbering them from 1 in order.
pub fn decode_sequences<'a>(
    sequences: impl IntoIterator<Item = &'a str>,
    decoder: &dyn SequenceDecoder,
) -> BatchOutcome {
    let lines = sequences
        .into_iter()
        .enumerate()
        .map(|(idx, sequence)| DecodedLine {
            line_no: idx + 1,
            decoded: decoder.decode(sequence),
        })
        .collect();
    finish(decoder, BatchMode::Lines, lines)
}

fn finish(
    decoder: &dyn SequenceDecoder,
    mode: BatchMode,
    lines: Vec<DecodedLine>,
) -> BatchOutcome {
    for line in &lines {
        decoder_trace!("Line {}: {} token(s)", line.line_no, line.decoded.token_count());
    }
    let outcome = BatchOutcome { mode, lines };
    decoder_debug!(
        "Decoded {} sequence(s), {} token(s) with marker {} in {:?} mode",
        outcome.sequence_count(),
        outcome.token_count(),
        decoder.marker(),
        mode
    );
    outcome
}
