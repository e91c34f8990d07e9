use crate::{DecodeError, DecodedSequence, Marker};

pub trait SequenceDecoder: Send + Sync {
    fn decode(&self, sequence: &str) -> DecodedSequence;

    /// The marker this decoder separates tokens on.
    fn marker(&self) -> &Marker;
}

/// Decoder bound to one marker; the marker pattern is compiled once and reused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerDecoder {
    marker: Marker,
}

impl MarkerDecoder {
    pub fn new(marker: Marker) -> Self {
        Self { marker }
    }
}

impl SequenceDecoder for MarkerDecoder {
    fn decode(&self, sequence: &str) -> DecodedSequence {
        decode(sequence, &self.marker)
    }

    fn marker(&self) -> &Marker {
        &self.marker
    }
}

/// Decode `sequence`: uppercase it, turn every run of markers into one space,
/// collapse whitespace runs and trim.
pub fn decode(sequence: &str, marker: &Marker) -> DecodedSequence {
    let upper = sequence.to_uppercase();
    let separated = marker.runs().replace_all(&upper, " ");
    DecodedSequence::from_tokens(separated.split_whitespace())
}

/// [`decode`] with the default `WUB` marker.
pub fn decode_default(sequence: &str) -> DecodedSequence {
    decode(sequence, &Marker::default())
}

/// Decode raw bytes. Anything that is not UTF-8 text is rejected with
/// [`DecodeError::InvalidInputKind`] rather than passed through.
pub fn decode_bytes(bytes: &[u8], marker: &Marker) -> Result<DecodedSequence, DecodeError> {
    let sequence = std::str::from_utf8(bytes).map_err(|err| {
        DecodeError::invalid_input(format!(
            "expected UTF-8 text, found invalid byte at offset {}",
            err.valid_up_to()
        ))
    })?;
    Ok(decode(sequence, marker))
}
