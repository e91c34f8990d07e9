//! Decoder core: pure marker-separated and Morse token decoding.
mod decode;
mod error;
mod marker;
mod morse;
mod sequence;

pub use decode::{decode, decode_bytes, decode_default, MarkerDecoder, SequenceDecoder};
pub use error::{DecodeError, MarkerError};
pub use marker::{Marker, DEFAULT_MARKER};
pub use morse::{decode_morse, decode_morse_bytes, MorseError};
pub use sequence::DecodedSequence;
