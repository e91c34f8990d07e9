//! Decoder engine: text intake, batch decoding and output persistence.
mod batch;
mod output;
mod persist;
mod text;

pub use batch::{
    decode_batch, decode_sequences, BatchMode, BatchOptions, BatchOutcome, DecodedLine,
};
pub use output::{
    build_report, write_outputs, OutputError, OutputOptions, OutputSummary, RunReport,
    SequenceEntry,
};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use text::{read_text, InputText, TextError};
