use decoder_core::DecodeError;
use encoding_rs::{Encoding, UTF_8};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputText {
    pub text: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    #[error("unknown encoding label {0:?}")]
    UnknownEncoding(String),
    #[error("input is not valid {encoding} text")]
    Malformed { encoding: String },
}

impl From<TextError> for DecodeError {
    fn from(err: TextError) -> Self {
        DecodeError::invalid_input(err.to_string())
    }
}

/// Turn raw input bytes into text using: BOM -> explicit encoding label -> strict UTF-8.
///
/// There is no detection fallback; bytes that do not decode cleanly are an error.
pub fn read_text(bytes: &[u8], encoding_label: Option<&str>) -> Result<InputText, TextError> {
    // 1) BOM wins and is stripped
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(&bytes[bom_len..], encoding);
    }

    // 2) Caller-supplied label
    if let Some(label) = encoding_label {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| TextError::UnknownEncoding(label.to_string()))?;
        return decode_with(bytes, encoding);
    }

    // 3) UTF-8
    decode_with(bytes, UTF_8)
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<InputText, TextError> {
    let (text, had_errors) = enc.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(TextError::Malformed {
            encoding: enc.name().to_string(),
        });
    }
    Ok(InputText {
        text: text.into_owned(),
        encoding_label: enc.name().to_string(),
    })
}
