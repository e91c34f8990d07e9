use std::fmt;

/// Decoded output: uppercase tokens joined by single spaces, never padded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DecodedSequence {
    text: String,
}

impl DecodedSequence {
    /// Joins tokens with single spaces. Tokens must be non-empty and free of whitespace.
    pub(crate) fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        let mut text = String::new();
        for token in tokens {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(token);
        }
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.text.split(' ').filter(|token| !token.is_empty())
    }

    pub fn token_count(&self) -> usize {
        self.tokens().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for DecodedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for DecodedSequence {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<DecodedSequence> for String {
    fn from(sequence: DecodedSequence) -> Self {
        sequence.text
    }
}
