//! Morse code decoding.
//!
//! Letters are separated by one or two spaces, words by three or more.
//! Characters other than `.`, `-` and whitespace are stripped before
//! tokenizing, so `"--4"` reads as `"--"`.

use crate::DecodeError;

/// Whitespace runs this long or longer separate words.
const WORD_GAP: usize = 3;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum MorseError {
    #[error(transparent)]
    Input(#[from] DecodeError),
    #[error("unknown morse code {code:?} in word {word}")]
    UnknownCode { code: String, word: usize },
}

/// Decode Morse text into uppercase words joined by single spaces.
pub fn decode_morse(text: &str) -> Result<String, MorseError> {
    let mut words = Vec::new();
    for (idx, codes) in split_words(text).into_iter().enumerate() {
        let mut word = String::new();
        for code in codes {
            let symbol = lookup(&code).ok_or_else(|| MorseError::UnknownCode {
                code: code.clone(),
                word: idx + 1,
            })?;
            word.push_str(symbol);
        }
        words.push(word);
    }
    Ok(words.join(" "))
}

/// [`decode_morse`] over raw bytes; non-UTF-8 input is an invalid input kind.
pub fn decode_morse_bytes(bytes: &[u8]) -> Result<String, MorseError> {
    let text = std::str::from_utf8(bytes).map_err(|err| {
        DecodeError::invalid_input(format!(
            "expected UTF-8 text, found invalid byte at offset {}",
            err.valid_up_to()
        ))
    })?;
    decode_morse(text)
}

/// Group the dot/dash codes into words. Words left without codes after
/// stripping are dropped.
fn split_words(text: &str) -> Vec<Vec<String>> {
    let mut words: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut code = String::new();
    let mut gap = 0;

    for c in text.chars() {
        if c.is_whitespace() {
            gap += 1;
            continue;
        }
        if c != '.' && c != '-' {
            continue;
        }
        if gap > 0 && !code.is_empty() {
            current.push(std::mem::take(&mut code));
        }
        if gap >= WORD_GAP && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        gap = 0;
        code.push(c);
    }

    if !code.is_empty() {
        current.push(code);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn lookup(code: &str) -> Option<&'static str> {
    let symbol = match code {
        ".-" => "A",
        "-..." => "B",
        "-.-." => "C",
        "-.." => "D",
        "." => "E",
        "..-." => "F",
        "--." => "G",
        "...." => "H",
        ".." => "I",
        ".---" => "J",
        "-.-" => "K",
        ".-.." => "L",
        "--" => "M",
        "-." => "N",
        "---" => "O",
        ".--." => "P",
        "--.-" => "Q",
        ".-." => "R",
        "..." => "S",
        "-" => "T",
        "..-" => "U",
        "...-" => "V",
        ".--" => "W",
        "-..-" => "X",
        "-.--" => "Y",
        "--.." => "Z",
        "-----" => "0",
        ".----" => "1",
        "..---" => "2",
        "...--" => "3",
        "....-" => "4",
        "....." => "5",
        "-...." => "6",
        "--..." => "7",
        "---.." => "8",
        "----." => "9",
        ".-.-.-" => ".",
        "--..--" => ",",
        "..--.." => "?",
        ".----." => "'",
        "-.-.--" => "!",
        "-..-." => "/",
        "-.--." => "(",
        "-.--.-" => ")",
        ".-..." => "&",
        "---..." => ":",
        "-.-.-." => ";",
        "-...-" => "=",
        ".-.-." => "+",
        "-....-" => "-",
        "..--.-" => "_",
        ".-..-." => "\"",
        "...-..-" => "$",
        ".--.-." => "@",
        // Distress prosign, sent without letter gaps.
        "...---..." => "SOS",
        _ => return None,
    };
    Some(symbol)
}
