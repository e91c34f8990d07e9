use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::MarkerError;

/// Marker used when neither settings nor the caller name one.
pub const DEFAULT_MARKER: &str = "WUB";

// Compiled once; `WUB` is a constant literal, so construction cannot fail.
static DEFAULT: LazyLock<Marker> =
    LazyLock::new(|| Marker::new(DEFAULT_MARKER).expect("default marker is a valid literal"));

/// Case-insensitive separator literal, stored uppercased together with the
/// compiled pattern matching a run of one or more consecutive occurrences.
#[derive(Debug, Clone)]
pub struct Marker {
    literal: String,
    runs: Regex,
}

impl Marker {
    pub fn new(text: &str) -> Result<Self, MarkerError> {
        if text.is_empty() {
            return Err(MarkerError::Empty);
        }
        // A whitespace-bearing marker could be re-created by the single-space join.
        if text.chars().any(char::is_whitespace) {
            return Err(MarkerError::Whitespace(text.to_string()));
        }
        let literal = text.to_uppercase();
        let pattern = format!("(?:{})+", regex::escape(&literal));
        let runs = Regex::new(&pattern).map_err(|err| MarkerError::Pattern(err.to_string()))?;
        Ok(Self { literal, runs })
    }

    /// The uppercased marker literal.
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    pub(crate) fn runs(&self) -> &Regex {
        &self.runs
    }
}

impl Default for Marker {
    fn default() -> Self {
        DEFAULT.clone()
    }
}

impl PartialEq for Marker {
    fn eq(&self, other: &Self) -> bool {
        self.literal == other.literal
    }
}

impl Eq for Marker {}

impl Hash for Marker {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.literal.hash(state);
    }
}

impl FromStr for Marker {
    type Err = MarkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}
