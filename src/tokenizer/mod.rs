//! Input tokenization.
//!
//! Splits a byte stream into a lazy sequence of string tokens according to a
//! [`SplitMode`]:
//!
//! - **bytes**: every byte is a token
//! - **words**: maximal runs of non-delimiter code points
//! - **lines**: `\n`-separated lines with a trailing `\r` stripped
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use tally::tokenizer::{SplitMode, Tokens};
//!
//! let tokens: Vec<String> = Tokens::new(Cursor::new("a, b! c"), SplitMode::Words)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(tokens, vec!["a", "b", "c"]);
//! ```

mod split;

pub use split::{is_delimiter, Tokens};

use serde::{Deserialize, Serialize};

/// Token splitting policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// One token per byte
    #[default]
    Bytes,
    /// Whitespace and punctuation separated words
    Words,
    /// Newline separated lines
    Lines,
}

impl SplitMode {
    /// Get descriptive name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bytes => "bytes",
            Self::Words => "words",
            Self::Lines => "lines",
        }
    }
}

impl std::fmt::Display for SplitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for SplitMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bytes" | "byte" | "b" => Ok(Self::Bytes),
            "words" | "word" | "w" => Ok(Self::Words),
            "lines" | "line" | "l" => Ok(Self::Lines),
            _ => Err(format!("Unknown split mode: {}", s)),
        }
    }
}
