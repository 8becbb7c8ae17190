//! # Tally - token frequency histograms
//!
//! Splits files or standard input into tokens (bytes, words or lines),
//! counts every distinct token exactly, and reports a subset of the
//! resulting histogram.
//!
//! ## Pipeline
//!
//! ```text
//!  sources ──> Tokens (SplitMode) ──> Counter ──> Query ──> Selection ──> render
//!  -, stdin,   bytes | words |        token ->    dump | all   owned list   debug |
//!  FILE...     lines                  count       top | bottom or map       json | yaml
//! ```
//!
//! ## Queries
//!
//! | Query    | Returns                                                       |
//! |----------|---------------------------------------------------------------|
//! | `dump`   | the full token -> count mapping                               |
//! | `all`    | every distinct token, optionally sorted lexicographically     |
//! | `top`    | up to `n` tokens with count >= minimum, most frequent first   |
//! | `bottom` | up to `n` tokens with count <= maximum, least frequent first  |
//!
//! Ties between equal counts keep insertion order (first occurrence in the
//! input), so results are reproducible.
//!
//! ## Quick Start
//!
//! ```
//! use std::io::Cursor;
//! use tally::{count_reader, Counter, SplitMode};
//!
//! let mut counter = Counter::new();
//! count_reader(Cursor::new("to be or not to be"), SplitMode::Words, &mut counter).unwrap();
//!
//! assert_eq!(counter.count("to"), 2);
//! assert_eq!(counter.top(2, 0, true), vec!["to", "be"]);
//! assert_eq!(counter.bottom(1, -1, true), vec!["or"]);
//! ```
//!
//! ## Modules
//!
//! - [`tokenizer`]: Byte, word and line splitting
//! - [`counter`]: Frequency counter and selection queries
//! - [`input`]: File and stdin sources, skip-errors handling
//! - [`output`]: Debug, JSON and YAML rendering
//! - [`config`]: Configuration file and environment handling
//! - [`error`]: Error types and result aliases

pub mod config;
pub mod counter;
pub mod error;
pub mod input;
pub mod output;
pub mod tokenizer;

// Re-exports for convenience
pub use config::Config;
pub use counter::{Counter, Query, Selection};
pub use error::{Result, TallyError};
pub use input::{count_reader, count_sources, Source};
pub use output::{render, OutputFormat};
pub use tokenizer::{SplitMode, Tokens};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
