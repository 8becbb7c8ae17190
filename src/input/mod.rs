//! Input sources.
//!
//! A source is either a file path or standard input (`-` or `stdin`).
//! Sources are scanned one after another into a single [`Counter`]; with
//! `skip_errors` a source that cannot be opened, stat'ed or read is dropped
//! and scanning continues with the next one.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::counter::Counter;
use crate::error::{Result, TallyError};
use crate::tokenizer::{SplitMode, Tokens};

/// Where tokens are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The process's standard input
    Stdin,
    /// A file on disk
    Path(PathBuf),
}

impl Source {
    /// Identifier used in logs and errors
    pub fn name(&self) -> String {
        match self {
            Self::Stdin => "stdin".to_string(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

impl From<&str> for Source {
    fn from(s: &str) -> Self {
        match s {
            "-" | "stdin" => Self::Stdin,
            _ => Self::Path(PathBuf::from(s)),
        }
    }
}

impl std::str::FromStr for Source {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Scan `reader` to completion, counting every token.
///
/// Tokens read before an error stay counted.
pub fn count_reader<R: BufRead>(reader: R, mode: SplitMode, counter: &mut Counter) -> io::Result<()> {
    for token in Tokens::new(reader, mode) {
        counter.increment(token?);
    }
    Ok(())
}

/// Build a histogram over all `sources`, in order.
///
/// Paths that exist but are not regular files (directories, sockets, ...)
/// contribute nothing and are not errors.
pub fn count_sources(sources: &[Source], mode: SplitMode, skip_errors: bool) -> Result<Counter> {
    let mut counter = Counter::new();

    for source in sources {
        match scan_source(source, mode, &mut counter) {
            Ok(()) => {},
            Err(e) if skip_errors && e.is_source() => {
                tracing::debug!("Skipping {}: {}", source, e);
            },
            Err(e) => return Err(e),
        }
    }

    tracing::debug!(
        "Counted {} tokens ({} distinct) from {} sources",
        counter.total(),
        counter.len(),
        sources.len()
    );

    Ok(counter)
}

fn scan_source(source: &Source, mode: SplitMode, counter: &mut Counter) -> Result<()> {
    match source {
        Source::Stdin => {
            tracing::debug!("Scanning stdin for {}", mode);
            let stdin = io::stdin();
            count_reader(stdin.lock(), mode, counter)
                .map_err(|e| TallyError::source_access("reading", source.name(), e))
        },
        Source::Path(path) => scan_file(path, mode, counter),
    }
}

fn scan_file(path: &Path, mode: SplitMode, counter: &mut Counter) -> Result<()> {
    let name = path.display().to_string();

    let file = File::open(path).map_err(|e| TallyError::source_access("opening", &name, e))?;
    let metadata = file
        .metadata()
        .map_err(|e| TallyError::source_access("stating", &name, e))?;

    if !metadata.is_file() {
        tracing::debug!("Ignoring {}: not a regular file", name);
        return Ok(());
    }

    tracing::debug!("Scanning {} ({} bytes) for {}", name, metadata.len(), mode);
    count_reader(BufReader::new(file), mode, counter)
        .map_err(|e| TallyError::source_access("reading", name, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    /// Serves `data` once, then fails every read.
    struct FailAfter {
        data: &'static [u8],
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::new(io::ErrorKind::Other, "device gone"));
            }
            let n = self.data.len().min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_source_from_str() {
        assert_eq!(Source::from("-"), Source::Stdin);
        assert_eq!(Source::from("stdin"), Source::Stdin);
        assert_eq!(
            Source::from("words.txt"),
            Source::Path(PathBuf::from("words.txt"))
        );
        assert_eq!("./-".parse::<Source>().unwrap(), Source::Path(PathBuf::from("./-")));
    }

    #[test]
    fn test_source_name() {
        assert_eq!(Source::Stdin.to_string(), "stdin");
        assert_eq!(Source::from("a/b.txt").name(), "a/b.txt");
    }

    #[test]
    fn test_count_reader_accumulates() {
        let mut counter = Counter::new();
        count_reader(Cursor::new("a b a"), SplitMode::Words, &mut counter).unwrap();
        count_reader(Cursor::new("b\nc\n"), SplitMode::Lines, &mut counter).unwrap();

        assert_eq!(counter.count("a"), 2);
        assert_eq!(counter.count("b"), 2);
        assert_eq!(counter.count("c"), 1);
        assert_eq!(counter.len(), 3);
    }

    #[test]
    fn test_count_reader_keeps_tokens_before_error() {
        let mut counter = Counter::new();
        let reader = BufReader::new(FailAfter {
            data: b"one two\none\n",
        });

        let err = count_reader(reader, SplitMode::Words, &mut counter).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(counter.count("one"), 2);
        assert_eq!(counter.count("two"), 1);
        assert_eq!(counter.total(), 3);
    }

    #[test]
    fn test_count_sources_empty_list() {
        let counter = count_sources(&[], SplitMode::Words, false).unwrap();
        assert!(counter.is_empty());
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let sources = [Source::from("/definitely/not/here.txt")];
        let err = count_sources(&sources, SplitMode::Words, false).unwrap_err();
        match err {
            TallyError::Source { action, path, .. } => {
                assert_eq!(action, "opening");
                assert_eq!(path, "/definitely/not/here.txt");
            },
            other => panic!("unexpected error: {other}"),
        }

        let counter = count_sources(&sources, SplitMode::Words, true).unwrap();
        assert!(counter.is_empty());
    }
}
