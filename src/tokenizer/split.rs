//! Lazy token iterator.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::io::{self, BufRead};

use super::SplitMode;

/// Punctuation that separates words in addition to Unicode whitespace.
const PUNCTUATION: [char; 14] = [
    '!', ',', ';', '(', ')', '{', '}', '[', ']', '<', '>', '`', '|', '=',
];

/// Returns true if `c` ends a word.
///
/// ```
/// use tally::tokenizer::is_delimiter;
///
/// assert!(is_delimiter(' '));
/// assert!(is_delimiter('\u{3000}'));
/// assert!(is_delimiter('|'));
/// assert!(!is_delimiter('.'));
/// assert!(!is_delimiter('-'));
/// ```
pub fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || PUNCTUATION.contains(&c)
}

/// Decode `bytes` as UTF-8, escaping each invalid byte as `\xNN`.
///
/// Distinct byte sequences decode to distinct strings unless the input
/// already spells out such an escape literally.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }

    let mut text = String::with_capacity(bytes.len() + 8);
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        text.extend(chunk.invalid().escape_ascii().map(char::from));
    }
    Cow::Owned(text)
}

/// Forward-only token stream over a buffered reader.
///
/// Input is pulled from the reader only as tokens are consumed: one buffer
/// at a time for [`SplitMode::Bytes`], one `\n`-terminated line at a time
/// for words and lines. Words never span a newline since `\n` is itself a
/// delimiter.
///
/// A read error is yielded once; the iterator is exhausted afterwards.
pub struct Tokens<R> {
    reader: R,
    mode: SplitMode,
    pending: VecDeque<String>,
    line: Vec<u8>,
    done: bool,
}

impl<R: BufRead> Tokens<R> {
    /// Create a token stream over `reader`.
    pub fn new(reader: R, mode: SplitMode) -> Self {
        Self {
            reader,
            mode,
            pending: VecDeque::new(),
            line: Vec::new(),
            done: false,
        }
    }

    /// Pull the next chunk of input into `pending`.
    ///
    /// Returns `false` at end of input.
    fn fill(&mut self) -> io::Result<bool> {
        match self.mode {
            SplitMode::Bytes => self.fill_bytes(),
            SplitMode::Words | SplitMode::Lines => self.fill_line(),
        }
    }

    fn fill_bytes(&mut self) -> io::Result<bool> {
        let chunk = self.reader.fill_buf()?;
        if chunk.is_empty() {
            return Ok(false);
        }

        // Latin-1: byte value == code point, so each byte stays distinct
        self.pending
            .extend(chunk.iter().map(|&b| char::from(b).to_string()));

        let consumed = chunk.len();
        self.reader.consume(consumed);
        Ok(true)
    }

    fn fill_line(&mut self) -> io::Result<bool> {
        self.line.clear();
        if self.reader.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(false);
        }

        match self.mode {
            SplitMode::Words => {
                let text = decode(&self.line);
                self.pending.extend(
                    text.split(is_delimiter)
                        .filter(|word| !word.is_empty())
                        .map(str::to_owned),
                );
            },
            SplitMode::Lines => {
                let line = self.line.strip_suffix(b"\n").unwrap_or(&self.line[..]);
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                self.pending.push_back(decode(line).into_owned());
            },
            SplitMode::Bytes => unreachable!("bytes are split by fill_bytes"),
        }

        Ok(true)
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.done {
                return None;
            }
            match self.fill() {
                Ok(true) => {},
                Ok(false) => self.done = true,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {},
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                },
            }
        }
    }
}
