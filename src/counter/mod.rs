//! Exact token frequency counting.
//!
//! [`Counter`] maps each distinct token to the number of times it was seen
//! and answers three selection queries over that histogram:
//!
//! | Query      | Filter                          | Sort (when requested)     |
//! |------------|---------------------------------|---------------------------|
//! | `all`      | none                            | ascending lexicographic   |
//! | `top`      | count >= minimum                | descending count, stable  |
//! | `bottom`   | count <= maximum (if max >= 0)  | ascending count, stable   |
//!
//! Iteration order is insertion order (the first time a token was
//! incremented). Stable sorts fall back to it for tokens with equal counts,
//! so every query is reproducible for a given input.
//!
//! # Example
//!
//! ```
//! use tally::Counter;
//!
//! let mut counter = Counter::new();
//! for _ in 0..10 {
//!     counter.increment("foo");
//! }
//! for _ in 0..5 {
//!     counter.increment("bar");
//! }
//!
//! assert_eq!(counter.all(true), vec!["bar", "foo"]);
//! assert_eq!(counter.top(1, 0, true), vec!["foo"]);
//! assert_eq!(counter.bottom(1, -1, true), vec!["bar"]);
//! ```

pub mod query;

pub use query::{Query, Selection};

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Frequency histogram of string tokens.
///
/// Stored counts are always at least 1; a token that was never incremented
/// has no entry.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Counter {
    counts: IndexMap<String, u64>,
}

impl Counter {
    /// Create an empty counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Increase the count for `token` by 1.
    pub fn increment(&mut self, token: impl AsRef<str>) {
        let token = token.as_ref();
        if let Some(count) = self.counts.get_mut(token) {
            *count += 1;
        } else {
            self.counts.insert(token.to_owned(), 1);
        }
    }

    /// Current count for `token`, 0 if it never occurred.
    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// True if `token` occurred at least once.
    pub fn has(&self, token: &str) -> bool {
        self.counts.contains_key(token)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// `(token, count)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(token, &count)| (token.as_str(), count))
    }

    /// Every distinct token exactly once.
    ///
    /// With `sorted`, tokens are in ascending lexicographic order; otherwise
    /// in insertion order.
    pub fn all(&self, sorted: bool) -> Vec<String> {
        let mut values: Vec<String> = self.counts.keys().cloned().collect();
        if sorted {
            values.sort();
        }
        values
    }

    /// At most `n` tokens that occurred at least `minimum` times.
    ///
    /// With `sort`, tokens are ordered by descending count before truncation,
    /// so `top(1, 0, true)` is the single most frequent token. Without it,
    /// truncation keeps an arbitrary (insertion ordered) subset:
    /// `top(2, 10, false)` returns two tokens seen ten times or more, not
    /// necessarily the two most frequent.
    ///
    /// `n == 0` returns nothing; a negative `n` returns every match.
    pub fn top(&self, n: i64, minimum: i64, sort: bool) -> Vec<String> {
        if n == 0 {
            return Vec::new();
        }

        let mut items: Vec<(&str, u64)> = self
            .iter()
            .filter(|&(_, count)| (count as i64) >= minimum)
            .collect();

        if sort {
            items.sort_by(|a, b| b.1.cmp(&a.1));
        }

        take(items, n)
    }

    /// At most `n` tokens that occurred at most `maximum` times.
    ///
    /// A negative `maximum` disables the threshold. Since stored counts are
    /// at least 1, `maximum == 0` never matches anything. With `sort`, tokens
    /// are ordered by ascending count before truncation.
    ///
    /// `n == 0` returns nothing; a negative `n` returns every match.
    pub fn bottom(&self, n: i64, maximum: i64, sort: bool) -> Vec<String> {
        if n == 0 {
            return Vec::new();
        }

        let mut items: Vec<(&str, u64)> = self
            .iter()
            .filter(|&(_, count)| maximum < 0 || (count as i64) <= maximum)
            .collect();

        if sort {
            items.sort_by(|a, b| a.1.cmp(&b.1));
        }

        take(items, n)
    }
}

/// Keep the first `n` items when `0 < n < len`, otherwise all of them.
fn take(items: Vec<(&str, u64)>, n: i64) -> Vec<String> {
    let limit = match usize::try_from(n) {
        Ok(n) if n > 0 && n < items.len() => n,
        _ => items.len(),
    };
    items
        .into_iter()
        .take(limit)
        .map(|(token, _)| token.to_owned())
        .collect()
}

impl<S: AsRef<str>> Extend<S> for Counter {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for token in iter {
            self.increment(token);
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for Counter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counter = Counter::new();
        counter.extend(iter);
        counter
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.counts.iter()).finish()
    }
}

impl Serialize for Counter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.counts.serialize(serializer)
    }
}
