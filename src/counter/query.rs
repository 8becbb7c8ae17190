//! Selection queries over a [`Counter`].
//!
//! A [`Query`] is the validated form of what the user asked for on the
//! command line; running it against a populated counter yields a
//! [`Selection`] ready for rendering.

use std::fmt;

use serde::{Serialize, Serializer};

use super::Counter;
use crate::error::{Result, TallyError};

/// What to report from the histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// The full token -> count mapping
    Dump,
    /// Every distinct token
    All {
        /// Sort lexicographically
        sort: bool,
    },
    /// Most frequent tokens
    Top {
        /// Maximum number of tokens to return
        number: i64,
        /// Minimum count a token needs to be selected
        minimum: i64,
        /// Sort by descending count before truncating
        sort: bool,
    },
    /// Least frequent tokens
    Bottom {
        /// Maximum number of tokens to return
        number: i64,
        /// Maximum count a token may have to be selected (negative: no limit)
        maximum: i64,
        /// Sort by ascending count before truncating
        sort: bool,
    },
}

impl Query {
    /// Get descriptive name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dump => "dump",
            Self::All { .. } => "all",
            Self::Top { .. } => "top",
            Self::Bottom { .. } => "bottom",
        }
    }

    /// Reject parameter combinations the command line does not allow.
    ///
    /// The counter itself accepts any values; these rules keep the CLI from
    /// asking questions with trivially empty answers.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Dump | Self::All { .. } => Ok(()),
            Self::Top {
                number, minimum, ..
            } => {
                check_number(number)?;
                if minimum < 0 {
                    return Err(TallyError::Config(format!(
                        "minimum is {minimum}, expecting value greater than or equal to zero"
                    )));
                }
                Ok(())
            },
            Self::Bottom {
                number, maximum, ..
            } => {
                check_number(number)?;
                if maximum == 0 {
                    return Err(TallyError::Config(format!(
                        "maximum is {maximum}, expecting value not equal to zero"
                    )));
                }
                Ok(())
            },
        }
    }

    /// Run the query against a populated counter.
    pub fn run<'a>(&self, counter: &'a Counter) -> Selection<'a> {
        match *self {
            Self::Dump => Selection::Histogram(counter),
            Self::All { sort } => Selection::Values(counter.all(sort)),
            Self::Top {
                number,
                minimum,
                sort,
            } => Selection::Values(counter.top(number, minimum, sort)),
            Self::Bottom {
                number,
                maximum,
                sort,
            } => Selection::Values(counter.bottom(number, maximum, sort)),
        }
    }
}

fn check_number(number: i64) -> Result<()> {
    if number <= 0 {
        return Err(TallyError::Config(format!(
            "number is {number}, expecting value greater than zero"
        )));
    }
    Ok(())
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result of a [`Query`].
#[derive(Clone, PartialEq, Eq)]
pub enum Selection<'a> {
    /// The whole histogram, borrowed from the counter
    Histogram(&'a Counter),
    /// Owned, ordered list of distinct tokens
    Values(Vec<String>),
}

impl Selection<'_> {
    /// Number of entries in the selection
    pub fn len(&self) -> usize {
        match self {
            Self::Histogram(counter) => counter.len(),
            Self::Values(values) => values.len(),
        }
    }

    /// True if nothing was selected
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Selection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Histogram(counter) => fmt::Debug::fmt(counter, f),
            Self::Values(values) => fmt::Debug::fmt(values, f),
        }
    }
}

impl Serialize for Selection<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Histogram(counter) => counter.serialize(serializer),
            Self::Values(values) => values.serialize(serializer),
        }
    }
}
