//! Error types for conditions that are allowed to cross the crate boundary
//! as a `Result`.
//!
//! Most match-time conditions are *not* errors by this crate's own taxonomy
//! (see the crate-level docs): failing to match, hitting end of input, and
//! short reads from a [`Source`](crate::Source) are all routine and are
//! reflected through plain accessor return values instead. Only
//! construction-time conditions -- compiling an owned pattern, or strict
//! option parsing -- produce a `Result`.

use std::fmt;

/// Errors produced while constructing a [`Matcher`](crate::Matcher) or
/// binding a [`Pattern`](crate::Pattern).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Compiling a pattern from a source expression failed.
    ///
    /// Carries whatever the engine's own compiler reported; this crate does
    /// not interpret the message, it only threads it through.
    #[error("failed to compile pattern: {0}")]
    Compile(String),

    /// [`Options::parse_strict`](crate::Options::parse_strict) encountered
    /// an option it does not recognize, or a value out of range (e.g. a tab
    /// width outside `1..=9`).
    #[error("invalid option: {0}")]
    InvalidOption(InvalidOption),
}

/// Detail carried by [`Error::InvalidOption`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidOption {
    /// An option letter that is not one of `A`, `N`, `T`.
    UnknownFlag(char),
    /// `T=d` with `d` outside `1..=9`, or missing entirely.
    TabWidth(String),
}

impl fmt::Display for InvalidOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidOption::UnknownFlag(c) => write!(f, "unknown flag '{c}'"),
            InvalidOption::TabWidth(s) => {
                write!(f, "tab width must be a digit in 1..=9, got {s:?}")
            }
        }
    }
}
