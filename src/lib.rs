//! Streaming input buffer and match-iteration core shared by a family of
//! pattern-matching engines.
//!
//! This crate is the substrate a concrete regex engine (DFA, backtracking
//! NFA, ...) sits on top of: it owns the sliding byte buffer, position
//! bookkeeping, match state, and the four match disciplines, and leaves
//! pattern compilation and execution entirely to whatever implements
//! [`PatternEngine`].
//!
//! ```text
//! Source -> SlidingBuffer -> engine finds a match span -> match state
//!        -> Matcher accessors / MatchIter -> lexer-action primitives
//! ```
//!
//! # Invariants
//!
//! Within a [`SlidingBuffer`] of capacity `M`: `0 <= txt_start <= cursor ==
//! pos <= end <= M` holds once a match has settled (mid-match, `pos` may
//! run ahead of `cursor`). A completed match's [`Matcher::text`] always
//! reads as a contiguous slice with a `0` sentinel one byte past its end,
//! so an engine that wants a C-string-shaped view never has to copy.
//!
//! # Error model
//!
//! Most conditions a lexer cares about -- no match, end of input, a short
//! read from a [`Source`] -- are not errors here; they come back through
//! plain accessor values ([`Matcher::try_match`] returning `0`,
//! [`Matcher::hit_end`], [`GuardChar::Eof`]). [`Error`] is reserved for
//! construction-time failures: compiling an owned pattern, or strict
//! option parsing.

pub mod buffer;
pub mod charclass;
pub mod discipline;
pub mod engine;
pub mod error;
pub mod iter;
pub mod matcher;
pub mod options;
pub mod pattern;
pub mod position;
pub mod source;

pub use buffer::{RefillPolicy, SlidingBuffer, BLOCK};
pub use charclass::GuardChar;
pub use discipline::{AcceptIndex, Discipline, EMPTY_LAST_SPLIT, NO_MATCH};
pub use engine::{MatchView, PatternEngine};
pub use error::{Error, InvalidOption};
pub use iter::MatchIter;
pub use matcher::{Matcher, MatcherConfig};
pub use options::{Options, DEFAULT_TAB_WIDTH};
pub use pattern::{Pattern, PatternBinding};
pub use position::Position;
pub use source::{ReadSource, SliceSource, Source};
