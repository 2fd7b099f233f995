//! The four match disciplines and the accept-index type they report through.

/// Which kind of match a [`Matcher`](crate::Matcher) should attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Discipline {
    /// Match the pattern starting exactly at the cursor; fail if no prefix
    /// of the remaining input matches.
    Scan,
    /// Search forward from the cursor; skipped bytes become an unreported
    /// pre-match region.
    Find,
    /// Return the span up to (but excluding) the next pattern match; the
    /// pattern itself is consumed.
    Split,
    /// Succeed iff the entire remaining input matches and the next byte is
    /// EOF.
    Match,
}

/// Engine-defined positive integer identifying which alternative of a
/// pattern matched. `0` means "no match."
pub type AcceptIndex = u32;

/// No match occurred.
pub const NO_MATCH: AcceptIndex = 0;

/// Sentinel `accept_index` meaning "this is the final, empty span yielded
/// by a `SPLIT` discipline at end of input," distinct from any ordinary
/// capture ordinal an engine could report.
pub const EMPTY_LAST_SPLIT: AcceptIndex = AcceptIndex::MAX;
