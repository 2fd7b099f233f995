//! The single extension point: a trait implemented by whatever concrete
//! pattern-matching engine (DFA, backtracking NFA, ...) sits on top of this
//! core.
//!
//! One abstract capability, injected, rather than a base-class hierarchy.

use crate::buffer::SlidingBuffer;
use crate::charclass::GuardChar;
use crate::discipline::{AcceptIndex, Discipline, NO_MATCH};
use crate::options::Options;
use crate::position::Position;
use crate::source::Source;

/// What an engine subclass must supply: given the current buffer state,
/// find a match under the requested discipline and report where it
/// starts and ends.
///
/// Implementations read through `view`'s [`peek`](MatchView::peek) /
/// [`get`](MatchView::get) / [`byte_at`](MatchView::byte_at), and on
/// success call [`view.accept`](MatchView::accept) before returning the
/// accept index. Returning [`NO_MATCH`] (and leaving `view` untouched)
/// signals failure; the core performs no discipline-specific looping of
/// its own; it's entirely the engine's job to decide what "search
/// forward" (`Find`), "span up to the next match" (`Split`), or "the
/// whole remaining input" (`Match`) mean for its pattern representation.
pub trait PatternEngine {
    /// Attempt a match under `discipline`. See the trait docs for the
    /// contract `view` mutations must satisfy.
    fn try_match(&self, view: &mut MatchView<'_>, discipline: Discipline) -> AcceptIndex;
}

/// The mutable handle an engine uses to read the buffer and record a
/// match. Borrowed for the duration of a single [`PatternEngine::try_match`]
/// call.
pub struct MatchView<'a> {
    buffer: &'a mut SlidingBuffer,
    source: &'a mut dyn Source,
    tracker: &'a mut Position,
    options: &'a Options,
}

impl<'a> MatchView<'a> {
    pub(crate) fn new(
        buffer: &'a mut SlidingBuffer,
        source: &'a mut dyn Source,
        tracker: &'a mut Position,
        options: &'a Options,
    ) -> Self {
        MatchView { buffer, source, tracker, options }
    }

    /// The position a fresh match attempt begins at (`txt_start` at the
    /// time the engine was invoked; equal to `cursor` unless `more()` was
    /// called beforehand).
    pub fn start(&self) -> usize {
        self.buffer.txt_start
    }

    /// The engine's current read position.
    pub fn pos(&self) -> usize {
        self.buffer.pos
    }

    /// Parsed option flags (`A`, `N`, `T=d`) in effect for this match.
    pub fn options(&self) -> Options {
        *self.options
    }

    /// The byte logically preceding `start()`.
    pub fn got_char(&self) -> GuardChar {
        self.buffer.got_char()
    }

    /// Random access into whatever has already been buffered, for
    /// backtracking into left context. Returns `None` past `end()`.
    pub fn byte_at(&self, i: usize) -> Option<u8> {
        self.buffer.window().get(i).copied()
    }

    /// One past the last buffered byte. An engine that wants to look
    /// further ahead should call [`MatchView::get`] or
    /// [`MatchView::peek`], which refill as needed, rather than compare
    /// against this directly.
    pub fn buffered_end(&self) -> usize {
        self.buffer.end()
    }

    /// `buffer[pos]`, refilling from the source if necessary.
    pub fn peek(&mut self) -> GuardChar {
        self.buffer.peek(self.source, self.tracker)
    }

    /// As [`MatchView::peek`], advancing past the returned byte.
    pub fn get(&mut self) -> GuardChar {
        self.buffer.get(self.source, self.tracker)
    }

    /// Advance `pos` by `n` bytes without reading them back, refilling as
    /// needed. Used by engines that have already peeked ahead and just
    /// need to commit the advance.
    pub fn advance(&mut self, n: usize) {
        for _ in 0..n {
            self.get();
        }
    }

    /// Reset the read position back to `start()`, e.g. after a failed
    /// attempt that consumed lookahead.
    pub fn rewind(&mut self) {
        self.buffer.pos = self.buffer.txt_start;
    }

    /// Record a successful match: `[start, start+len)`, with `cursor` and
    /// `pos` both settling at the end of it. Must be called before
    /// returning a nonzero accept index.
    pub fn accept(&mut self, start: usize, len: usize) {
        self.buffer.accept_match(start, len);
    }

    /// Convenience for an engine that only ever returns "no match."
    pub fn reject(&self) -> AcceptIndex {
        NO_MATCH
    }
}
