//! The matcher: buffer, position tracker, match state, pattern binding and
//! options rolled into the single object a lexer action set operates on.

use tracing::trace;

use crate::buffer::{RefillPolicy, SlidingBuffer, BLOCK};
use crate::charclass::GuardChar;
use crate::discipline::{AcceptIndex, Discipline, NO_MATCH};
use crate::engine::{MatchView, PatternEngine};
use crate::options::Options;
use crate::pattern::PatternBinding;
use crate::position::Position;
use crate::source::Source;

/// Buffer-mechanics knobs, independent of the match-time [`Options`].
///
/// A host wires this up from its own configuration surface (env, CLI
/// flags, a config file); this crate never reaches into any of those
/// itself.
#[derive(Clone, Copy, Debug)]
pub struct MatcherConfig {
    /// Initial buffer capacity. Default: `2 * BLOCK`.
    pub initial_capacity: usize,
    /// How many bytes to request per refill. Default:
    /// [`RefillPolicy::Available`].
    pub refill_policy: RefillPolicy,
    /// Whether `grow` may shift in place to close a gap rather than
    /// always reallocating. Disabling this trades some throughput for a
    /// hard ceiling: a host that cannot tolerate memmove-sized pauses on
    /// huge single matches can force every growth to be a fresh
    /// allocation instead.
    pub allow_shift: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        MatcherConfig {
            initial_capacity: 2 * BLOCK,
            refill_policy: RefillPolicy::Available,
            allow_shift: true,
        }
    }
}

/// The streaming input buffer and match-iteration core, generic over the
/// injected engine `P`.
pub struct Matcher<'m, P> {
    buffer: SlidingBuffer,
    source: Box<dyn Source + 'm>,
    tracker: Position,
    options: Options,
    pattern: PatternBinding<'m, P>,
    accept_index: AcceptIndex,
    full_match_memo: Option<AcceptIndex>,
}

impl<'m, P: PatternEngine> Matcher<'m, P> {
    /// Construct with default [`MatcherConfig`] and default [`Options`].
    pub fn new(source: impl Source + 'm, pattern: PatternBinding<'m, P>) -> Self {
        Matcher::with_config(source, pattern, MatcherConfig::default(), "")
    }

    /// Construct with explicit buffer mechanics and an options string (see
    /// [`Options::parse`]).
    pub fn with_config(
        source: impl Source + 'm,
        pattern: PatternBinding<'m, P>,
        config: MatcherConfig,
        options_spec: &str,
    ) -> Self {
        Matcher {
            buffer: SlidingBuffer::new(
                config.initial_capacity,
                config.refill_policy,
                config.allow_shift,
            ),
            source: Box::new(source),
            tracker: Position::origin(),
            options: Options::parse(options_spec),
            pattern,
            accept_index: NO_MATCH,
            full_match_memo: None,
        }
    }

    /// Clear match state, the position tracker, and the buffered window,
    /// and reparse `options_spec`. The pattern binding and the identity of
    /// the source are untouched; bytes not yet consumed by the source
    /// itself will be read again on the next refill.
    pub fn reset(&mut self, options_spec: &str) {
        self.buffer.clear();
        self.tracker = Position::origin();
        self.options = Options::parse(options_spec);
        self.accept_index = NO_MATCH;
        self.full_match_memo = None;
    }

    /// Replace the source and perform the same reset [`Matcher::reset`]
    /// does, keeping the current options and pattern binding.
    pub fn rebind_source(&mut self, source: impl Source + 'm) {
        self.buffer.clear();
        self.tracker = Position::origin();
        self.accept_index = NO_MATCH;
        self.full_match_memo = None;
        self.source = Box::new(source);
    }

    /// Rebind to a pattern borrowed from elsewhere.
    pub fn rebind_pattern(&mut self, pattern: &'m P) {
        self.pattern.rebind_borrowed(pattern);
    }

    /// Clear `accept_index` and the full-match memo without touching the
    /// buffer, position tracker, or options -- the match-state half of
    /// what [`Matcher::reset`] does. Called before the first `try_match`
    /// of a [`crate::iter::MatchIter`] so a stale result from whatever was
    /// done to this matcher before never leaks into a fresh iteration.
    pub(crate) fn clear_match_state(&mut self) {
        self.accept_index = NO_MATCH;
        self.full_match_memo = None;
    }

    /// Drive the injected engine under `discipline`, updating match state
    /// and returning the accept index (`0` = no match).
    pub fn try_match(&mut self, discipline: Discipline) -> AcceptIndex {
        if discipline == Discipline::Match {
            if let Some(memo) = self.full_match_memo {
                trace!(memo, "match: served from full_match_memo");
                return memo;
            }
        } else {
            self.full_match_memo = None;
        }

        self.buffer.set_current(self.buffer.cursor);
        self.buffer.txt_start = self.buffer.cursor;
        self.buffer.txt_len = 0;

        let accept = {
            let mut view =
                MatchView::new(&mut self.buffer, self.source.as_mut(), &mut self.tracker, &self.options);
            self.pattern.as_ref().try_match(&mut view, discipline)
        };
        self.accept_index = accept;
        if discipline == Discipline::Match {
            self.full_match_memo = Some(accept);
        }
        accept
    }

    /// The accept index from the most recent [`Matcher::try_match`].
    pub fn accept_index(&self) -> AcceptIndex {
        self.accept_index
    }

    /// `true` iff the most recent [`Matcher::try_match`] succeeded.
    pub fn matched(&self) -> bool {
        self.accept_index != NO_MATCH
    }

    /// The current match view.
    pub fn text(&self) -> &[u8] {
        self.buffer.text()
    }

    /// Length of the current match, in bytes.
    pub fn size(&self) -> usize {
        self.buffer.text().len()
    }

    /// Absolute stream offset of the match's first byte.
    pub fn first(&self) -> u64 {
        self.tracker.abs_offset + self.buffer.txt_start as u64
    }

    /// Absolute stream offset one past the match's last byte.
    pub fn last(&self) -> u64 {
        self.first() + self.size() as u64
    }

    /// 1-based line number of the match's first byte.
    pub fn lineno(&self) -> u64 {
        let prefix = &self.buffer.window()[..self.buffer.txt_start];
        let newlines = memchr::memchr_iter(b'\n', prefix).count() as u64;
        self.tracker.line_no + newlines + 1
    }

    /// Column of the match's first byte, counted in bytes from the start
    /// of its line.
    pub fn columno(&self) -> u64 {
        let prefix = &self.buffer.window()[..self.buffer.txt_start];
        match memchr::memrchr(b'\n', prefix) {
            Some(j) => (self.buffer.txt_start - (j + 1)) as u64,
            None => self.tracker.col_no + self.buffer.txt_start as u64,
        }
    }

    /// Consume one more byte after the match, without disturbing
    /// `text()`.
    pub fn input(&mut self) -> GuardChar {
        self.full_match_memo = None;
        self.buffer.input_byte(self.source.as_mut(), &mut self.tracker)
    }

    /// Look at, but do not consume, the next byte.
    pub fn peek(&mut self) -> GuardChar {
        self.buffer.peek(self.source.as_mut(), &mut self.tracker)
    }

    /// Consume and return the next byte.
    pub fn get(&mut self) -> GuardChar {
        self.full_match_memo = None;
        self.buffer.get(self.source.as_mut(), &mut self.tracker)
    }

    /// Push a byte back at the cursor, invalidating the current match.
    pub fn unput(&mut self, byte: u8) {
        self.full_match_memo = None;
        self.accept_index = NO_MATCH;
        self.buffer.unput(byte, &mut self.tracker);
    }

    /// Mark that the next match should be appended to the current one.
    pub fn more(&mut self) {
        self.full_match_memo = None;
        self.buffer.more();
    }

    /// Truncate the current match to length `n`. `n` must not exceed
    /// [`Matcher::size`].
    pub fn less(&mut self, n: usize) {
        self.full_match_memo = None;
        self.buffer.less(n);
    }

    /// Drain the source to EOF and return the entire remaining buffer as
    /// the match view.
    pub fn rest(&mut self) -> &[u8] {
        self.full_match_memo = None;
        let start = self.buffer.cursor;
        self.buffer.drain_to_eof(self.source.as_mut(), &mut self.tracker);
        let len = self.buffer.end() - start;
        self.buffer.accept_match(start, len);
        self.buffer.text()
    }

    /// Discard the buffered remainder.
    pub fn flush(&mut self) {
        self.full_match_memo = None;
        self.buffer.flush();
    }

    /// Force `got_char` to a newline (`true`) or clear any newline anchor
    /// (`false`).
    pub fn set_bol(&mut self, bol: bool) {
        self.full_match_memo = None;
        self.buffer.set_bol(bol);
    }

    /// Force EOF; when `true`, also flushes.
    pub fn set_end(&mut self, end: bool) {
        self.full_match_memo = None;
        self.buffer.set_end(end);
    }

    /// `true` iff the match start coincides with the beginning of the
    /// buffer (no preceding character).
    pub fn at_bob(&self) -> bool {
        self.buffer.got_char().is_bob()
    }

    /// `true` iff there is nothing left to read, possibly after refilling
    /// to find out.
    pub fn at_end(&mut self) -> bool {
        self.buffer.at_end(self.source.as_mut(), &mut self.tracker)
    }

    /// `true` iff the buffer has already observed true EOF, without
    /// attempting a refill.
    pub fn hit_end(&self) -> bool {
        self.buffer.hit_end()
    }

    /// `true` iff the byte preceding the match start is a newline.
    pub fn at_bol(&self) -> bool {
        self.buffer.got_char().is_newline()
    }

    /// Parsed option flags currently in effect.
    pub fn options(&self) -> Options {
        self.options
    }

    /// A streaming iterator that repeatedly drives this matcher under
    /// `discipline`. See [`crate::iter::MatchIter`].
    pub fn iter(&mut self, discipline: Discipline) -> crate::iter::MatchIter<'_, 'm, P> {
        crate::iter::MatchIter::new(self, discipline)
    }
}
