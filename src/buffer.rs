//! The sliding buffer: a growable byte region holding a window of the
//! input, plus the sentinel-byte discipline that gives a completed match a
//! C-string-shaped view without forcing a copy.
//!
//! This is the largest piece of the core by line count, and the one with
//! the sharpest invariants (see the crate-level docs, I1-I5). Everything
//! else -- position tracking, match state, the discipline dispatcher --
//! either reads from this buffer or tells it to move.

use tracing::{debug, trace};

use crate::charclass::GuardChar;
use crate::position::Position;
use crate::source::Source;

/// Initial and minimal growth quantum. The buffer starts at `2 * BLOCK`.
pub const BLOCK: usize = 4096;

/// How many bytes [`SlidingBuffer::refill`] asks the source for on each
/// call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefillPolicy {
    /// Read whatever currently fits in the trailing free capacity,
    /// growing by one [`BLOCK`] first if there is none. The default.
    Available,
    /// Read exactly `n` bytes per call. `1` gives interactive,
    /// line-at-a-time behavior.
    Fixed(usize),
    /// Grow to fit the source's whole reported size (or one `BLOCK` if
    /// unknown) and read it all in a single call.
    SlurpAll,
}

impl Default for RefillPolicy {
    fn default() -> Self {
        RefillPolicy::Available
    }
}

/// A contiguous byte region of capacity `M`, with logical occupancy
/// `[0, end)` and four tracked positions within `[0, end]`:
/// `txt_start <= cursor == pos <= end <= M` (once a match has completed;
/// mid-match `pos` may run ahead of `cursor`).
#[derive(Debug)]
pub struct SlidingBuffer {
    buf: Vec<u8>,
    end: usize,
    /// First byte of the current match, and the cursor at which the next
    /// match attempt begins when no match is held.
    pub txt_start: usize,
    /// Length of the current match.
    pub txt_len: usize,
    /// Next position to consume after the current match.
    pub cursor: usize,
    /// The engine's read position during matching.
    pub pos: usize,
    /// The byte displaced by the sentinel currently installed at
    /// `held_pos`, or a sentinel meaning "not installed."
    held_char: GuardChar,
    /// Where `held_char` was displaced from. Only meaningful while
    /// `held_char` is a [`GuardChar::Byte`].
    held_pos: usize,
    /// The byte logically preceding `txt_start`.
    got_char: GuardChar,
    /// `true` once the source has signalled true end of input.
    pub eof: bool,
    /// How many bytes to request per refill. See [`RefillPolicy`].
    refill_policy: RefillPolicy,
    /// Whether `grow` may shift in place to close a gap, or must always
    /// reallocate. See [`crate::MatcherConfig::allow_shift`].
    allow_shift: bool,
}

impl SlidingBuffer {
    /// Create an empty buffer with the given initial capacity and refill
    /// policy.
    pub fn new(initial_capacity: usize, refill_policy: RefillPolicy, allow_shift: bool) -> Self {
        SlidingBuffer {
            buf: vec![0u8; initial_capacity.max(1)],
            end: 0,
            txt_start: 0,
            txt_len: 0,
            cursor: 0,
            pos: 0,
            held_char: GuardChar::Unknown,
            held_pos: 0,
            got_char: GuardChar::Bob,
            eof: false,
            refill_policy,
            allow_shift,
        }
    }

    /// Reset all positions to the origin and drop any buffered bytes,
    /// without shrinking the allocation.
    pub fn clear(&mut self) {
        self.end = 0;
        self.txt_start = 0;
        self.txt_len = 0;
        self.cursor = 0;
        self.pos = 0;
        self.held_char = GuardChar::Unknown;
        self.held_pos = 0;
        self.got_char = GuardChar::Bob;
        self.eof = false;
    }

    /// The bytes currently occupying `[0, end)`, i.e. the whole window.
    pub fn window(&self) -> &[u8] {
        &self.buf[..self.end]
    }

    /// The current match view, `[txt_start, txt_start + txt_len)`.
    pub fn text(&self) -> &[u8] {
        &self.buf[self.txt_start..self.txt_start + self.txt_len]
    }

    /// The byte logically preceding `txt_start`.
    pub fn got_char(&self) -> GuardChar {
        self.got_char
    }

    /// Put back whatever byte the sentinel displaced, if any, restoring
    /// `buf[held_pos]` to its true value before `held_pos` stops being
    /// tracked.
    fn restore_held(&mut self) {
        if let GuardChar::Byte(b) = self.held_char {
            if self.held_pos < self.buf.len() {
                self.buf[self.held_pos] = b;
            }
        }
        self.held_char = GuardChar::Unknown;
    }

    fn install_sentinel_at(&mut self, at: usize) {
        self.restore_held();
        if at < self.buf.len() {
            self.held_char = GuardChar::Byte(self.buf[at]);
            self.held_pos = at;
            self.buf[at] = 0;
        } else {
            self.held_char = GuardChar::Unknown;
        }
    }

    /// Save `buffer[pos]` into `held_char` and overwrite it with a `0`
    /// sentinel, giving the current match a C-string-shaped view. Called by
    /// the engine once it has settled on a match's end.
    pub fn install_sentinel(&mut self) {
        self.install_sentinel_at(self.pos);
    }

    /// Returns `buffer[i]` as it logically reads -- `held_char` if `i` is
    /// exactly where the sentinel displaced it from, `buf[i]` otherwise --
    /// without triggering a refill.
    fn logical_byte_at(&self, i: usize) -> Option<u8> {
        if let GuardChar::Byte(b) = self.held_char {
            if i == self.held_pos {
                return Some(b);
            }
        }
        self.buf.get(i).copied()
    }

    /// `buffer[pos]`; on `pos == end` and not EOF, refills first; on
    /// `pos == end && eof`, returns `Eof`.
    pub fn peek<S: Source + ?Sized>(&mut self, source: &mut S, tracker: &mut Position) -> GuardChar {
        if self.pos == self.end && !self.eof {
            self.refill(source, tracker);
        }
        if self.pos == self.end {
            GuardChar::Eof
        } else {
            GuardChar::Byte(self.logical_byte_at(self.pos).unwrap_or(0))
        }
    }

    /// As [`SlidingBuffer::peek`], but advances `pos` past the returned
    /// byte and updates `got_char`.
    pub fn get<S: Source + ?Sized>(&mut self, source: &mut S, tracker: &mut Position) -> GuardChar {
        let c = self.peek(source, tracker);
        if let GuardChar::Byte(b) = c {
            self.pos += 1;
            self.got_char = GuardChar::Byte(b);
        }
        c
    }

    /// Ensure at least `need` free bytes between `end` and capacity,
    /// shifting or reallocating as described in the crate-level docs, and
    /// letting `tracker` absorb whatever prefix is dropped off the front.
    pub fn grow(&mut self, need: usize, tracker: &mut Position) {
        if self.buf.len() - self.end >= need {
            return;
        }
        let gap = self.txt_start;

        if self.allow_shift && gap >= need {
            tracker.absorb_prefix(&self.buf[..gap]);
            self.buf.copy_within(gap..self.end, 0);
            self.shift_positions(gap);
            trace!(gap, need, "grow: shifted in place");
            return;
        }

        let old_capacity = self.buf.len();
        let mut new_capacity = old_capacity.max(BLOCK);
        let occupied_after_shift = self.end - gap;
        while new_capacity - occupied_after_shift < need {
            new_capacity *= 2;
        }

        tracker.absorb_prefix(&self.buf[..gap]);
        let mut new_buf = vec![0u8; new_capacity];
        new_buf[..occupied_after_shift].copy_from_slice(&self.buf[gap..self.end]);
        self.buf = new_buf;
        self.shift_positions(gap);

        debug!(
            old_capacity,
            new_capacity,
            gap,
            need,
            "grow: reallocated"
        );
    }

    fn shift_positions(&mut self, gap: usize) {
        self.end -= gap;
        self.txt_start -= gap;
        self.cursor -= gap;
        self.pos -= gap;
        if let GuardChar::Byte(_) = self.held_char {
            self.held_pos = self.held_pos.saturating_sub(gap);
        }
    }

    /// Position the cursor at an arbitrary, already-buffered location.
    pub fn set_current(&mut self, loc: usize) {
        self.restore_held();
        self.pos = loc;
        self.cursor = loc;
        self.got_char = if loc == 0 {
            GuardChar::Bob
        } else {
            GuardChar::Byte(self.buf[loc - 1])
        };
    }

    /// Read one block from `source` into the window, growing first if the
    /// block wouldn't otherwise fit. Calls `wrap()` on a zero-byte read and
    /// sets `eof` if it refuses. Returns the number of bytes actually
    /// appended.
    pub fn refill<S: Source + ?Sized>(&mut self, source: &mut S, tracker: &mut Position) -> usize {
        if self.eof {
            return 0;
        }
        let (need, cap) = match self.refill_policy {
            RefillPolicy::Fixed(n) => {
                let n = n.max(1);
                (n, n)
            }
            RefillPolicy::Available => {
                let avail = self.buf.len() - self.end;
                let want = if avail == 0 { BLOCK } else { avail };
                (want, want)
            }
            RefillPolicy::SlurpAll => {
                let want = source.size().max(BLOCK);
                (want, want)
            }
        };
        self.grow(need, tracker);

        let upper = (self.end + cap).min(self.buf.len());
        let requested = upper - self.end;
        let n = source.get(&mut self.buf[self.end..upper]);
        if n == 0 {
            let wrapped = source.wrap();
            trace!(wrapped, "refill: wrap()");
            if !wrapped {
                self.eof = true;
            }
            trace!(requested, read = n, eof = self.eof, "refill");
            return 0;
        }
        self.end += n;
        trace!(requested, read = n, eof = self.eof, "refill");
        n
    }

    /// Drain the source until it refuses to `wrap`, growing as needed.
    /// Returns the number of bytes appended.
    pub fn drain_to_eof<S: Source + ?Sized>(&mut self, source: &mut S, tracker: &mut Position) -> usize {
        let mut total = 0;
        loop {
            let n = self.refill(source, tracker);
            total += n;
            if self.eof {
                break;
            }
            if n == 0 {
                // `wrap` accepted but produced nothing yet; try again until
                // it either yields bytes or flips `eof`.
                continue;
            }
        }
        total
    }

    /// Total buffered occupancy, `end`.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Total allocated capacity.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Push a byte back just before `pos`, invalidating the current match.
    /// If `pos == 0` the whole window is shifted right by one (growing if
    /// needed) to make room before byte 0.
    pub fn unput(&mut self, byte: u8, tracker: &mut Position) {
        self.restore_held();
        if self.pos == 0 {
            self.grow(1, tracker);
            self.buf.copy_within(0..self.end, 1);
            self.end += 1;
            self.pos = 1;
        }
        self.pos -= 1;
        self.buf[self.pos] = byte;
        self.cursor = self.pos;
        self.txt_start = self.pos;
        self.txt_len = 0;
        self.got_char = if self.pos == 0 {
            GuardChar::Bob
        } else {
            GuardChar::Byte(self.buf[self.pos - 1])
        };
    }

    /// Consume one more byte after the match without disturbing `text()`.
    pub fn input_byte<S: Source + ?Sized>(
        &mut self,
        source: &mut S,
        tracker: &mut Position,
    ) -> GuardChar {
        self.restore_held();
        let c = self.get(source, tracker);
        self.cursor = self.pos;
        if let GuardChar::Byte(_) = c {
            self.install_sentinel();
        }
        c
    }

    /// Truncate the current match to length `n < txt_len`.
    pub fn less(&mut self, n: usize) {
        debug_assert!(n <= self.txt_len);
        self.restore_held();
        self.txt_len = n;
        self.pos = self.txt_start + n;
        self.cursor = self.pos;
        self.install_sentinel();
    }

    /// Rewind the cursor to `txt_start` so the next match is appended to
    /// the current one.
    pub fn more(&mut self) {
        self.cursor = self.txt_start;
    }

    /// Discard the buffered remainder by moving `pos` to `end`.
    pub fn flush(&mut self) {
        self.restore_held();
        self.pos = self.end;
        self.cursor = self.end;
    }

    /// Force `got_char` to a newline (`true`) or clear any newline anchor
    /// (`false`, becomes [`GuardChar::Bob`]).
    pub fn set_bol(&mut self, bol: bool) {
        self.got_char = if bol { GuardChar::Byte(b'\n') } else { GuardChar::Bob };
    }

    /// Force EOF; when `true`, also flushes the buffered remainder.
    pub fn set_end(&mut self, end: bool) {
        self.eof = end;
        if end {
            self.flush();
        }
    }

    /// `pos == end && (eof || peeking would yield EOF)`.
    pub fn at_end<S: Source + ?Sized>(&mut self, source: &mut S, tracker: &mut Position) -> bool {
        self.pos == self.end && matches!(self.peek(source, tracker), GuardChar::Eof)
    }

    /// `pos == end && eof`, without attempting a refill.
    pub fn hit_end(&self) -> bool {
        self.pos == self.end && self.eof
    }

    /// Record a new accepted match: `[start, start+len)`, with `cursor` and
    /// `pos` both settling at the end of it, and the sentinel installed.
    pub fn accept_match(&mut self, start: usize, len: usize) {
        self.txt_start = start;
        self.txt_len = len;
        self.cursor = start + len;
        self.pos = self.cursor;
        self.install_sentinel();
        self.got_char = if start == 0 {
            GuardChar::Bob
        } else {
            GuardChar::Byte(self.buf[start - 1])
        };
    }
}
