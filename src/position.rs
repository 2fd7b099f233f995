//! Line/column/offset bookkeeping for the origin of the sliding buffer.
//!
//! The tracker describes the logical coordinate of `buffer[0]` in the
//! original stream. It never looks at bytes past the current buffer window;
//! every update is driven by the buffer handing it exactly the prefix that
//! is about to be dropped (via `grow`'s shift-or-reallocate) so the tracker
//! can absorb it before those bytes are gone for good.

/// `(line_no, col_no, abs_offset)` for the byte currently at index 0 of the
/// sliding buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    /// Zero-based line number of `buffer[0]`.
    pub line_no: u64,
    /// Zero-based column number of `buffer[0]`, in bytes.
    pub col_no: u64,
    /// Absolute byte offset of `buffer[0]` from the start of the stream.
    pub abs_offset: u64,
}

impl Position {
    /// A tracker positioned at the very start of a stream.
    pub fn origin() -> Position {
        Position::default()
    }

    /// Absorb a prefix of bytes that is about to be dropped from the front
    /// of the buffer (closing a gap, or copying into a larger allocation
    /// after the gap bytes are gone). Advances all three fields so they
    /// keep describing the new `buffer[0]`.
    pub fn absorb_prefix(&mut self, prefix: &[u8]) {
        self.abs_offset += prefix.len() as u64;

        let mut rest = prefix;
        let mut newlines = 0u64;
        let mut tail_from_last_newline = 0u64;
        while let Some(i) = memchr::memchr(b'\n', rest) {
            newlines += 1;
            tail_from_last_newline = 0;
            rest = &rest[i + 1..];
        }
        tail_from_last_newline += rest.len() as u64;

        if newlines > 0 {
            self.line_no += newlines;
            self.col_no = tail_from_last_newline;
        } else {
            self.col_no += tail_from_last_newline;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_newlines_just_accumulates_column() {
        let mut p = Position::origin();
        p.absorb_prefix(b"abc");
        assert_eq!(p, Position { line_no: 0, col_no: 3, abs_offset: 3 });
        p.absorb_prefix(b"de");
        assert_eq!(p, Position { line_no: 0, col_no: 5, abs_offset: 5 });
    }

    #[test]
    fn newline_resets_column_and_bumps_line() {
        let mut p = Position::origin();
        p.absorb_prefix(b"ab\ncd");
        assert_eq!(p, Position { line_no: 1, col_no: 2, abs_offset: 5 });
    }

    #[test]
    fn multiple_newlines_in_one_prefix() {
        let mut p = Position::origin();
        p.absorb_prefix(b"a\nb\nc");
        assert_eq!(p, Position { line_no: 2, col_no: 1, abs_offset: 5 });
    }

    #[test]
    fn trailing_newline_resets_column_to_zero() {
        let mut p = Position::origin();
        p.absorb_prefix(b"abc\n");
        assert_eq!(p, Position { line_no: 1, col_no: 0, abs_offset: 4 });
    }

    #[test]
    fn empty_prefix_is_noop() {
        let mut p = Position::origin();
        p.absorb_prefix(b"");
        assert_eq!(p, Position::origin());
    }
}
