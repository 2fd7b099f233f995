//! Property tests for the invariants, round-trip laws, and boundary
//! behaviors that must hold for arbitrary input, regardless of which
//! pattern engine is driving the matcher.

use proptest::prelude::*;

use slidematch::{
    AcceptIndex, Discipline, GuardChar, MatchView, Matcher, MatcherConfig, PatternBinding,
    PatternEngine, RefillPolicy, SliceSource, NO_MATCH,
};

/// Accepts exactly one byte per SCAN call, unconditionally. Lets the
/// property tests drive a matcher over arbitrary bytes without needing a
/// real pattern compiler.
struct AnyByte;

impl PatternEngine for AnyByte {
    fn try_match(&self, view: &mut MatchView<'_>, discipline: Discipline) -> AcceptIndex {
        if discipline != Discipline::Scan {
            return NO_MATCH;
        }
        let start = view.start();
        match view.get() {
            GuardChar::Byte(_) => {
                view.accept(start, 1);
                1
            }
            _ => NO_MATCH,
        }
    }
}

fn tiny_config() -> MatcherConfig {
    // A capacity much smaller than most generated inputs, so every test
    // forces at least one grow.
    MatcherConfig { initial_capacity: 4, refill_policy: RefillPolicy::Available, allow_shift: true }
}

proptest! {
    /// `first() + size() == last()`, and scanning one byte at a time
    /// reconstructs the original input exactly -- the sentinel/held-char
    /// bookkeeping never corrupts a byte it didn't mean to touch, even
    /// across a grow forced by a tiny initial capacity.
    #[test]
    fn scan_reconstructs_input_byte_by_byte(data in proptest::collection::vec(any::<u8>(), 0..200)) {
        let pattern = AnyByte;
        let mut m = Matcher::with_config(
            SliceSource::new(&data),
            PatternBinding::borrowed(&pattern),
            tiny_config(),
            "",
        );

        let mut rebuilt = Vec::new();
        loop {
            if m.try_match(Discipline::Scan) == NO_MATCH {
                break;
            }
            prop_assert_eq!(m.first() + m.size() as u64, m.last());
            prop_assert_eq!(m.first(), rebuilt.len() as u64);
            rebuilt.extend_from_slice(m.text());
        }
        drop(m);
        prop_assert_eq!(rebuilt, data);
    }

    /// `lineno()` and `columno()` match a from-scratch count over the
    /// absolute prefix ending at `first()`.
    #[test]
    fn lineno_and_columno_match_a_manual_count(data in proptest::collection::vec(
        prop_oneof![Just(b'\n'), any::<u8>()], 0..200
    )) {
        let pattern = AnyByte;
        let mut m = Matcher::with_config(
            SliceSource::new(&data),
            PatternBinding::borrowed(&pattern),
            tiny_config(),
            "",
        );

        while m.try_match(Discipline::Scan) != NO_MATCH {
            let first = m.first() as usize;
            let prefix = &data[..first];
            let expected_lineno = 1 + prefix.iter().filter(|&&b| b == b'\n').count() as u64;
            let expected_columno = match prefix.iter().rposition(|&b| b == b'\n') {
                Some(j) => (first - j - 1) as u64,
                None => first as u64,
            };
            prop_assert_eq!(m.lineno(), expected_lineno);
            prop_assert_eq!(m.columno(), expected_columno);
        }
    }

    /// `reset(); reset()` behaves the same as a single `reset()`: the
    /// matcher re-scans the same source from the same starting state.
    #[test]
    fn double_reset_matches_single_reset(data in proptest::collection::vec(any::<u8>(), 1..50)) {
        let pattern = AnyByte;
        let mut once = Matcher::new(SliceSource::new(&data), PatternBinding::borrowed(&pattern));
        once.reset("");
        let first_once = once.try_match(Discipline::Scan);
        let text_once = once.text().to_vec();

        let mut twice = Matcher::new(SliceSource::new(&data), PatternBinding::borrowed(&pattern));
        twice.reset("");
        twice.reset("");
        let first_twice = twice.try_match(Discipline::Scan);
        let text_twice = twice.text().to_vec();

        prop_assert_eq!(first_once, first_twice);
        prop_assert_eq!(text_once, text_twice);
    }

    /// `input(); unput(c)` leaves the logical buffer contents unchanged:
    /// reading the same byte back out after pushing it back reproduces
    /// the rest of the stream untouched.
    #[test]
    fn input_then_unput_is_a_no_op_on_logical_contents(data in proptest::collection::vec(any::<u8>(), 1..50)) {
        let pattern = AnyByte;
        let mut m = Matcher::new(SliceSource::new(&data), PatternBinding::borrowed(&pattern));
        let consumed = m.input();
        if let GuardChar::Byte(b) = consumed {
            m.unput(b);
            let mut rebuilt = Vec::new();
            loop {
                match m.get() {
                    GuardChar::Byte(b) => rebuilt.push(b),
                    _ => break,
                }
            }
            drop(m);
            prop_assert_eq!(rebuilt, data);
        }
    }

    /// `less(size())` does not change the reported match text.
    #[test]
    fn less_at_full_size_is_a_no_op(data in proptest::collection::vec(any::<u8>(), 1..50)) {
        let pattern = AnyByte;
        let mut m = Matcher::new(SliceSource::new(&data), PatternBinding::borrowed(&pattern));
        if m.try_match(Discipline::Scan) != NO_MATCH {
            let before = m.text().to_vec();
            let n = m.size();
            m.less(n);
            prop_assert_eq!(m.text(), before.as_slice());
        }
    }

    /// `rest()` called again after it has already drained to EOF returns
    /// an empty view.
    #[test]
    fn rest_after_eof_is_idempotently_empty(data in proptest::collection::vec(any::<u8>(), 0..50)) {
        let pattern = AnyByte;
        let mut m = Matcher::new(SliceSource::new(&data), PatternBinding::borrowed(&pattern));
        let _ = m.rest();
        prop_assert!(m.hit_end());
        prop_assert_eq!(m.rest(), b"".as_slice());
    }

    /// Buffer growth triggered by a capacity far smaller than the input
    /// never drops or reorders bytes: scanning byte by byte through a
    /// tiny buffer reconstructs the original input exactly.
    #[test]
    fn grow_under_tiny_capacity_preserves_every_byte(data in proptest::collection::vec(any::<u8>(), 0..300)) {
        let pattern = AnyByte;
        let mut m = Matcher::with_config(
            SliceSource::new(&data),
            PatternBinding::borrowed(&pattern),
            MatcherConfig { initial_capacity: 1, refill_policy: RefillPolicy::Fixed(1), allow_shift: true },
            "",
        );
        let mut rebuilt = Vec::new();
        while m.try_match(Discipline::Scan) != NO_MATCH {
            rebuilt.extend_from_slice(m.text());
        }
        drop(m);
        prop_assert_eq!(rebuilt, data);
    }
}

/// `unput` at the very beginning of the stream (before anything has been
/// read) succeeds and the pushed-back byte is the first thing read back.
#[test]
fn unput_at_pos_zero_succeeds_even_with_a_tiny_buffer() {
    let pattern = AnyByte;
    let mut m = Matcher::with_config(
        SliceSource::new(b"xy"),
        PatternBinding::borrowed(&pattern),
        MatcherConfig { initial_capacity: 1, refill_policy: RefillPolicy::Available, allow_shift: true },
        "",
    );
    m.unput(b'w');
    assert_eq!(m.get(), GuardChar::Byte(b'w'));
    assert_eq!(m.get(), GuardChar::Byte(b'x'));
    assert_eq!(m.get(), GuardChar::Byte(b'y'));
    assert_eq!(m.get(), GuardChar::Eof);
}
