//! The Byte Source Adapter contract, plus two concrete producers.
//!
//! This crate treats pattern compilation and execution as external
//! collaborators, but a byte source is narrow enough -- and every consumer
//! needs at least one -- that it is worth shipping a couple of reference
//! implementations: an in-memory slice and a thin wrapper over
//! `std::io::Read`.

use std::io;

/// An opaque producer of bytes, read in blocks by the sliding buffer.
///
/// A short read (`0 < k < dst.len()`) is not EOF by itself; the buffer only
/// treats `k == 0` as a possible end of input, and even then consults
/// [`Source::wrap`] before giving up.
pub trait Source {
    /// Fill as much of `dst` as is available right now, returning the
    /// number of bytes written. `0` signals "nothing more without calling
    /// `wrap`."
    fn get(&mut self, dst: &mut [u8]) -> usize;

    /// Total known byte count, if known in advance. `0` means unknown.
    fn size(&self) -> usize {
        0
    }

    /// Called when `get` has returned `0`. Returning `true` means the
    /// source rotated to a new logical source and a further `get` may
    /// produce more bytes; returning `false` (the default) means true EOF.
    fn wrap(&mut self) -> bool {
        false
    }
}

/// An in-memory byte source, the common case for tests and short-lived
/// matches.
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    remaining: &'a [u8],
}

impl<'a> SliceSource<'a> {
    /// Wrap a byte slice as a source. The whole slice is reported as
    /// [`Source::size`].
    pub fn new(data: &'a [u8]) -> Self {
        SliceSource { remaining: data }
    }
}

impl Source for SliceSource<'_> {
    fn get(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.remaining.len());
        dst[..n].copy_from_slice(&self.remaining[..n]);
        self.remaining = &self.remaining[n..];
        n
    }

    fn size(&self) -> usize {
        self.remaining.len()
    }
}

/// Adapts any [`std::io::Read`] into a [`Source`].
///
/// Read errors are not part of the `Source` contract (see the crate-level
/// error taxonomy: a source's own I/O failures are its business, not this
/// core's). `ReadSource` treats an error the same as a short read of `0`
/// bytes, and remembers the error so a caller can inspect it afterward via
/// [`ReadSource::last_error`].
pub struct ReadSource<R> {
    reader: R,
    last_error: Option<io::Error>,
}

impl<R: io::Read> ReadSource<R> {
    /// Wrap a reader as a source.
    pub fn new(reader: R) -> Self {
        ReadSource { reader, last_error: None }
    }

    /// The most recent I/O error observed by `get`, if any.
    pub fn last_error(&self) -> Option<&io::Error> {
        self.last_error.as_ref()
    }

    /// Unwrap back to the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: io::Read> Source for ReadSource<R> {
    fn get(&mut self, dst: &mut [u8]) -> usize {
        match self.reader.read(dst) {
            Ok(n) => n,
            Err(e) => {
                self.last_error = Some(e);
                0
            }
        }
    }
}
