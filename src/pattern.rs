//! Pattern binding: owning or borrowing a compiled pattern, and rebinding
//! between the two without ever deep-copying the compilation.

use crate::engine::PatternEngine;
use crate::error::Error;

/// A compiled pattern capable of acting as a [`PatternEngine`].
///
/// Implemented by whatever concrete matching engine (DFA, backtracking
/// NFA, ...) sits above this core; compiling a pattern from a source
/// expression is entirely that engine's business; this crate only needs
/// the result to implement [`PatternEngine`].
pub trait Pattern: PatternEngine + Sized {
    /// Compile a pattern from a source expression string.
    fn compile(expr: &str) -> Result<Self, Error>;
}

/// Either borrows a compiled pattern owned elsewhere, or owns one compiled
/// from a source expression.
///
/// Rebinding to a new owned pattern simply replaces the enum value; the
/// previously owned instance is dropped the ordinary way, there is no
/// separate "release" step to get wrong. Borrowing similarly just swaps
/// the reference in, without touching whatever was there before.
pub enum PatternBinding<'p, P> {
    /// A pattern owned elsewhere, borrowed for the lifetime `'p`.
    Borrowed(&'p P),
    /// A pattern this binding compiled and owns outright.
    Owned(P),
}

impl<'p, P> PatternBinding<'p, P> {
    /// Borrow an externally-owned pattern.
    pub fn borrowed(pattern: &'p P) -> Self {
        PatternBinding::Borrowed(pattern)
    }

    /// A read-only view of the bound pattern, regardless of which case
    /// this is.
    pub fn as_ref(&self) -> &P {
        match self {
            PatternBinding::Borrowed(p) => p,
            PatternBinding::Owned(p) => p,
        }
    }

    /// Rebind to a borrowed pattern, dropping whatever was owned before.
    pub fn rebind_borrowed(&mut self, pattern: &'p P) {
        *self = PatternBinding::Borrowed(pattern);
    }

    /// `true` iff this binding owns its pattern outright.
    pub fn is_owned(&self) -> bool {
        matches!(self, PatternBinding::Owned(_))
    }
}

impl<'p, P: Pattern> PatternBinding<'p, P> {
    /// Compile a source expression and own the result.
    pub fn compile(expr: &str) -> Result<Self, Error> {
        Ok(PatternBinding::Owned(P::compile(expr)?))
    }

    /// Rebind to a freshly compiled, owned pattern.
    pub fn rebind_owned(&mut self, expr: &str) -> Result<(), Error> {
        *self = PatternBinding::Owned(P::compile(expr)?);
        Ok(())
    }
}
