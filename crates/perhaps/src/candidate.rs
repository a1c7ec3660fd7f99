//! Candidate kinds accepted by the fallback search.
//!
//! The kind of every candidate is fixed when it is built: a raw value, a
//! producer, or another instance. The search never probes a value to guess
//! which one it is.

use std::fmt;

use crate::absent::Absent;
use crate::maybe::Maybe;
use crate::present::Present;
use crate::resolved::Resolved;

/// Zero-argument function whose result is a candidate.
pub type Producer<T> = Box<dyn FnOnce() -> Fallback<T>>;

/// Candidate for `or`/`just`, and the result shape of producers and mappers.
///
/// A callable stored as `Value` is held as an opaque value and never invoked.
pub enum Fallback<T> {
    /// The unset marker. Absent under every policy.
    Unset,
    Value(T),
    Nested(Maybe<T>),
}

/// Candidate for `or_get`/`just_get`: a [`Fallback`] or a producer to invoke.
pub enum Candidate<T> {
    Unset,
    Value(T),
    Producer(Producer<T>),
    Nested(Maybe<T>),
}

impl<T: 'static> Candidate<T> {
    /// Boxes a producer returning anything convertible into a [`Fallback`].
    pub fn producer<F, R>(producer: F) -> Self
    where
        F: FnOnce() -> R + 'static,
        R: Into<Fallback<T>> + 'static,
    {
        Candidate::Producer(Box::new(move || producer().into()))
    }
}

impl<T> From<Option<T>> for Fallback<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Fallback::Value(value),
            None => Fallback::Unset,
        }
    }
}

impl<T> From<Maybe<T>> for Fallback<T> {
    fn from(maybe: Maybe<T>) -> Self { Fallback::Nested(maybe) }
}

impl<T> From<Resolved<T>> for Fallback<T> {
    fn from(resolved: Resolved<T>) -> Self { Fallback::Nested(resolved.into()) }
}

impl<T> From<Present<T>> for Fallback<T> {
    fn from(present: Present<T>) -> Self { Resolved::Present(present).into() }
}

impl<T> From<Absent<T>> for Fallback<T> {
    fn from(absent: Absent<T>) -> Self { Resolved::Absent(absent).into() }
}

impl<T> From<Fallback<T>> for Candidate<T> {
    fn from(fallback: Fallback<T>) -> Self {
        match fallback {
            Fallback::Unset => Candidate::Unset,
            Fallback::Value(value) => Candidate::Value(value),
            Fallback::Nested(maybe) => Candidate::Nested(maybe),
        }
    }
}

impl<T> From<Option<T>> for Candidate<T> {
    fn from(value: Option<T>) -> Self { Fallback::from(value).into() }
}

impl<T> From<Maybe<T>> for Candidate<T> {
    fn from(maybe: Maybe<T>) -> Self { Candidate::Nested(maybe) }
}

impl<T> From<Resolved<T>> for Candidate<T> {
    fn from(resolved: Resolved<T>) -> Self { Candidate::Nested(resolved.into()) }
}

impl<T> From<Present<T>> for Candidate<T> {
    fn from(present: Present<T>) -> Self { Resolved::Present(present).into() }
}

impl<T> From<Absent<T>> for Candidate<T> {
    fn from(absent: Absent<T>) -> Self { Resolved::Absent(absent).into() }
}

impl<T: fmt::Debug> fmt::Debug for Fallback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::Unset => f.write_str("Unset"),
            Fallback::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Fallback::Nested(maybe) => f.debug_tuple("Nested").field(maybe).finish(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Candidate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Unset => f.write_str("Unset"),
            Candidate::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Candidate::Producer(_) => f.write_str("Producer(..)"),
            Candidate::Nested(maybe) => f.debug_tuple("Nested").field(maybe).finish(),
        }
    }
}
