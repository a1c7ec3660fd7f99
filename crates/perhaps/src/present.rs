//! Terminal instance holding exactly one value.

use std::fmt;
use std::rc::Rc;

use crate::absent::Absent;
use crate::candidate::{Candidate, Fallback};
use crate::config::Config;
use crate::error::Result;
use crate::resolved::Resolved;

/// Present value. Immutable once built; clones share the instance.
///
/// The emptiness test only decides whether a value becomes `Present`. A
/// `Present` never reports itself empty afterwards.
pub struct Present<T> {
    inner: Rc<Inner<T>>,
}

struct Inner<T> {
    value: T,
    config: Config<T>,
}

impl<T> Present<T> {
    pub(crate) fn new(value: T, config: Config<T>) -> Self {
        Self { inner: Rc::new(Inner { value, config }) }
    }

    #[inline]
    pub fn config(&self) -> &Config<T> { &self.inner.config }

    #[inline]
    pub fn get(&self) -> &T { &self.inner.value }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.inner, &other.inner) }
}

impl<T: 'static> Present<T> {
    #[inline]
    pub fn get_with<R>(&self, transform: impl FnOnce(&T) -> R) -> R { transform(self.get()) }

    #[inline]
    pub fn raw(&self) -> Option<&T> { Some(self.get()) }

    #[inline]
    pub fn raw_with<R>(&self, transform: impl FnOnce(Option<&T>) -> Option<R>) -> Option<R> {
        transform(self.raw())
    }

    #[inline]
    pub fn is_empty(&self) -> bool { false }

    pub fn expected(&self, _message: Option<&str>) -> Present<T> { self.clone() }

    pub fn expected_with<E>(&self, _error: impl FnOnce() -> E) -> Present<T> { self.clone() }

    /// Fallbacks are dropped unevaluated.
    pub fn or<I>(&self, _fallbacks: I) -> Present<T>
    where
        I: IntoIterator,
        I::Item: Into<Fallback<T>>,
    {
        self.clone()
    }

    /// Producers among the candidates are never invoked.
    pub fn or_get<I>(&self, _candidates: I) -> Present<T>
    where
        I: IntoIterator,
        I::Item: Into<Candidate<T>>,
    {
        self.clone()
    }

    pub fn just<I>(&self, _fallbacks: I) -> Present<T>
    where
        I: IntoIterator,
        I::Item: Into<Fallback<T>>,
    {
        self.clone()
    }

    pub fn just_get<I>(&self, _candidates: I) -> Present<T>
    where
        I: IntoIterator,
        I::Item: Into<Candidate<T>>,
    {
        self.clone()
    }

    /// Maps the value and runs the result through a single-candidate
    /// fallback search, so an empty mapped value yields `Absent`.
    pub fn map<F, R>(&self, mapper: F) -> Result<Resolved<T>>
    where
        F: FnOnce(&T) -> R,
        R: Into<Fallback<T>>,
    {
        let mapped = mapper(self.get());
        Absent::new(self.config().clone()).or([mapped])
    }

    /// Returns the mapper's terminal instance as is.
    pub fn flat_map<F, R>(&self, mapper: F) -> Resolved<T>
    where
        F: FnOnce(&T) -> R,
        R: Into<Resolved<T>>,
    {
        mapper(self.get()).into()
    }
}

impl<T> Clone for Present<T> {
    fn clone(&self) -> Self { Self { inner: Rc::clone(&self.inner) } }
}

impl<T: fmt::Debug> fmt::Debug for Present<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Present").field(&self.inner.value).finish()
    }
}
