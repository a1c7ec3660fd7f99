//! Terminal instance holding no value, and the fallback search.
//!
//! `or`, `or_get`, `just` and `just_get` all walk their candidates left to
//! right and stop at the first one that yields a present value:
//!
//! | operation  | invokes producers | exhausted search |
//! |------------|-------------------|------------------|
//! | `or`       | no                | `Absent` (self)  |
//! | `or_get`   | yes               | `Absent` (self)  |
//! | `just`     | no                | [`Error::Empty`] |
//! | `just_get` | yes               | [`Error::Empty`] |
//!
//! `or` and `just` take [`Fallback`]s, which have no producer kind at all; a
//! callable passed there is a plain value.

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::candidate::{Candidate, Fallback};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::maybe::Maybe;
use crate::present::Present;
use crate::resolved::Resolved;

/// Absent value. Carries the configuration the search applies.
pub struct Absent<T> {
    inner: Rc<Inner<T>>,
}

struct Inner<T> {
    config: Config<T>,
}

impl<T> Absent<T> {
    pub(crate) fn new(config: Config<T>) -> Self {
        Self { inner: Rc::new(Inner { config }) }
    }

    #[inline]
    pub fn config(&self) -> &Config<T> { &self.inner.config }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.inner, &other.inner) }
}

impl<T: 'static> Absent<T> {
    pub fn get(&self) -> Result<&T> { Err(Error::empty()) }

    pub fn get_with<R>(&self, _transform: impl FnOnce(&T) -> R) -> Result<R> { Err(Error::empty()) }

    /// Always the unset marker.
    #[inline]
    pub fn raw(&self) -> Option<&T> { None }

    /// The transformer is called with the unset marker.
    #[inline]
    pub fn raw_with<R>(&self, transform: impl FnOnce(Option<&T>) -> Option<R>) -> Option<R> {
        transform(None)
    }

    #[inline]
    pub fn is_empty(&self) -> bool { true }

    pub fn expected(&self, message: Option<&str>) -> Result<Present<T>> {
        Err(match message {
            Some(message) => Error::empty_with(message),
            None => Error::empty(),
        })
    }

    pub fn expected_with<E>(&self, error: impl FnOnce() -> E) -> Result<Present<T>, E> {
        Err(error())
    }

    pub fn or<I>(&self, fallbacks: I) -> Result<Resolved<T>>
    where
        I: IntoIterator,
        I::Item: Into<Fallback<T>>,
    {
        self.search(fallbacks.into_iter().map(|fallback| {
            let fallback: Fallback<T> = fallback.into();
            Candidate::from(fallback)
        }))
    }

    pub fn or_get<I>(&self, candidates: I) -> Result<Resolved<T>>
    where
        I: IntoIterator,
        I::Item: Into<Candidate<T>>,
    {
        self.search(candidates.into_iter().map(Into::into))
    }

    pub fn just<I>(&self, fallbacks: I) -> Result<Present<T>>
    where
        I: IntoIterator,
        I::Item: Into<Fallback<T>>,
    {
        require(self.or(fallbacks)?)
    }

    pub fn just_get<I>(&self, candidates: I) -> Result<Present<T>>
    where
        I: IntoIterator,
        I::Item: Into<Candidate<T>>,
    {
        require(self.or_get(candidates)?)
    }

    /// Never calls the mapper.
    pub fn map<F, R>(&self, _mapper: F) -> Absent<T>
    where
        F: FnOnce(&T) -> R,
    {
        self.clone()
    }

    /// Never calls the mapper.
    pub fn flat_map<F, R>(&self, _mapper: F) -> Absent<T>
    where
        F: FnOnce(&T) -> R,
    {
        self.clone()
    }

    /// Single raw-value step of the search. Never fails.
    pub(crate) fn wrap(&self, value: Option<T>) -> Resolved<T> {
        match value {
            Some(value) if !self.config().is_empty(&value) => {
                Resolved::Present(Present::new(value, self.config().clone()))
            }
            _ => Resolved::Absent(self.clone()),
        }
    }

    fn search<I>(&self, candidates: I) -> Result<Resolved<T>>
    where
        I: Iterator<Item = Candidate<T>>,
    {
        let mut examined = 0usize;
        for candidate in candidates {
            let position = examined;
            examined += 1;
            let fallback = match candidate {
                Candidate::Unset => continue,
                Candidate::Value(value) => Fallback::Value(value),
                Candidate::Nested(maybe) => Fallback::Nested(maybe),
                Candidate::Producer(producer) => producer(),
            };
            let found = match fallback {
                Fallback::Unset => None,
                Fallback::Value(value) => self.wrap(Some(value)).into_present(),
                Fallback::Nested(maybe) => self.adopt(&maybe)?,
            };
            if let Some(present) = found {
                trace!(position, policy = ?self.config().policy(), "fallback search hit");
                return Ok(Resolved::Present(present));
            }
        }
        trace!(examined, policy = ?self.config().policy(), "fallback search exhausted");
        Ok(Resolved::Absent(self.clone()))
    }

    /// Resolves a nested instance with this configuration's resolver.
    fn adopt(&self, maybe: &Maybe<T>) -> Result<Option<Present<T>>> {
        Ok(self.config().resolve(maybe)?.into_present())
    }
}

fn require<T>(resolved: Resolved<T>) -> Result<Present<T>> {
    match resolved {
        Resolved::Present(present) => Ok(present),
        Resolved::Absent(_) => Err(Error::empty()),
    }
}

impl<T> Clone for Absent<T> {
    fn clone(&self) -> Self { Self { inner: Rc::clone(&self.inner) } }
}

impl<T> fmt::Debug for Absent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Absent").field(&self.inner.config.policy()).finish()
    }
}
