//! Closed sum of the two terminal states.

use std::fmt;

use crate::absent::Absent;
use crate::candidate::{Candidate, Fallback};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::present::Present;

/// Outcome of resolving an instance: exactly one of present or absent.
pub enum Resolved<T> {
    Present(Present<T>),
    Absent(Absent<T>),
}

impl<T: 'static> Resolved<T> {
    pub fn config(&self) -> &Config<T> {
        match self {
            Resolved::Present(present) => present.config(),
            Resolved::Absent(absent) => absent.config(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool { matches!(self, Resolved::Absent(_)) }

    #[inline]
    pub fn is_present(&self) -> bool { !self.is_empty() }

    pub fn get(&self) -> Result<&T> {
        match self {
            Resolved::Present(present) => Ok(present.get()),
            Resolved::Absent(absent) => absent.get(),
        }
    }

    pub fn get_with<R>(&self, transform: impl FnOnce(&T) -> R) -> Result<R> {
        match self {
            Resolved::Present(present) => Ok(present.get_with(transform)),
            Resolved::Absent(absent) => absent.get_with(transform),
        }
    }

    pub fn raw(&self) -> Option<&T> {
        match self {
            Resolved::Present(present) => present.raw(),
            Resolved::Absent(absent) => absent.raw(),
        }
    }

    pub fn raw_with<R>(&self, transform: impl FnOnce(Option<&T>) -> Option<R>) -> Option<R> {
        match self {
            Resolved::Present(present) => present.raw_with(transform),
            Resolved::Absent(absent) => absent.raw_with(transform),
        }
    }

    pub fn expected(&self, message: Option<&str>) -> Result<Present<T>> {
        match self {
            Resolved::Present(present) => Ok(present.expected(message)),
            Resolved::Absent(absent) => absent.expected(message),
        }
    }

    pub fn expected_with<E>(&self, error: impl FnOnce() -> E) -> Result<Present<T>, E> {
        match self {
            Resolved::Present(present) => Ok(present.expected_with(error)),
            Resolved::Absent(absent) => absent.expected_with(error),
        }
    }

    pub fn or<I>(&self, fallbacks: I) -> Result<Resolved<T>>
    where
        I: IntoIterator,
        I::Item: Into<Fallback<T>>,
    {
        match self {
            Resolved::Present(present) => Ok(Resolved::Present(present.or(fallbacks))),
            Resolved::Absent(absent) => absent.or(fallbacks),
        }
    }

    pub fn or_get<I>(&self, candidates: I) -> Result<Resolved<T>>
    where
        I: IntoIterator,
        I::Item: Into<Candidate<T>>,
    {
        match self {
            Resolved::Present(present) => Ok(Resolved::Present(present.or_get(candidates))),
            Resolved::Absent(absent) => absent.or_get(candidates),
        }
    }

    pub fn just<I>(&self, fallbacks: I) -> Result<Present<T>>
    where
        I: IntoIterator,
        I::Item: Into<Fallback<T>>,
    {
        match self {
            Resolved::Present(present) => Ok(present.just(fallbacks)),
            Resolved::Absent(absent) => absent.just(fallbacks),
        }
    }

    pub fn just_get<I>(&self, candidates: I) -> Result<Present<T>>
    where
        I: IntoIterator,
        I::Item: Into<Candidate<T>>,
    {
        match self {
            Resolved::Present(present) => Ok(present.just_get(candidates)),
            Resolved::Absent(absent) => absent.just_get(candidates),
        }
    }

    pub fn map<F, R>(&self, mapper: F) -> Result<Resolved<T>>
    where
        F: FnOnce(&T) -> R,
        R: Into<Fallback<T>>,
    {
        match self {
            Resolved::Present(present) => present.map(mapper),
            Resolved::Absent(absent) => Ok(Resolved::Absent(absent.map(mapper))),
        }
    }

    pub fn flat_map<F, R>(&self, mapper: F) -> Resolved<T>
    where
        F: FnOnce(&T) -> R,
        R: Into<Resolved<T>>,
    {
        match self {
            Resolved::Present(present) => present.flat_map(mapper),
            Resolved::Absent(absent) => Resolved::Absent(absent.flat_map(mapper)),
        }
    }

    /// Dispatches only on an absent value: the absent handler runs when
    /// given, otherwise the present handler is asked for the value, which
    /// fails with [`Error::Empty`] before the handler is called. A present
    /// value runs no handler.
    // NOTE: suspect behavior, kept for compatibility. `if_present` never
    // fires, and a present-only visitor on an absent value is an error.
    pub fn visit(&self, visitor: Visitor<'_, T>) -> Result<Resolved<T>> {
        let Visitor { present, absent } = visitor;
        if let Resolved::Absent(_) = self {
            match (absent, present) {
                (Some(on_absent), _) => on_absent(),
                (None, Some(on_present)) => on_present(self.get()?),
                (None, None) => {}
            }
        }
        Ok(self.clone())
    }

    pub fn if_present(&self, on_present: impl FnOnce(&T)) -> Result<Resolved<T>> {
        self.visit(Visitor::new().present(on_present))
    }

    pub fn if_absent(&self, on_absent: impl FnOnce()) -> Result<Resolved<T>> {
        self.visit(Visitor::new().absent(on_absent))
    }

    /// `Error::Empty` when absent, the shared present instance otherwise.
    pub fn present(&self) -> Result<&Present<T>> {
        match self {
            Resolved::Present(present) => Ok(present),
            Resolved::Absent(_) => Err(Error::empty()),
        }
    }

    pub fn into_present(self) -> Option<Present<T>> {
        match self {
            Resolved::Present(present) => Some(present),
            Resolved::Absent(_) => None,
        }
    }

    /// Instance identity: same variant and same shared instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Resolved::Present(a), Resolved::Present(b)) => a.ptr_eq(b),
            (Resolved::Absent(a), Resolved::Absent(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl<T: Clone + 'static> Resolved<T> {
    pub fn into_option(self) -> Option<T> { self.raw().cloned() }
}

impl<T> Clone for Resolved<T> {
    fn clone(&self) -> Self {
        match self {
            Resolved::Present(present) => Resolved::Present(present.clone()),
            Resolved::Absent(absent) => Resolved::Absent(absent.clone()),
        }
    }
}

impl<T> From<Present<T>> for Resolved<T> {
    fn from(present: Present<T>) -> Self { Resolved::Present(present) }
}

impl<T> From<Absent<T>> for Resolved<T> {
    fn from(absent: Absent<T>) -> Self { Resolved::Absent(absent) }
}

impl<T: fmt::Debug> fmt::Debug for Resolved<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Present(present) => present.fmt(f),
            Resolved::Absent(absent) => absent.fmt(f),
        }
    }
}

/// Optional handlers for [`Resolved::visit`].
pub struct Visitor<'a, T> {
    present: Option<Box<dyn FnOnce(&T) + 'a>>,
    absent: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a, T> Visitor<'a, T> {
    pub fn new() -> Self { Self { present: None, absent: None } }

    pub fn present(mut self, on_present: impl FnOnce(&T) + 'a) -> Self {
        self.present = Some(Box::new(on_present));
        self
    }

    pub fn absent(mut self, on_absent: impl FnOnce() + 'a) -> Self {
        self.absent = Some(Box::new(on_absent));
        self
    }
}

impl<T> Default for Visitor<'_, T> {
    fn default() -> Self { Self::new() }
}

impl<T> fmt::Debug for Visitor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visitor")
            .field("present", &self.present.is_some())
            .field("absent", &self.absent.is_some())
            .finish()
    }
}
