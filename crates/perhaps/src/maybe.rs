//! Lazy facade: defers a producer until first access and memoizes the
//! terminal outcome.

use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::absent::Absent;
use crate::candidate::{Candidate, Fallback, Producer};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::nullish::Nullish;
use crate::present::Present;
use crate::resolved::{Resolved, Visitor};

enum State<T> {
    /// Built without a producer; forcing fails with [`Error::Lazy`].
    Placeholder,
    Pending(Producer<T>),
    /// The producer is running.
    Forcing,
    Resolved(Resolved<T>),
    /// Resolving the producer's result failed. The producer is gone.
    Failed(Error),
}

impl<T> State<T> {
    fn name(&self) -> &'static str {
        match self {
            State::Placeholder => "Placeholder",
            State::Pending(_) => "Pending",
            State::Forcing => "Forcing",
            State::Resolved(_) => "Resolved",
            State::Failed(_) => "Failed",
        }
    }
}

/// Possibly-unresolved optional value.
///
/// Every operation first forces the facade with [`Maybe::resolved`], then
/// delegates to the terminal instance. Clones share state, so forcing one
/// clone memoizes for all of them. Not thread-safe.
pub struct Maybe<T> {
    state: Rc<RefCell<State<T>>>,
    config: Config<T>,
}

impl<T: Nullish + 'static> Maybe<T> {
    /// Absent under the default policy.
    pub fn none() -> Self { Self::none_with(Config::default()) }

    /// Defers `producer` until first access, under the default policy.
    pub fn lazy<F, R>(producer: F) -> Self
    where
        F: FnOnce() -> R + 'static,
        R: Into<Fallback<T>> + 'static,
    {
        Self::lazy_with(Config::default(), producer)
    }

    /// Normalizes a possibly-unset value under the default policy.
    pub fn of(value: Option<T>) -> Self { Self::of_with(Config::default(), value) }
}

impl<T: 'static> Maybe<T> {
    /// Absent under the nullable policy.
    pub fn nullable() -> Self { Self::none_with(Config::nullable()) }

    pub fn lazy_nullable<F, R>(producer: F) -> Self
    where
        F: FnOnce() -> R + 'static,
        R: Into<Fallback<T>> + 'static,
    {
        Self::lazy_with(Config::nullable(), producer)
    }

    /// Like [`Maybe::of`], but a set null-equivalent value stays present.
    pub fn of_nullable(value: Option<T>) -> Self { Self::of_with(Config::nullable(), value) }

    pub fn none_with(config: Config<T>) -> Self {
        Absent::new(config).into()
    }

    pub fn lazy_with<F, R>(config: Config<T>, producer: F) -> Self
    where
        F: FnOnce() -> R + 'static,
        R: Into<Fallback<T>> + 'static,
    {
        Self::with_state(config, State::Pending(Box::new(move || producer().into())))
    }

    pub fn of_with(config: Config<T>, value: Option<T>) -> Self {
        config.wrap(value).into()
    }

    /// Facade with no producer. Every access fails with [`Error::Lazy`].
    pub fn placeholder(config: Config<T>) -> Self { Self::with_state(config, State::Placeholder) }

    fn with_state(config: Config<T>, state: State<T>) -> Self {
        Self { state: Rc::new(RefCell::new(state)), config }
    }

    #[inline]
    pub fn config(&self) -> &Config<T> { &self.config }

    /// Absent instance sharing this facade's configuration.
    pub fn absent(&self) -> Absent<T> { Absent::new(self.config.clone()) }

    /// The cached terminal instance, without forcing.
    pub fn peek(&self) -> Option<Resolved<T>> {
        match &*self.state.borrow() {
            State::Resolved(resolved) => Some(resolved.clone()),
            _ => None,
        }
    }

    /// Forces the facade.
    ///
    /// The producer runs at most once. Its result is searched as a single
    /// fallback candidate against an absent instance of this configuration,
    /// and the outcome is cached for good. Forcing from inside the producer
    /// fails with [`Error::Lazy`] instead of re-entering it.
    pub fn resolved(&self) -> Result<Resolved<T>> {
        let producer = {
            let mut state = self.state.borrow_mut();
            match mem::replace(&mut *state, State::Forcing) {
                State::Pending(producer) => producer,
                State::Resolved(resolved) => {
                    *state = State::Resolved(resolved.clone());
                    return Ok(resolved);
                }
                State::Failed(error) => {
                    *state = State::Failed(error.clone());
                    return Err(error);
                }
                State::Placeholder => {
                    *state = State::Placeholder;
                    debug!("forced a lazy value that has no producer");
                    return Err(Error::Lazy);
                }
                State::Forcing => {
                    debug!("re-entrant forcing of a lazy value");
                    return Err(Error::Lazy);
                }
            }
        };

        trace!(policy = ?self.config.policy(), "forcing lazy value");
        let outcome = self.absent().or([producer()]);
        *self.state.borrow_mut() = match &outcome {
            Ok(resolved) => State::Resolved(resolved.clone()),
            Err(error) => State::Failed(error.clone()),
        };
        match &outcome {
            Ok(resolved) => trace!(present = resolved.is_present(), "lazy value resolved"),
            Err(error) => debug!(%error, "lazy value failed to resolve"),
        }
        outcome
    }

    pub fn get_with<R>(&self, transform: impl FnOnce(&T) -> R) -> Result<R> {
        self.resolved()?.get_with(transform)
    }

    pub fn raw_with<R>(&self, transform: impl FnOnce(Option<&T>) -> Option<R>) -> Result<Option<R>> {
        Ok(self.resolved()?.raw_with(transform))
    }

    pub fn is_empty(&self) -> Result<bool> { Ok(self.resolved()?.is_empty()) }

    pub fn expected(&self, message: Option<&str>) -> Result<Present<T>> {
        self.resolved()?.expected(message)
    }

    /// Fails with the caller's error when absent. Forcing errors are
    /// converted into `E`.
    pub fn expected_with<E>(&self, error: impl FnOnce() -> E) -> Result<Present<T>, E>
    where
        E: From<Error>,
    {
        self.resolved()?.expected_with(error)
    }

    pub fn or<I>(&self, fallbacks: I) -> Result<Resolved<T>>
    where
        I: IntoIterator,
        I::Item: Into<Fallback<T>>,
    {
        self.resolved()?.or(fallbacks)
    }

    pub fn or_get<I>(&self, candidates: I) -> Result<Resolved<T>>
    where
        I: IntoIterator,
        I::Item: Into<Candidate<T>>,
    {
        self.resolved()?.or_get(candidates)
    }

    pub fn just<I>(&self, fallbacks: I) -> Result<Present<T>>
    where
        I: IntoIterator,
        I::Item: Into<Fallback<T>>,
    {
        self.resolved()?.just(fallbacks)
    }

    pub fn just_get<I>(&self, candidates: I) -> Result<Present<T>>
    where
        I: IntoIterator,
        I::Item: Into<Candidate<T>>,
    {
        self.resolved()?.just_get(candidates)
    }

    pub fn map<F, R>(&self, mapper: F) -> Result<Resolved<T>>
    where
        F: FnOnce(&T) -> R,
        R: Into<Fallback<T>>,
    {
        self.resolved()?.map(mapper)
    }

    pub fn flat_map<F, R>(&self, mapper: F) -> Result<Resolved<T>>
    where
        F: FnOnce(&T) -> R,
        R: Into<Resolved<T>>,
    {
        Ok(self.resolved()?.flat_map(mapper))
    }

    pub fn visit(&self, visitor: Visitor<'_, T>) -> Result<Resolved<T>> {
        self.resolved()?.visit(visitor)
    }

    pub fn if_present(&self, on_present: impl FnOnce(&T)) -> Result<Resolved<T>> {
        self.resolved()?.if_present(on_present)
    }

    pub fn if_absent(&self, on_absent: impl FnOnce()) -> Result<Resolved<T>> {
        self.resolved()?.if_absent(on_absent)
    }

    /// Same shared facade.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.state, &other.state) }
}

impl<T: Clone + 'static> Maybe<T> {
    /// The value, or [`Error::Empty`] when absent.
    pub fn get(&self) -> Result<T> { self.resolved()?.get().cloned() }

    /// The value, or the unset marker (`None`) when absent.
    pub fn raw(&self) -> Result<Option<T>> { Ok(self.resolved()?.raw().cloned()) }
}

impl<T> From<Resolved<T>> for Maybe<T> {
    fn from(resolved: Resolved<T>) -> Self {
        let config = match &resolved {
            Resolved::Present(present) => present.config().clone(),
            Resolved::Absent(absent) => absent.config().clone(),
        };
        Self { state: Rc::new(RefCell::new(State::Resolved(resolved))), config }
    }
}

impl<T> From<Present<T>> for Maybe<T> {
    fn from(present: Present<T>) -> Self { Resolved::Present(present).into() }
}

impl<T> From<Absent<T>> for Maybe<T> {
    fn from(absent: Absent<T>) -> Self { Resolved::Absent(absent).into() }
}

impl<T> Clone for Maybe<T> {
    fn clone(&self) -> Self {
        Self { state: Rc::clone(&self.state), config: self.config.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for Maybe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.try_borrow() {
            Ok(state) => match &*state {
                State::Resolved(resolved) => f.debug_tuple("Maybe").field(resolved).finish(),
                other => f.debug_tuple("Maybe").field(&format_args!("{}", other.name())).finish(),
            },
            Err(_) => f.write_str("Maybe(<borrowed>)"),
        }
    }
}
