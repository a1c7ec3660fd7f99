//! Emptiness and resolution policies shared by every instance derived from
//! one root.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::absent::Absent;
use crate::error::{Error, Result};
use crate::maybe::Maybe;
use crate::nullish::Nullish;
use crate::resolved::Resolved;

/// Classifies a set value as absent.
pub type IsEmptyFn<T> = dyn Fn(&T) -> bool;

/// Turns a nested instance into a terminal one. The returned instance must
/// already be resolved, otherwise the search fails with [`Error::Resolution`].
pub type ResolveFn<T> = dyn Fn(&Maybe<T>) -> Result<Maybe<T>>;

/// Which emptiness rule a configuration applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    /// Absent when unset or null-equivalent.
    Default,
    /// Absent only when unset.
    Nullable,
    /// Caller-supplied predicate.
    Custom,
}

/// Immutable pair of policies. Cloning shares the same instance.
pub struct Config<T> {
    inner: Rc<Inner<T>>,
}

struct Inner<T> {
    policy: Policy,
    is_empty: Rc<IsEmptyFn<T>>,
    resolve: Rc<ResolveFn<T>>,
}

fn force<T: 'static>(maybe: &Maybe<T>) -> Result<Maybe<T>> {
    maybe.resolved().map(Maybe::from)
}

impl<T: 'static> Config<T> {
    fn from_parts(policy: Policy, is_empty: Rc<IsEmptyFn<T>>, resolve: Rc<ResolveFn<T>>) -> Self {
        Self { inner: Rc::new(Inner { policy, is_empty, resolve }) }
    }

    /// Only the unset marker counts as absent; null-equivalents are values.
    pub fn nullable() -> Self {
        Self::from_parts(Policy::Nullable, Rc::new(|_: &T| false), Rc::new(force::<T>))
    }

    /// Builder seeded with the nullable policies.
    pub fn nullable_builder() -> ConfigBuilder<T> { ConfigBuilder::new(Self::nullable()) }

    /// Builder seeded with this configuration's policies.
    pub fn rebuild(&self) -> ConfigBuilder<T> { ConfigBuilder::new(self.clone()) }

    #[inline]
    pub fn is_empty(&self, value: &T) -> bool { (self.inner.is_empty)(value) }

    /// Resolves a nested instance through the resolver hook.
    pub fn resolve(&self, maybe: &Maybe<T>) -> Result<Resolved<T>> {
        let resolved = (self.inner.resolve)(maybe)?;
        resolved.peek().ok_or_else(|| {
            debug!(policy = ?self.policy(), "resolver returned an unresolved instance");
            Error::Resolution
        })
    }

    /// Runs a possibly-unset value through the emptiness test, producing a
    /// terminal instance that carries this configuration.
    pub fn wrap(&self, value: Option<T>) -> Resolved<T> {
        Absent::new(self.clone()).wrap(value)
    }
}

impl<T> Config<T> {
    #[inline]
    pub fn policy(&self) -> Policy { self.inner.policy }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.inner, &other.inner) }
}

impl<T: Nullish + 'static> Config<T> {
    /// Builder seeded with the default policies.
    pub fn builder() -> ConfigBuilder<T> { ConfigBuilder::new(Self::default()) }
}

impl<T: Nullish + 'static> Default for Config<T> {
    fn default() -> Self {
        Self::from_parts(Policy::Default, Rc::new(|value: &T| value.is_null()), Rc::new(force::<T>))
    }
}

impl<T> Clone for Config<T> {
    fn clone(&self) -> Self { Self { inner: Rc::clone(&self.inner) } }
}

impl<T> fmt::Debug for Config<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config").field("policy", &self.inner.policy).finish_non_exhaustive()
    }
}

/// Completes a partial configuration from a reference one: every policy
/// left unset is taken from the reference.
pub struct ConfigBuilder<T> {
    reference: Config<T>,
    is_empty: Option<Rc<IsEmptyFn<T>>>,
    resolve: Option<Rc<ResolveFn<T>>>,
}

impl<T: 'static> ConfigBuilder<T> {
    pub fn new(reference: Config<T>) -> Self {
        Self { reference, is_empty: None, resolve: None }
    }

    pub fn is_empty(mut self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.is_empty = Some(Rc::new(predicate));
        self
    }

    /// Overrides how nested instances are turned into terminal ones, e.g. to
    /// break reference cycles between lazily produced values.
    pub fn resolve(mut self, resolver: impl Fn(&Maybe<T>) -> Result<Maybe<T>> + 'static) -> Self {
        self.resolve = Some(Rc::new(resolver));
        self
    }

    pub fn build(self) -> Config<T> {
        let reference = &self.reference.inner;
        let policy = if self.is_empty.is_some() { Policy::Custom } else { reference.policy };
        Config::from_parts(
            policy,
            self.is_empty.unwrap_or_else(|| Rc::clone(&reference.is_empty)),
            self.resolve.unwrap_or_else(|| Rc::clone(&reference.resolve)),
        )
    }
}
