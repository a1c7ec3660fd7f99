//! Error kinds raised by the optional-value containers.

use thiserror::Error;

/// Fallback text for an [`Error::Empty`] raised without a caller message.
pub const EMPTY_MESSAGE: &str = "value is absent";

/// Base error kind for every contract violation the containers detect.
///
/// Errors raised by caller-supplied producers and mappers are never wrapped
/// in this type; they unwind to the caller unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// An absent value was accessed through an unsafe accessor (`get`,
    /// `expected`) or a `just` search found no present candidate.
    #[error("{}", .message.as_deref().unwrap_or(EMPTY_MESSAGE))]
    Empty { message: Option<String> },

    /// A lazy facade was forced without a producer: it was built as a bare
    /// placeholder, or it is already being forced further up the stack.
    #[error("lazy value has no producer to force")]
    Lazy,

    /// A custom resolver handed back an instance that is neither present nor
    /// absent.
    #[error("resolver returned an unresolved instance")]
    Resolution,
}

impl Error {
    #[inline]
    pub fn empty() -> Self { Error::Empty { message: None } }

    #[inline]
    pub fn empty_with(message: impl Into<String>) -> Self {
        Error::Empty { message: Some(message.into()) }
    }

    pub fn is_empty(&self) -> bool { matches!(self, Error::Empty { .. }) }

    pub fn is_lazy(&self) -> bool { matches!(self, Error::Lazy) }

    pub fn is_resolution(&self) -> bool { matches!(self, Error::Resolution) }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
