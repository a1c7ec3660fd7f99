//! perhaps: lazy, memoizing optional values with configurable emptiness and
//! left-to-right fallback chains.
//!
//! A [`Maybe`] is a possibly-unresolved facade. The first access forces its
//! producer once and caches the outcome as a [`Resolved`]: either a
//! [`Present`] holding one value or an [`Absent`] holding none. What counts
//! as absent is decided by the [`Config`] shared by every instance derived
//! from the same root.
//!
//! ```
//! use perhaps::{Candidate, Maybe};
//!
//! let port = Maybe::<u16>::none()
//!     .or_get([Candidate::Unset, Candidate::producer(|| Some(8080_u16))])
//!     .unwrap();
//! assert_eq!(port.get().unwrap(), &8080);
//! ```

pub mod absent;
pub mod candidate;
pub mod config;
pub mod error;
pub mod maybe;
pub mod nullish;
pub mod present;
pub mod resolved;

pub use absent::Absent;
pub use candidate::{Candidate, Fallback, Producer};
pub use config::{Config, ConfigBuilder, IsEmptyFn, Policy, ResolveFn};
pub use error::{Error, Result};
pub use maybe::Maybe;
pub use nullish::Nullish;
pub use present::Present;
pub use resolved::{Resolved, Visitor};
