//! Error types for type-tree construction
//!
//! This module contains the error hierarchy returned by the builder and
//! by the Micheline front-end. [`BuildError`] is the top-level type that
//! every fallible operation in this crate ultimately reports, with more
//! specific refinements ([`ArityError`], [`CacheError`]) grouped by
//! provenance.
//!
//! There is no local recovery anywhere in this crate: an error raised at
//! any depth of a recursive build aborts the whole build, and is passed
//! back unchanged to the caller of the top-level entry point.

use std::collections::TryReserveError;
use std::error::Error;
use std::fmt::{Display, Formatter, Result};

/// Number of children a schema construct is required to have
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Arity {
    /// Precisely `n` children
    Exactly(usize),
    /// No fewer than `n` children
    AtLeast(usize),
}

impl Arity {
    /// Returns `true` if `count` children satisfy this requirement
    #[must_use]
    pub const fn admits(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match *self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// Error case for a schema node whose number of children does not match
/// what its kind requires, e.g. a `map` with a single child.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ArityError {
    /// Keyword of the offending node
    pub kind: String,
    pub expected: Arity,
    pub actual: usize,
}

impl ArityError {
    /// Returns `Ok(())` if `actual` satisfies `expected`, and otherwise an
    /// `ArityError` describing the mismatch.
    pub fn check(kind: impl Display, expected: Arity, actual: usize) -> std::result::Result<(), Self> {
        if expected.admits(actual) {
            Ok(())
        } else {
            Err(Self {
                kind: kind.to_string(),
                expected,
                actual,
            })
        }
    }
}

impl Display for ArityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "`{}` requires {} type arguments, found {}",
            self.kind, self.expected, self.actual
        )
    }
}

impl Error for ArityError {}

/// Failures of the backing store of a struct registry
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CacheError {
    /// The backing store could not allocate room for another entry
    Storage(TryReserveError),
    /// Registering another entry would exceed the configured limit
    CapacityExceeded { limit: usize },
}

impl From<TryReserveError> for CacheError {
    fn from(err: TryReserveError) -> Self {
        Self::Storage(err)
    }
}

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CacheError::Storage(err) => write!(f, "struct cache storage failure: {}", err),
            CacheError::CapacityExceeded { limit } => {
                write!(f, "struct cache is full ({} entries)", limit)
            }
        }
    }
}

impl Error for CacheError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CacheError::Storage(err) => Some(err),
            CacheError::CapacityExceeded { .. } => None,
        }
    }
}

/// Enumeration over all errors that may be encountered while
/// building a type-tree from a schema.
#[derive(Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum BuildError {
    /// A container node has the wrong number of children
    Arity(ArityError),
    /// A node carries a kind keyword that no build rule recognizes
    UnrecognizedType { keyword: String },
    /// Schema nesting is deeper than the configured limit
    DepthExceeded { limit: usize },
    /// A freshly built struct could not be registered
    Cache(CacheError),
}

impl From<ArityError> for BuildError {
    fn from(err: ArityError) -> Self {
        Self::Arity(err)
    }
}

impl From<CacheError> for BuildError {
    fn from(err: CacheError) -> Self {
        Self::Cache(err)
    }
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            BuildError::Arity(err) => write!(f, "malformed schema: {}", err),
            BuildError::UnrecognizedType { keyword } => {
                write!(f, "unrecognized type keyword `{}`", keyword)
            }
            BuildError::DepthExceeded { limit } => {
                write!(f, "schema nesting exceeds depth limit of {}", limit)
            }
            BuildError::Cache(err) => Display::fmt(err, f),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BuildError::Arity(err) => Some(err),
            BuildError::Cache(err) => Some(err),
            BuildError::UnrecognizedType { .. } | BuildError::DepthExceeded { .. } => None,
        }
    }
}

/// Type alias for Result with an error type of [`BuildError`]
pub type BuildResult<T> = std::result::Result<T, BuildError>;

#[cfg(test)]
mod test {
    use super::*;

    fn dummy<T: Send + Sync>() {}

    #[test]
    fn build_error_threadsafe() {
        dummy::<BuildError>()
    }

    #[test]
    fn arity_check() {
        assert!(ArityError::check("list", Arity::Exactly(1), 1).is_ok());
        assert!(ArityError::check("struct", Arity::AtLeast(1), 4).is_ok());

        let err = ArityError::check("map", Arity::Exactly(2), 1).unwrap_err();
        assert_eq!(err.actual, 1);
        assert_eq!(
            BuildError::from(err).to_string(),
            "malformed schema: `map` requires exactly 2 type arguments, found 1"
        );
    }

    #[test]
    fn cache_error_source() {
        let err = BuildError::from(CacheError::CapacityExceeded { limit: 3 });
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "struct cache is full (3 entries)");
    }
}
