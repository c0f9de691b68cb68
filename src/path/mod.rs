//! Binary-tree path vectors
//!
//! A Michelson record with more than two fields is not stored as a flat
//! tuple, but as a right-leaning comb of nested pairs. A [`Path`] locates a
//! single leaf inside such a comb as a sequence of binary choices, one per
//! pair that has to be descended through: [`LEFT`] (`0`) selects the first
//! component of a pair, and [`RIGHT`] (`1`) the second.
//!
//! # Layout
//!
//! This module defines the `Path` type itself, along with two submodules
//! containing the path algebra that the builder relies on:
//!   - `comb`: absolute path of the i-th element of an n-ary comb
//!   - `relative`: re-rooting a family of sibling paths at their common ancestor
//!
//! # Storage
//!
//! When the `smallvec_paths` feature is enabled, paths are stored inline
//! (up to eight steps) using `smallvec::SmallVec`; otherwise they are backed
//! by a plain `Vec<u8>`.

pub mod comb;
pub mod relative;

pub use comb::right_comb;
pub use relative::normalize;

use std::fmt::{Display, Formatter};
use std::ops::Deref;

/// Step selecting the first component of a pair
pub const LEFT: u8 = 0;

/// Step selecting the second component of a pair
pub const RIGHT: u8 = 1;

mod inner {
    cfg_if::cfg_if! {
        if #[cfg(feature = "smallvec_paths")] {
            /// Backing buffer of [`Path`](super::Path), stored inline for
            /// shallow paths.
            pub type Inner = smallvec::SmallVec<[u8; 8]>;
        } else {
            /// Backing buffer of [`Path`](super::Path).
            pub type Inner = Vec<u8>;
        }
    }
}

/// Sequence of left/right steps locating a value inside a comb-encoded tree
///
/// The empty path denotes the root of the tree it is relative to.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path(inner::Inner);

impl Path {
    /// Constructs the empty path
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs an empty path with room for `cap` steps
    #[must_use]
    pub fn with_capacity(cap: usize) -> Self {
        Self(inner::Inner::with_capacity(cap))
    }

    /// Appends a single step
    pub fn push(&mut self, step: u8) {
        self.0.push(step)
    }

    /// Appends `count` copies of `step`
    pub fn push_repeated(&mut self, step: u8, count: usize) {
        self.0.extend(std::iter::repeat(step).take(count))
    }

    /// Returns a copy of `self` extended by `step`
    #[must_use]
    pub fn child(&self, step: u8) -> Self {
        let mut ret = Self::with_capacity(self.len() + 1);
        ret.0.extend_from_slice(self);
        ret.push(step);
        ret
    }

    /// Returns the steps of this path as a slice
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Returns a new path made up of the steps of `self` after the first `n`
    #[must_use]
    pub fn strip_prefix_len(&self, n: usize) -> Self {
        Self::from(&self.0[n.min(self.len())..])
    }
}

impl Deref for Path {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for Path {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for Path {
    fn from(steps: &[u8]) -> Self {
        Self(steps.iter().copied().collect())
    }
}

impl From<Vec<u8>> for Path {
    fn from(steps: Vec<u8>) -> Self {
        Self(steps.into_iter().collect())
    }
}

impl<const N: usize> From<[u8; N]> for Path {
    fn from(steps: [u8; N]) -> Self {
        Self(steps.into_iter().collect())
    }
}

impl FromIterator<u8> for Path {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<u8> for Path {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl PartialEq<[u8]> for Path {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Path {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

/// Displays a path as a bracketed list of steps, e.g. `[1,1,0]`
impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", step)?;
        }
        f.write_str("]")
    }
}

#[cfg(feature = "serde_impls")]
impl serde::Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}
