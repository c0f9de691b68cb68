//! Addressing elements of a right comb
//!
//! An n-ary record `(e0, e1, ..., e{n-1})` is lowered into `n - 1` nested,
//! right-associated pairs:
//!
//! ```text
//! (e0, (e1, (e2, ... (e{n-2}, e{n-1}))))
//! ```
//!
//! so that element `i < n - 1` is reached by descending right `i` times and
//! then left once, and the final element by descending right `n - 1` times.

use super::{Path, LEFT, RIGHT};

/// Computes the path of element `index` of an `arity`-element comb rooted at `base`.
///
/// A single-element record has no pair wrapper, so for `arity == 1` the
/// result is `base` itself.
///
/// The caller must guarantee `index < arity`; the result is unspecified
/// otherwise.
#[must_use]
pub fn right_comb(base: &[u8], index: usize, arity: usize) -> Path {
    debug_assert!(
        index < arity,
        "comb element {} out of range for arity {}",
        index,
        arity
    );
    let mut ret = Path::with_capacity(base.len() + index + 1);
    ret.extend(base.iter().copied());
    if arity <= 1 {
        return ret;
    }
    if index + 1 == arity {
        ret.push_repeated(RIGHT, arity - 1);
    } else {
        ret.push_repeated(RIGHT, index);
        ret.push(LEFT);
    }
    ret
}
