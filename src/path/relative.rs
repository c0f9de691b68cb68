//! Re-rooting sibling paths at their common ancestor
//!
//! Paths assigned while walking a schema are absolute with respect to the
//! outermost type. When a record appears inside a container (a list
//! element, an option payload, a union branch), the paths of its fields all
//! share the container's own prefix. A three-field list element, for
//! instance, might have absolute paths
//!
//! ```text
//! [0, 0], [0, 1, 0], [0, 1, 1]
//! ```
//!
//! where the leading `[0]` only locates the element within the list.
//! Marshalers always address a field relative to the record that declares
//! it, so that prefix is stripped before the record is finalized:
//!
//! ```text
//! [0], [1, 0], [1, 1]
//! ```

use super::{Path, LEFT};

/// Length of the longest prefix shared by every path in `paths`.
///
/// Returns `0` for an empty slice.
#[must_use]
pub fn common_prefix_len(paths: &[Path]) -> usize {
    let Some((first, rest)) = paths.split_first() else {
        return 0;
    };
    let mut len = 0;
    while let Some(&step) = first.get(len) {
        if rest.iter().any(|p| p.get(len) != Some(&step)) {
            break;
        }
        len += 1;
    }
    len
}

/// Makes a family of sibling field paths relative to their closest common ancestor.
///
/// If the paths share no common prefix they are returned unchanged.
/// Otherwise the prefix is stripped from each of them, and any path left
/// empty by doing so is replaced by `[0]`.
///
/// Order and length of the sequence are preserved. The operation is
/// idempotent whenever its output no longer shares a leading step.
#[must_use]
pub fn normalize(paths: Vec<Path>) -> Vec<Path> {
    let prefix = common_prefix_len(&paths);
    if prefix == 0 {
        return paths;
    }
    paths
        .iter()
        .map(|p| {
            let rel = p.strip_prefix_len(prefix);
            if rel.is_empty() {
                Path::from([LEFT])
            } else {
                rel
            }
        })
        .collect()
}
