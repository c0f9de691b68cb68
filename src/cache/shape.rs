//! Structural fingerprints of type-tree nodes
//!
//! A [`Shape`] is a canonical serialization of everything about a node
//! that matters to its encoding: its tag, the shapes of its children, and
//! for records the path of every field. Declared names (of the node itself
//! and of its fields) are deliberately left out, so that two records that
//! only differ in naming share a fingerprint.
//!
//! For instance a record of a `nat` at `[0]` and an optional `string` at
//! `[1, 0]` is rendered as
//!
//! ```text
//! struct{nat@0;option(string)@1.0}
//! ```

use std::fmt::{Display, Formatter};

use crate::tree::{NodeKind, TypeNode};

/// Name-independent structural key of a [`TypeNode`]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Shape(String);

impl Shape {
    /// Computes the shape of `node`
    #[must_use]
    pub fn of(node: &TypeNode) -> Self {
        let mut buf = String::new();
        write_shape(node, &mut buf);
        Self(buf)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn write_shape(node: &TypeNode, buf: &mut String) {
    buf.push_str(node.tag().keyword());
    match &node.kind {
        NodeKind::Prim(_) => {}
        NodeKind::Option { inner } | NodeKind::List { inner } | NodeKind::Set { inner } => {
            buf.push('(');
            write_shape(inner, buf);
            buf.push(')');
        }
        NodeKind::Union { left: a, right: b }
        | NodeKind::Map { key: a, value: b }
        | NodeKind::BigMap { key: a, value: b }
        | NodeKind::Lambda { param: a, ret: b } => {
            buf.push('(');
            write_shape(a, buf);
            buf.push(',');
            write_shape(b, buf);
            buf.push(')');
        }
        NodeKind::Struct(st) => {
            buf.push('{');
            for (i, (field, path)) in st.iter().enumerate() {
                if i > 0 {
                    buf.push(';');
                }
                write_shape(&field.ty, buf);
                buf.push('@');
                for (j, step) in path.iter().enumerate() {
                    if j > 0 {
                        buf.push('.');
                    }
                    buf.push_str(&step.to_string());
                }
            }
            buf.push('}');
        }
    }
}
