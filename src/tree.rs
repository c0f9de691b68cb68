//! Generated type-trees
//!
//! The builder turns a [`SchemaNode`](crate::schema::SchemaNode) tree into a
//! tree of [`TypeNode`] values. This is the representation consumed by
//! code generators, which emit one type definition per canonical record,
//! and by value marshalers, which read and write individual fields of a
//! comb-encoded value by following the `paths` of its [`StructType`].
//!
//! Subtrees are reference-counted, as structurally identical records are
//! shared rather than duplicated (see [`cache`](crate::cache)).

use std::sync::Arc;

use crate::path::Path;
use crate::prim::Prim;

/// Tag identifying the shape of a [`TypeNode`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    Prim(Prim),
    Option,
    Struct,
    Union,
    List,
    Set,
    Map,
    BigMap,
    Lambda,
}

impl Tag {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Tag::Prim(p) => p.keyword(),
            Tag::Option => "option",
            Tag::Struct => "struct",
            Tag::Union => "union",
            Tag::List => "list",
            Tag::Set => "set",
            Tag::Map => "map",
            Tag::BigMap => "big_map",
            Tag::Lambda => "lambda",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Named member of a record
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct Field {
    pub name: String,
    pub ty: Arc<TypeNode>,
}

/// Payload of a `struct` node
///
/// `fields` and `paths` are parallel sequences: `paths[i]` locates
/// `fields[i]` relative to the root of this record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct StructType {
    pub fields: Vec<Field>,
    pub paths: Vec<Path>,
}

impl StructType {
    /// Iterates over each field alongside its path
    pub fn iter(&self) -> impl Iterator<Item = (&Field, &Path)> + '_ {
        self.fields.iter().zip(self.paths.iter())
    }

    /// Looks up a field and its path by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<(&Field, &Path)> {
        self.iter().find(|(f, _)| f.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Tag-dependent payload of a [`TypeNode`]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
#[cfg_attr(feature = "serde_impls", serde(tag = "type", content = "of", rename_all = "snake_case"))]
pub enum NodeKind {
    Prim(Prim),
    Option { inner: Arc<TypeNode> },
    Struct(StructType),
    Union { left: Arc<TypeNode>, right: Arc<TypeNode> },
    List { inner: Arc<TypeNode> },
    Set { inner: Arc<TypeNode> },
    Map { key: Arc<TypeNode>, value: Arc<TypeNode> },
    BigMap { key: Arc<TypeNode>, value: Arc<TypeNode> },
    Lambda { param: Arc<TypeNode>, ret: Arc<TypeNode> },
}

/// Node of a generated type-tree
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct TypeNode {
    /// Declared name, or `None` if the generator should pick one
    pub name: Option<String>,
    pub kind: NodeKind,
}

impl TypeNode {
    #[must_use]
    pub fn new(name: Option<String>, kind: NodeKind) -> Self {
        Self { name, kind }
    }

    /// Tag of this node
    #[must_use]
    pub fn tag(&self) -> Tag {
        match &self.kind {
            NodeKind::Prim(p) => Tag::Prim(*p),
            NodeKind::Option { .. } => Tag::Option,
            NodeKind::Struct(_) => Tag::Struct,
            NodeKind::Union { .. } => Tag::Union,
            NodeKind::List { .. } => Tag::List,
            NodeKind::Set { .. } => Tag::Set,
            NodeKind::Map { .. } => Tag::Map,
            NodeKind::BigMap { .. } => Tag::BigMap,
            NodeKind::Lambda { .. } => Tag::Lambda,
        }
    }

    /// Returns the record payload if this is a `struct` node
    #[must_use]
    pub fn as_struct(&self) -> Option<&StructType> {
        match &self.kind {
            NodeKind::Struct(st) => Some(st),
            _ => None,
        }
    }

    /// Direct children of this node, in declaration order
    #[must_use]
    pub fn children(&self) -> Vec<&Arc<TypeNode>> {
        match &self.kind {
            NodeKind::Prim(_) => Vec::new(),
            NodeKind::Option { inner } | NodeKind::List { inner } | NodeKind::Set { inner } => {
                vec![inner]
            }
            NodeKind::Struct(st) => st.fields.iter().map(|f| &f.ty).collect(),
            NodeKind::Union { left, right } => vec![left, right],
            NodeKind::Map { key, value } | NodeKind::BigMap { key, value } => vec![key, value],
            NodeKind::Lambda { param, ret } => vec![param, ret],
        }
    }
}
