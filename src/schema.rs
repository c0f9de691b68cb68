//! Declared contract schemas
//!
//! A [`SchemaNode`] describes the type of one field of a contract's storage
//! or parameter, as handed over by a Michelson type parser: a kind keyword,
//! an optional field name, the ordered children of the node, and the
//! absolute comb path of the node within the undecomposed type.
//!
//! Children are ordered, and that order is significant; it determines both
//! the encoding order of the fields and the paths they are assigned.

use std::fmt::{Display, Formatter};

use crate::error::Arity;
use crate::path::Path;
use crate::prim::Prim;

/// Kind of a schema node
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Builtin leaf type
    Prim(Prim),
    /// N-ary record, lowered to a right comb of pairs
    Struct,
    /// Binary sum (`or`)
    Union,
    List,
    Set,
    Map,
    BigMap,
    Lambda,
    /// Explicit `option` wrapper around a single child
    Option,
    /// Keyword that none of the above recognizes
    Other(String),
}

impl Kind {
    /// Interprets a type keyword, falling back to [`Kind::Other`]
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "struct" => Kind::Struct,
            "union" => Kind::Union,
            "list" => Kind::List,
            "set" => Kind::Set,
            "map" => Kind::Map,
            "big_map" => Kind::BigMap,
            "lambda" => Kind::Lambda,
            "option" => Kind::Option,
            other => match Prim::from_keyword(other) {
                Some(p) => Kind::Prim(p),
                None => Kind::Other(other.to_owned()),
            },
        }
    }

    /// Keyword naming this kind
    #[must_use]
    pub fn keyword(&self) -> &str {
        match self {
            Kind::Prim(p) => p.keyword(),
            Kind::Struct => "struct",
            Kind::Union => "union",
            Kind::List => "list",
            Kind::Set => "set",
            Kind::Map => "map",
            Kind::BigMap => "big_map",
            Kind::Lambda => "lambda",
            Kind::Option => "option",
            Kind::Other(keyword) => keyword,
        }
    }

    /// Number of children a node of this kind must have.
    ///
    /// Returns `None` for primitives, whose arguments are ignored, and
    /// for unrecognized kinds.
    #[must_use]
    pub fn arity(&self) -> Option<Arity> {
        match self {
            Kind::Prim(_) | Kind::Other(_) => None,
            Kind::Struct => Some(Arity::AtLeast(1)),
            Kind::Union | Kind::Map | Kind::BigMap | Kind::Lambda => Some(Arity::Exactly(2)),
            Kind::List | Kind::Set | Kind::Option => Some(Arity::Exactly(1)),
        }
    }
}

impl From<Prim> for Kind {
    fn from(p: Prim) -> Self {
        Kind::Prim(p)
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Declared type of a single field, as produced by a schema parser
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaNode {
    /// Field annotation, or the empty string if unnamed.
    ///
    /// Names beginning with `@` are placeholders generated for anonymous
    /// records.
    pub name: String,
    pub kind: Kind,
    /// Whether the value at this node is wrapped in an `option`
    pub optional: bool,
    pub children: Vec<SchemaNode>,
    /// Absolute comb path of this node in the original type
    pub path: Path,
}

impl SchemaNode {
    /// Constructs an unnamed node with no children at the root path
    #[must_use]
    pub fn new(kind: impl Into<Kind>) -> Self {
        Self {
            name: String::new(),
            kind: kind.into(),
            optional: false,
            children: Vec::new(),
            path: Path::new(),
        }
    }

    /// Constructs a leaf node of primitive type
    #[must_use]
    pub fn prim(p: Prim) -> Self {
        Self::new(p)
    }

    /// Constructs a node of the given kind with `children`
    #[must_use]
    pub fn with_children(kind: impl Into<Kind>, children: Vec<SchemaNode>) -> Self {
        Self {
            children,
            ..Self::new(kind)
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn at(mut self, path: impl Into<Path>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Returns `true` if this node has no declared name, or only a
    /// generated placeholder.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        is_anonymous(&self.name)
    }
}

/// Returns `true` for names that should not survive into generated code
#[must_use]
pub fn is_anonymous(name: &str) -> bool {
    name.is_empty() || name.starts_with('@')
}
