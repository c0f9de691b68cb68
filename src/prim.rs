//! Builtin primitive types
//!
//! Leaf types of the Michelson type language that are emitted by the
//! builder as-is, without recursing into any arguments they may carry.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Michelson primitive type recognized as a leaf of the type-tree
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Prim {
    Int,
    Nat,
    String,
    Bool,
    Bytes,
    Unit,
    Timestamp,
    Address,
    /// Amount of the native token in micro-units (`mutez`, `mumav` on Mavryk)
    Mutez,
    Key,
    KeyHash,
    Signature,
    ChainId,
    Operation,
    Contract,
}

impl Prim {
    /// Every primitive, in declaration order
    pub const ALL: [Prim; 15] = [
        Prim::Int,
        Prim::Nat,
        Prim::String,
        Prim::Bool,
        Prim::Bytes,
        Prim::Unit,
        Prim::Timestamp,
        Prim::Address,
        Prim::Mutez,
        Prim::Key,
        Prim::KeyHash,
        Prim::Signature,
        Prim::ChainId,
        Prim::Operation,
        Prim::Contract,
    ];

    /// Canonical Michelson keyword of this primitive
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Prim::Int => "int",
            Prim::Nat => "nat",
            Prim::String => "string",
            Prim::Bool => "bool",
            Prim::Bytes => "bytes",
            Prim::Unit => "unit",
            Prim::Timestamp => "timestamp",
            Prim::Address => "address",
            Prim::Mutez => "mutez",
            Prim::Key => "key",
            Prim::KeyHash => "key_hash",
            Prim::Signature => "signature",
            Prim::ChainId => "chain_id",
            Prim::Operation => "operation",
            Prim::Contract => "contract",
        }
    }

    /// Looks up the primitive denoted by `keyword`, if any
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        KEYWORDS.get(keyword).copied()
    }
}

lazy_static::lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, Prim> = {
        let mut table: HashMap<&'static str, Prim> =
            Prim::ALL.iter().map(|&p| (p.keyword(), p)).collect();
        table.insert("mumav", Prim::Mutez);
        table
    };
}

impl Display for Prim {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Error returned when parsing a keyword that is not a builtin primitive
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownPrim(pub String);

impl Display for UnknownPrim {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` is not a builtin primitive type", self.0)
    }
}

impl std::error::Error for UnknownPrim {}

impl FromStr for Prim {
    type Err = UnknownPrim;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Prim::from_keyword(s).ok_or_else(|| UnknownPrim(s.to_owned()))
    }
}

#[cfg(feature = "serde_impls")]
impl serde::Serialize for Prim {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.keyword())
    }
}
