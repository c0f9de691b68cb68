//! Type-trees for Tezos contract bindings
//!
//! # Overview
//!
//! Michelson values are laid out according to the type of the contract that
//! holds them, and any record with more than two fields is represented as a
//! right-leaning comb of nested pairs rather than as a flat tuple. Client
//! libraries that read storage or build call arguments therefore need to
//! know, for every field of every record in a contract's type, which sequence
//! of left/right steps leads to it.
//!
//! This library turns a contract's declared schema into a canonical
//! *type-tree*: a tree of [`TypeNode`] values in which every record carries
//! the comb [`Path`] of each of its fields, relative to the record itself.
//! The type-tree is the common ground of two downstream consumers: a code
//! generator, which emits one strongly-typed definition per record, and a
//! value marshaler, which walks the same paths to read or write individual
//! fields.
//!
//! # Layout
//!
//! The crate is organized bottom-up:
//!
//!   * [`path`]: path vectors, the right-comb path calculator, and the
//!     normalizer that re-roots sibling paths at their common ancestor
//!   * [`schema`] and [`micheline`]: the input side, either handed over by
//!     an external Michelson type parser or lowered from a Micheline type
//!     expression
//!   * [`tree`]: the output side
//!   * [`cache`]: deduplication of structurally identical records, so that
//!     repeated shapes yield a single shared node
//!   * [`builder`]: the recursive schema-to-type-tree transform
//!
//! # Features
//!
//!   * `serde_impls`: `Serialize` implementations for the output types
//!   * `smallvec_paths`: inline storage for short paths
//!
//! # Logging
//!
//! The builder reports its progress through `tracing` events at the `debug`
//! and `trace` levels; no subscriber is installed by the library.

pub mod builder;
pub mod cache;
pub mod error;
pub mod micheline;
pub mod path;
pub mod prim;
pub mod schema;
pub mod tree;

pub use crate::builder::{build_bindings, Bindings, BuildOptions, TypeTreeBuilder};
pub use crate::cache::{Shape, StructCache, StructRegistry};
pub use crate::error::{Arity, ArityError, BuildError, BuildResult, CacheError};
pub use crate::micheline::TypeExpr;
pub use crate::path::{normalize, right_comb, Path};
pub use crate::prim::Prim;
pub use crate::schema::{Kind, SchemaNode};
pub use crate::tree::{Field, NodeKind, StructType, Tag, TypeNode};
