//! Construction of type-trees from declared schemas
//!
//! [`TypeTreeBuilder`] performs a recursive descent over a
//! [`SchemaNode`] tree and produces the corresponding [`TypeNode`] tree.
//! The dispatch on each node is, in order of precedence:
//!
//!   1. optional nodes become an `option` node carrying the declared name,
//!      around an unnamed copy of the node itself
//!   2. builtin primitives become named leaves
//!   3. `map`, `big_map` and `lambda` recurse into their two children
//!   4. records recurse into every child, then have their field paths
//!      re-rooted (see [`path::relative`](crate::path::relative)) and are
//!      deduplicated against the builder's [`StructRegistry`]
//!   5. unions recurse into their two branches
//!   6. `list` and `set` recurse into their element type
//!
//! and any other keyword is rejected with [`BuildError::UnrecognizedType`].
//!
//! Any failure aborts the whole build and is returned unchanged.
//!
//! One builder corresponds to one registry, and thus to one build of one
//! contract's bindings; see [`build_bindings`] for the common case.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::cache::{StructCache, StructRegistry};
use crate::error::{ArityError, BuildError, BuildResult};
use crate::path;
use crate::schema::{self, Kind, SchemaNode};
use crate::tree::{Field, NodeKind, StructType, TypeNode};

/// Prefix given to field names that begin with a digit
pub const FIELD_PREFIX: &str = "field";

/// Runtime limits applied to a single build
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Deepest schema nesting accepted, with the root at depth `0`
    pub max_depth: Option<usize>,
    /// Largest number of distinct records the default cache will hold
    pub struct_limit: Option<usize>,
}

/// Recursive schema-to-type-tree transform over a struct registry `R`
#[derive(Debug)]
pub struct TypeTreeBuilder<R = StructCache> {
    registry: R,
    max_depth: Option<usize>,
}

impl TypeTreeBuilder<StructCache> {
    /// Constructs a builder with an empty, unbounded cache and no depth limit
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(BuildOptions::default())
    }

    #[must_use]
    pub fn with_options(options: BuildOptions) -> Self {
        let cache = match options.struct_limit {
            Some(limit) => StructCache::with_limit(limit),
            None => StructCache::new(),
        };
        Self {
            registry: cache,
            max_depth: options.max_depth,
        }
    }

    /// Canonical records built so far, in registration order
    #[must_use]
    pub fn into_structs(self) -> Vec<Arc<TypeNode>> {
        self.registry.into_structs()
    }
}

impl Default for TypeTreeBuilder<StructCache> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: StructRegistry> TypeTreeBuilder<R> {
    /// Constructs a builder over a caller-supplied registry
    pub fn with_registry(registry: R) -> Self {
        Self {
            registry,
            max_depth: None,
        }
    }

    /// Sets the deepest schema nesting the builder accepts
    #[must_use]
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn into_registry(self) -> R {
        self.registry
    }

    /// Builds the type-tree of `node` and everything below it.
    ///
    /// Records that are structurally identical to a record built earlier by
    /// this builder are returned as the earlier, shared node.
    ///
    /// If the build fails, every record it registered is rolled back, so
    /// the registry is left exactly as it was before the call.
    pub fn build(&mut self, node: &SchemaNode) -> BuildResult<Arc<TypeNode>> {
        let checkpoint = self.registry.len();
        let result = self.build_at(node, &node.name, 0);
        if let Err(err) = &result {
            debug!(
                discarded = self.registry.len() - checkpoint,
                error = %err,
                "build failed, rolling back registered structs"
            );
            self.registry.rollback(checkpoint);
        }
        result
    }

    fn build_at(&mut self, node: &SchemaNode, name: &str, depth: usize) -> BuildResult<Arc<TypeNode>> {
        if let Some(limit) = self.max_depth {
            if depth > limit {
                return Err(BuildError::DepthExceeded { limit });
            }
        }
        if node.optional {
            let inner = self.build_kind(node, "", depth)?;
            return Ok(Arc::new(TypeNode::new(
                declared_name(name),
                NodeKind::Option { inner },
            )));
        }
        self.build_kind(node, name, depth)
    }

    fn build_kind(&mut self, node: &SchemaNode, name: &str, depth: usize) -> BuildResult<Arc<TypeNode>> {
        trace!(kind = %node.kind, depth, "building type node");
        if let Some(arity) = node.kind.arity() {
            ArityError::check(&node.kind, arity, node.children.len())?;
        }
        let kind = match &node.kind {
            Kind::Prim(p) => NodeKind::Prim(*p),
            Kind::Map | Kind::BigMap | Kind::Lambda => {
                let first = self.build_child(node, 0, depth)?;
                let second = self.build_child(node, 1, depth)?;
                match node.kind {
                    Kind::Map => NodeKind::Map { key: first, value: second },
                    Kind::BigMap => NodeKind::BigMap { key: first, value: second },
                    _ => NodeKind::Lambda { param: first, ret: second },
                }
            }
            Kind::Struct => return self.build_struct(node, name, depth),
            Kind::Union => NodeKind::Union {
                left: self.build_child(node, 0, depth)?,
                right: self.build_child(node, 1, depth)?,
            },
            Kind::List => NodeKind::List {
                inner: self.build_child(node, 0, depth)?,
            },
            Kind::Set => NodeKind::Set {
                inner: self.build_child(node, 0, depth)?,
            },
            Kind::Option => NodeKind::Option {
                inner: self.build_at(&node.children[0], "", depth + 1)?,
            },
            Kind::Other(keyword) => {
                return Err(BuildError::UnrecognizedType {
                    keyword: keyword.clone(),
                })
            }
        };
        Ok(Arc::new(TypeNode::new(declared_name(name), kind)))
    }

    fn build_child(&mut self, node: &SchemaNode, ix: usize, depth: usize) -> BuildResult<Arc<TypeNode>> {
        let child = &node.children[ix];
        self.build_at(child, &child.name, depth + 1)
    }

    fn build_struct(&mut self, node: &SchemaNode, name: &str, depth: usize) -> BuildResult<Arc<TypeNode>> {
        let mut fields = Vec::with_capacity(node.children.len());
        let mut paths = Vec::with_capacity(node.children.len());
        for child in node.children.iter() {
            let ty = self.build_at(child, &child.name, depth + 1)?;
            fields.push(Field {
                name: field_name(&child.name),
                ty,
            });
            paths.push(child.path.clone());
        }
        let paths = path::normalize(paths);
        let candidate = TypeNode::new(declared_name(name), NodeKind::Struct(StructType { fields, paths }));
        self.intern_struct(candidate)
    }

    /// Returns the canonical node for `candidate`, registering it if it is
    /// the first record of its shape.
    fn intern_struct(&mut self, candidate: TypeNode) -> BuildResult<Arc<TypeNode>> {
        let before = self.registry.len();
        let name = candidate.name.clone();
        let fields = candidate.as_struct().map_or(0, StructType::len);
        let node = self.registry.intern(candidate)?;
        if self.registry.len() > before {
            debug!(name = ?node.name, fields, "registered struct");
        } else {
            debug!(name = ?name, canonical = ?node.name, "reusing structurally identical struct");
        }
        Ok(node)
    }
}

/// Declared name to keep on a generated node; anonymous, placeholder and
/// positional names are dropped so the generator can assign its own.
fn declared_name(name: &str) -> Option<String> {
    if schema::is_anonymous(name) || is_positional(name) {
        None
    } else {
        Some(name.to_owned())
    }
}

/// Whether `name` is a positional label such as `"0"`, which only
/// identifies a member within its parent.
fn is_positional(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_digit())
}

/// Field identifier for a declared field name.
///
/// Positional names such as `"0"` are not valid identifiers, and are
/// prefixed with [`FIELD_PREFIX`].
#[must_use]
pub fn field_name(name: &str) -> String {
    if is_positional(name) {
        format!("{}{}", FIELD_PREFIX, name)
    } else {
        name.to_owned()
    }
}

/// Output of one complete build: the root type and every canonical record
/// reachable from it, in the order they were first built.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct Bindings {
    pub root: Arc<TypeNode>,
    pub structs: Vec<Arc<TypeNode>>,
}

/// Builds the type-tree of a contract type with a fresh cache.
pub fn build_bindings(schema: &SchemaNode, options: BuildOptions) -> BuildResult<Bindings> {
    let _span = tracing::debug_span!("build_bindings", root = %schema.kind).entered();
    let mut builder = TypeTreeBuilder::with_options(options);
    let root = builder.build(schema)?;
    let structs = builder.into_structs();
    debug!(structs = structs.len(), "built bindings");
    Ok(Bindings { root, structs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Arity, CacheError};
    use crate::path::Path;
    use crate::prim::Prim;
    use crate::tree::Tag;

    fn leaf(name: &str, p: Prim, path: impl Into<Path>) -> SchemaNode {
        SchemaNode::prim(p).named(name).at(path)
    }

    fn record(name: &str, path: impl Into<Path>, children: Vec<SchemaNode>) -> SchemaNode {
        SchemaNode::with_children(Kind::Struct, children)
            .named(name)
            .at(path)
    }

    fn paths_of(node: &TypeNode) -> Vec<Path> {
        node.as_struct().unwrap().paths.clone()
    }

    fn path_list<const N: usize>(raw: [&[u8]; N]) -> Vec<Path> {
        raw.into_iter().map(Path::from).collect()
    }

    #[test]
    fn nested_struct_is_self_addressed() {
        let schema = record(
            "storage",
            Path::new(),
            vec![
                leaf("a", Prim::Int, [0]),
                record(
                    "b",
                    [1],
                    vec![leaf("c", Prim::String, [1, 0]), leaf("d", Prim::String, [1, 1])],
                ),
            ],
        );
        let root = TypeTreeBuilder::new().build(&schema).unwrap();
        let st = root.as_struct().unwrap();
        assert_eq!(root.name.as_deref(), Some("storage"));
        assert_eq!(st.len(), 2);
        assert_eq!(st.paths, path_list([&[0], &[1]]));

        let (b, _) = st.field("b").unwrap();
        assert_eq!(b.ty.tag(), Tag::Struct);
        assert_eq!(paths_of(&b.ty), path_list([&[0], &[1]]));
    }

    #[test]
    fn option_keeps_outer_name() {
        let schema = SchemaNode::prim(Prim::Nat).named("amount").optional();
        let node = TypeTreeBuilder::new().build(&schema).unwrap();
        assert_eq!(node.name.as_deref(), Some("amount"));
        match &node.kind {
            NodeKind::Option { inner } => {
                assert_eq!(inner.kind, NodeKind::Prim(Prim::Nat));
                assert_eq!(inner.name, None);
            }
            other => panic!("expected option, found {:?}", other),
        }
    }

    #[test]
    fn option_keyword() {
        let schema = SchemaNode::with_children(Kind::Option, vec![SchemaNode::prim(Prim::Bytes).named("payload")])
            .named("maybe");
        let node = TypeTreeBuilder::new().build(&schema).unwrap();
        assert_eq!(node.tag(), Tag::Option);
        assert_eq!(node.name.as_deref(), Some("maybe"));
        assert_eq!(node.children()[0].name, None);
    }

    #[test]
    fn list_element_paths_do_not_leak_outer_prefix() {
        let element = record(
            "@pair",
            [1, 0],
            vec![
                leaf("owner", Prim::Address, [1, 0, 0]),
                leaf("amount", Prim::Mutez, [1, 0, 1, 0]),
                leaf("memo", Prim::String, [1, 0, 1, 1]),
            ],
        );
        let schema = record(
            "storage",
            Path::new(),
            vec![
                leaf("counter", Prim::Nat, [0]),
                SchemaNode::with_children(Kind::List, vec![element]).named("entries").at([1]),
            ],
        );
        let root = TypeTreeBuilder::new().build(&schema).unwrap();
        let (entries, _) = root.as_struct().unwrap().field("entries").unwrap();
        let item = match &entries.ty.kind {
            NodeKind::List { inner } => inner.clone(),
            other => panic!("expected list, found {:?}", other),
        };
        assert_eq!(item.name, None);
        assert_eq!(paths_of(&item), path_list([&[0], &[1, 0], &[1, 1]]));
    }

    #[test]
    fn identical_records_are_shared() {
        let schema = record(
            "storage",
            Path::new(),
            vec![
                record("point", [0], vec![leaf("x", Prim::Nat, [0, 0]), leaf("y", Prim::Nat, [0, 1])]),
                record("range", [1], vec![leaf("lo", Prim::Nat, [1, 0]), leaf("hi", Prim::Nat, [1, 1])]),
            ],
        );
        let bindings = build_bindings(&schema, BuildOptions::default()).unwrap();
        let st = bindings.root.as_struct().unwrap();
        assert!(Arc::ptr_eq(&st.fields[0].ty, &st.fields[1].ty));
        assert_eq!(st.fields[1].ty.name.as_deref(), Some("point"));
        // field names on the outer record are untouched
        assert_eq!(st.fields[1].name, "range");
        assert_eq!(bindings.structs.len(), 2);
        assert!(Arc::ptr_eq(&bindings.structs[1], &bindings.root));
    }

    #[test]
    fn different_fields_are_not_shared() {
        let schema = record(
            "storage",
            Path::new(),
            vec![
                record("p", [0], vec![leaf("x", Prim::Nat, [0, 0]), leaf("y", Prim::Nat, [0, 1])]),
                record("q", [1], vec![leaf("x", Prim::Int, [1, 0]), leaf("y", Prim::Nat, [1, 1])]),
            ],
        );
        let bindings = build_bindings(&schema, BuildOptions::default()).unwrap();
        assert_eq!(bindings.structs.len(), 3);
    }

    #[test]
    fn digit_names_and_placeholders() {
        let schema = record(
            "@pair",
            Path::new(),
            vec![leaf("0", Prim::Bool, [0]), leaf("1", Prim::Unit, [1])],
        );
        let root = TypeTreeBuilder::new().build(&schema).unwrap();
        let st = root.as_struct().unwrap();
        assert_eq!(root.name, None);
        assert_eq!(st.fields[0].name, "field0");
        assert_eq!(st.fields[1].name, "field1");
        assert_eq!(st.paths, path_list([&[0], &[1]]));
    }

    #[test]
    fn binary_containers() {
        let schema = record(
            "storage",
            Path::new(),
            vec![
                SchemaNode::with_children(
                    Kind::BigMap,
                    vec![SchemaNode::prim(Prim::Address), SchemaNode::prim(Prim::Nat)],
                )
                .named("ledger")
                .at([0]),
                SchemaNode::with_children(
                    Kind::Lambda,
                    vec![SchemaNode::prim(Prim::Unit), SchemaNode::prim(Prim::Operation)],
                )
                .named("hook")
                .at([1]),
            ],
        );
        let root = TypeTreeBuilder::new().build(&schema).unwrap();
        let st = root.as_struct().unwrap();
        match &st.fields[0].ty.kind {
            NodeKind::BigMap { key, value } => {
                assert_eq!(key.tag(), Tag::Prim(Prim::Address));
                assert_eq!(value.tag(), Tag::Prim(Prim::Nat));
            }
            other => panic!("expected big_map, found {:?}", other),
        }
        assert_eq!(st.fields[1].ty.tag(), Tag::Lambda);
        assert_eq!(st.fields[1].ty.name.as_deref(), Some("hook"));
    }

    #[test]
    fn union_branches() {
        let schema = SchemaNode::with_children(
            Kind::Union,
            vec![
                SchemaNode::prim(Prim::Nat).named("deposit").at([0]),
                SchemaNode::prim(Prim::Unit).named("withdraw").at([1]),
            ],
        );
        let node = TypeTreeBuilder::new().build(&schema).unwrap();
        match &node.kind {
            NodeKind::Union { left, right } => {
                assert_eq!(left.name.as_deref(), Some("deposit"));
                assert_eq!(right.tag(), Tag::Prim(Prim::Unit));
            }
            other => panic!("expected union, found {:?}", other),
        }
    }

    #[test]
    fn unrecognized_keyword() {
        let schema = record(
            "storage",
            Path::new(),
            vec![
                leaf("a", Prim::Nat, [0]),
                SchemaNode::new(Kind::from_keyword("sapling_state")).named("pool").at([1]),
            ],
        );
        let mut builder = TypeTreeBuilder::new();
        assert_eq!(
            builder.build(&schema),
            Err(BuildError::UnrecognizedType {
                keyword: String::from("sapling_state")
            })
        );
        assert!(builder.registry().is_empty());
    }

    #[test]
    fn failed_build_leaves_registry_untouched() {
        let schema = record(
            "storage",
            Path::new(),
            vec![
                record("p", [0], vec![leaf("x", Prim::Nat, [0, 0]), leaf("y", Prim::Nat, [0, 1])]),
                SchemaNode::new(Kind::from_keyword("sapling_state")).named("pool").at([1]),
            ],
        );
        let mut builder = TypeTreeBuilder::new();
        assert!(matches!(
            builder.build(&schema),
            Err(BuildError::UnrecognizedType { .. })
        ));
        assert!(builder.registry().is_empty());

        // a later build registers its own records afresh
        let point = record("point", Path::new(), vec![leaf("u", Prim::Nat, [0]), leaf("v", Prim::Nat, [1])]);
        let node = builder.build(&point).unwrap();
        assert_eq!(node.name.as_deref(), Some("point"));
        assert_eq!(builder.registry().len(), 1);
        assert!(Arc::ptr_eq(&builder.into_structs()[0], &node));
    }

    #[test]
    fn failed_build_keeps_earlier_builds() {
        let mut builder = TypeTreeBuilder::new();
        let point = record("point", Path::new(), vec![leaf("x", Prim::Nat, [0]), leaf("y", Prim::Nat, [1])]);
        let first = builder.build(&point).unwrap();

        let broken = record(
            "storage",
            Path::new(),
            vec![
                record("q", [0], vec![leaf("a", Prim::Int, [0, 0]), leaf("b", Prim::Int, [0, 1])]),
                SchemaNode::with_children(Kind::Map, vec![SchemaNode::prim(Prim::Nat)]).named("m").at([1]),
            ],
        );
        assert!(matches!(builder.build(&broken), Err(BuildError::Arity(_))));
        assert_eq!(builder.registry().len(), 1);
        assert!(Arc::ptr_eq(&builder.registry().structs()[0], &first));
    }

    #[test]
    fn positional_names_are_not_type_names() {
        let schema = record(
            "@pair",
            Path::new(),
            vec![
                record("0", [0], vec![leaf("0", Prim::Nat, [0, 0]), leaf("1", Prim::Nat, [0, 1])]),
                leaf("1", Prim::String, [1]),
            ],
        );
        let root = TypeTreeBuilder::new().build(&schema).unwrap();
        let st = root.as_struct().unwrap();
        assert_eq!(st.fields[0].name, "field0");
        assert_eq!(st.fields[0].ty.tag(), Tag::Struct);
        assert_eq!(st.fields[0].ty.name, None);
        assert_eq!(st.fields[1].ty.name, None);
    }

    #[test]
    fn map_and_set() {
        let schema = record(
            "storage",
            Path::new(),
            vec![
                SchemaNode::with_children(
                    Kind::Map,
                    vec![SchemaNode::prim(Prim::String).at([0, 0]), SchemaNode::prim(Prim::Bytes).at([0, 1])],
                )
                .named("metadata")
                .at([0]),
                SchemaNode::with_children(Kind::Set, vec![SchemaNode::prim(Prim::Address).at([1, 0])])
                    .named("admins")
                    .at([1]),
            ],
        );
        let root = TypeTreeBuilder::new().build(&schema).unwrap();
        let st = root.as_struct().unwrap();
        match &st.fields[0].ty.kind {
            NodeKind::Map { key, value } => {
                assert_eq!(key.tag(), Tag::Prim(Prim::String));
                assert_eq!(value.tag(), Tag::Prim(Prim::Bytes));
            }
            other => panic!("expected map, found {:?}", other),
        }
        assert_eq!(st.fields[0].ty.name.as_deref(), Some("metadata"));
        match &st.fields[1].ty.kind {
            NodeKind::Set { inner } => assert_eq!(inner.tag(), Tag::Prim(Prim::Address)),
            other => panic!("expected set, found {:?}", other),
        }
    }

    #[test]
    fn records_in_containers_are_self_addressed() {
        // union branch at [0, 0], optional record at [1, 0], map value at
        // [1, 1, 1] and set element at [1, 1, 0, 0]; every nested record
        // ends up with paths relative to itself
        let schema = record(
            "storage",
            Path::new(),
            vec![
                SchemaNode::with_children(
                    Kind::Union,
                    vec![
                        record("left", [0, 0], vec![leaf("a", Prim::Int, [0, 0, 0]), leaf("b", Prim::Nat, [0, 0, 1])]),
                        leaf("right", Prim::Unit, [0, 1]),
                    ],
                )
                .named("action")
                .at([0]),
                record(
                    "limits",
                    [1, 0],
                    vec![leaf("lo", Prim::Mutez, [1, 0, 0]), leaf("hi", Prim::Mutez, [1, 0, 1])],
                )
                .optional(),
                SchemaNode::with_children(
                    Kind::Map,
                    vec![
                        SchemaNode::prim(Prim::Address).at([1, 1, 0]),
                        record(
                            "entry",
                            [1, 1, 1],
                            vec![
                                leaf("owner", Prim::Address, [1, 1, 1, 0]),
                                leaf("tokens", Prim::Nat, [1, 1, 1, 1, 0]),
                                SchemaNode::with_children(
                                    Kind::Set,
                                    vec![record(
                                        "@pair",
                                        [1, 1, 1, 1, 1, 0],
                                        vec![
                                            leaf("k", Prim::String, [1, 1, 1, 1, 1, 0, 0]),
                                            leaf("v", Prim::Bytes, [1, 1, 1, 1, 1, 0, 1]),
                                        ],
                                    )],
                                )
                                .named("tags")
                                .at([1, 1, 1, 1, 1]),
                            ],
                        ),
                    ],
                )
                .named("accounts")
                .at([1, 1]),
            ],
        );
        let root = TypeTreeBuilder::new().build(&schema).unwrap();
        let st = root.as_struct().unwrap();
        assert_eq!(st.paths, path_list([&[0], &[1, 0], &[1, 1]]));

        let left = match &st.fields[0].ty.kind {
            NodeKind::Union { left, .. } => left.clone(),
            other => panic!("expected union, found {:?}", other),
        };
        assert_eq!(paths_of(&left), path_list([&[0], &[1]]));

        let (limits, _) = st.field("limits").unwrap();
        let limits = match &limits.ty.kind {
            NodeKind::Option { inner } => inner.clone(),
            other => panic!("expected option, found {:?}", other),
        };
        assert_eq!(limits.tag(), Tag::Struct);
        assert_eq!(paths_of(&limits), path_list([&[0], &[1]]));

        let entry = match &st.fields[2].ty.kind {
            NodeKind::Map { value, .. } => value.clone(),
            other => panic!("expected map, found {:?}", other),
        };
        assert_eq!(paths_of(&entry), path_list([&[0], &[1, 0], &[1, 1]]));

        let (tags, _) = entry.as_struct().unwrap().field("tags").unwrap();
        let tag = match &tags.ty.kind {
            NodeKind::Set { inner } => inner.clone(),
            other => panic!("expected set, found {:?}", other),
        };
        assert_eq!(paths_of(&tag), path_list([&[0], &[1]]));
    }

    #[test]
    fn list_element_shares_field_record() {
        let schema = record(
            "storage",
            Path::new(),
            vec![
                record("pos", [0], vec![leaf("x", Prim::Int, [0, 0]), leaf("y", Prim::Int, [0, 1])]),
                SchemaNode::with_children(
                    Kind::List,
                    vec![record(
                        "@pair",
                        [1, 0],
                        vec![leaf("0", Prim::Int, [1, 0, 0]), leaf("1", Prim::Int, [1, 0, 1])],
                    )],
                )
                .named("history")
                .at([1]),
            ],
        );
        let bindings = build_bindings(&schema, BuildOptions::default()).unwrap();
        let st = bindings.root.as_struct().unwrap();
        let item = match &st.fields[1].ty.kind {
            NodeKind::List { inner } => inner.clone(),
            other => panic!("expected list, found {:?}", other),
        };
        assert!(Arc::ptr_eq(&item, &st.fields[0].ty));
        assert_eq!(item.name.as_deref(), Some("pos"));
        assert_eq!(bindings.structs.len(), 2);
    }

    #[test]
    fn malformed_map() {
        let schema = SchemaNode::with_children(Kind::Map, vec![SchemaNode::prim(Prim::Nat)]);
        match TypeTreeBuilder::new().build(&schema) {
            Err(BuildError::Arity(err)) => {
                assert_eq!(err.kind, "map");
                assert_eq!(err.expected, Arity::Exactly(2));
                assert_eq!(err.actual, 1);
            }
            other => panic!("expected arity error, found {:?}", other),
        }
        let empty = SchemaNode::new(Kind::Struct);
        assert!(matches!(
            TypeTreeBuilder::new().build(&empty),
            Err(BuildError::Arity(_))
        ));
    }

    #[test]
    fn depth_limit() {
        let nested = SchemaNode::with_children(
            Kind::List,
            vec![SchemaNode::with_children(Kind::List, vec![SchemaNode::prim(Prim::Nat)])],
        );
        assert!(TypeTreeBuilder::new().max_depth(2).build(&nested).is_ok());
        assert_eq!(
            TypeTreeBuilder::new().max_depth(1).build(&nested),
            Err(BuildError::DepthExceeded { limit: 1 })
        );
    }

    #[test]
    fn struct_limit() {
        let schema = record(
            "storage",
            Path::new(),
            vec![
                record("p", [0], vec![leaf("x", Prim::Nat, [0, 0]), leaf("y", Prim::Nat, [0, 1])]),
                leaf("z", Prim::Nat, [1]),
            ],
        );
        let options = BuildOptions {
            struct_limit: Some(1),
            ..BuildOptions::default()
        };
        assert_eq!(
            build_bindings(&schema, options).map(|b| b.structs.len()),
            Err(BuildError::Cache(CacheError::CapacityExceeded { limit: 1 }))
        );
    }

    #[test]
    fn field_names() {
        assert_eq!(field_name("7days"), "field7days");
        assert_eq!(field_name("owner"), "owner");
        assert_eq!(field_name(""), "");
    }
}
