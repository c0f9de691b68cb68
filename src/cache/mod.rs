//! Deduplication of generated records
//!
//! Every record the builder finalizes is first looked up in a
//! [`StructRegistry`]. If a structurally identical record was registered
//! before, the builder discards its fresh copy and shares the registered
//! node instead; otherwise the fresh node is registered and becomes the
//! canonical node for its shape. Repeated occurrences of, e.g., a
//! `(nat, nat)` pair in different parts of a contract type thus produce a
//! single generated type.
//!
//! # Identity
//!
//! Records are identified by their [`Shape`], which ignores declared names.
//! When two differently-named records collide, the one registered first
//! wins: its name and field names are the ones that survive.
//!
//! # Scope
//!
//! A registry lives for exactly one build. It is owned (or mutably
//! borrowed) by a single builder and is never shared between concurrent
//! builds.
//!
//! Registrations are ordered, so a registry can be rolled back to an
//! earlier [`len`](StructRegistry::len). The builder does this when a
//! build fails, leaving no record of the failed build behind.

pub mod shape;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::CacheError;
use crate::tree::TypeNode;
pub use shape::Shape;

/// Store of canonical record nodes keyed by structure
pub trait StructRegistry {
    /// Returns the registered node with the same shape as `candidate`, if any
    fn lookup(&self, candidate: &TypeNode) -> Option<Arc<TypeNode>>;

    /// Registers `candidate` as the canonical node for its shape.
    ///
    /// Fails only if the backing store cannot hold another entry. If
    /// `Err(_)` is returned, the registry is unmodified.
    fn register(&mut self, candidate: Arc<TypeNode>) -> Result<(), CacheError>;

    /// Returns the canonical node for `candidate`, registering it first if
    /// no node of the same shape is registered yet.
    fn intern(&mut self, candidate: TypeNode) -> Result<Arc<TypeNode>, CacheError> {
        if let Some(found) = self.lookup(&candidate) {
            return Ok(found);
        }
        let node = Arc::new(candidate);
        self.register(Arc::clone(&node))?;
        Ok(node)
    }

    /// Number of registered nodes
    fn len(&self) -> usize;

    /// Forgets every node registered after the first `len`
    fn rollback(&mut self, len: usize);
}

/// Default [`StructRegistry`], backed by a hash-map over [`Shape`] keys
///
/// Registered nodes are additionally kept in registration order, which is
/// the order in which a code generator should emit their definitions.
#[derive(Debug, Default)]
pub struct StructCache {
    index: HashMap<Shape, usize>,
    structs: Vec<Arc<TypeNode>>,
    limit: Option<usize>,
}

impl StructCache {
    /// Constructs an empty, unbounded cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs an empty cache that refuses to hold more than `limit` records
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Canonical records, in registration order
    #[must_use]
    pub fn structs(&self) -> &[Arc<TypeNode>] {
        &self.structs
    }

    /// Consumes the cache, returning its canonical records in registration order
    #[must_use]
    pub fn into_structs(self) -> Vec<Arc<TypeNode>> {
        self.structs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.structs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    fn lookup_shape(&self, shape: &Shape) -> Option<Arc<TypeNode>> {
        self.index.get(shape).map(|&ix| Arc::clone(&self.structs[ix]))
    }

    /// Inserts `candidate` under a shape known to be absent
    fn insert_new(&mut self, shape: Shape, candidate: Arc<TypeNode>) -> Result<(), CacheError> {
        if let Some(limit) = self.limit {
            if self.structs.len() >= limit {
                return Err(CacheError::CapacityExceeded { limit });
            }
        }
        self.index.try_reserve(1)?;
        self.structs.try_reserve(1)?;
        self.index.insert(shape, self.structs.len());
        self.structs.push(candidate);
        Ok(())
    }
}

impl StructRegistry for StructCache {
    fn lookup(&self, candidate: &TypeNode) -> Option<Arc<TypeNode>> {
        self.lookup_shape(&Shape::of(candidate))
    }

    fn register(&mut self, candidate: Arc<TypeNode>) -> Result<(), CacheError> {
        let shape = Shape::of(&candidate);
        if self.index.contains_key(&shape) {
            return Ok(());
        }
        self.insert_new(shape, candidate)
    }

    fn intern(&mut self, candidate: TypeNode) -> Result<Arc<TypeNode>, CacheError> {
        let shape = Shape::of(&candidate);
        if let Some(found) = self.lookup_shape(&shape) {
            return Ok(found);
        }
        let node = Arc::new(candidate);
        self.insert_new(shape, Arc::clone(&node))?;
        Ok(node)
    }

    fn len(&self) -> usize {
        self.structs.len()
    }

    fn rollback(&mut self, len: usize) {
        if len < self.structs.len() {
            self.structs.truncate(len);
            self.index.retain(|_, ix| *ix < len);
        }
    }
}

impl<R: StructRegistry + ?Sized> StructRegistry for &mut R {
    fn lookup(&self, candidate: &TypeNode) -> Option<Arc<TypeNode>> {
        (**self).lookup(candidate)
    }

    fn register(&mut self, candidate: Arc<TypeNode>) -> Result<(), CacheError> {
        (**self).register(candidate)
    }

    fn intern(&mut self, candidate: TypeNode) -> Result<Arc<TypeNode>, CacheError> {
        (**self).intern(candidate)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn rollback(&mut self, len: usize) {
        (**self).rollback(len)
    }
}
