//! # Graph Enumeration Protocol
//!
//! The capability every composite model implements: hand out its flattened
//! entities and standalone relationships one at a time.
//!
//! ## Contract
//!
//! - Each stream is finite and follows a fixed, model-defined order.
//! - Once a stream returns `Ok(None)`, every later call returns `Ok(None)`.
//! - There is no reset. Enumerate again with a new model instance.
//! - Children come before their parent in the entity stream, so a parent's
//!   embedded relationships point at qualifiedNames already emitted.
//!
//! The cursor is private mutable state behind `&mut self`; a model cannot be
//! pulled from two places at once without external locking.

use crate::{EntityRecord, RelationshipRecord, Result};
use std::iter::{Fuse, FusedIterator};

/// A composite model that can be reduced to flat catalog records.
///
/// Errors are construction errors of the record being produced (see
/// [`crate::record`]); running past the end is not an error.
pub trait CatalogSerializable {
    /// Pull the next entity record, or `Ok(None)` when exhausted.
    fn next_entity(&mut self) -> Result<Option<EntityRecord>>;

    /// Pull the next standalone relationship record, or `Ok(None)` when exhausted.
    fn next_relationship(&mut self) -> Result<Option<RelationshipRecord>>;
}

impl<M: CatalogSerializable + ?Sized> CatalogSerializable for Box<M> {
    fn next_entity(&mut self) -> Result<Option<EntityRecord>> {
        (**self).next_entity()
    }

    fn next_relationship(&mut self) -> Result<Option<RelationshipRecord>> {
        (**self).next_relationship()
    }
}

// =============================================================================
// ITERATOR ADAPTERS
// =============================================================================

/// Borrow a model's remaining entity stream as an iterator.
pub fn entities<M: CatalogSerializable + ?Sized>(model: &mut M) -> Entities<'_, M> {
    Entities { model, done: false }
}

/// Borrow a model's remaining relationship stream as an iterator.
pub fn relationships<M: CatalogSerializable + ?Sized>(model: &mut M) -> Relationships<'_, M> {
    Relationships { model, done: false }
}

/// Iterator over the remaining entities of a model.
///
/// Fused: stops for good after the first `None` or the first error.
pub struct Entities<'a, M: ?Sized> {
    model: &'a mut M,
    done: bool,
}

impl<M: CatalogSerializable + ?Sized> Iterator for Entities<'_, M> {
    type Item = Result<EntityRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let pulled = self.model.next_entity().transpose();
        if !matches!(pulled, Some(Ok(_))) {
            self.done = true;
        }
        pulled
    }
}

impl<M: CatalogSerializable + ?Sized> FusedIterator for Entities<'_, M> {}

/// Iterator over the remaining standalone relationships of a model.
///
/// Fused like [`Entities`].
pub struct Relationships<'a, M: ?Sized> {
    model: &'a mut M,
    done: bool,
}

impl<M: CatalogSerializable + ?Sized> Iterator for Relationships<'_, M> {
    type Item = Result<RelationshipRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let pulled = self.model.next_relationship().transpose();
        if !matches!(pulled, Some(Ok(_))) {
            self.done = true;
        }
        pulled
    }
}

impl<M: CatalogSerializable + ?Sized> FusedIterator for Relationships<'_, M> {}

// =============================================================================
// ITERATOR-BACKED MODEL
// =============================================================================

/// A model whose two streams are plain iterators.
///
/// Useful when the order is naturally an iterator chain (e.g. a lazy
/// `map` over a large source). Each stream is fused, so the exhaustion
/// contract holds even for iterators that would resume after `None`.
pub struct IterModel<E: Iterator, R: Iterator> {
    entities: Fuse<E>,
    relationships: Fuse<R>,
}

impl<E, R> IterModel<E, R>
where
    E: Iterator<Item = Result<EntityRecord>>,
    R: Iterator<Item = Result<RelationshipRecord>>,
{
    pub fn new(
        entities: impl IntoIterator<IntoIter = E>,
        relationships: impl IntoIterator<IntoIter = R>,
    ) -> Self {
        Self {
            entities: entities.into_iter().fuse(),
            relationships: relationships.into_iter().fuse(),
        }
    }
}

impl<E, R> CatalogSerializable for IterModel<E, R>
where
    E: Iterator<Item = Result<EntityRecord>>,
    R: Iterator<Item = Result<RelationshipRecord>>,
{
    fn next_entity(&mut self) -> Result<Option<EntityRecord>> {
        self.entities.next().transpose()
    }

    fn next_relationship(&mut self) -> Result<Option<RelationshipRecord>> {
        self.relationships.next().transpose()
    }
}

// =============================================================================
// TESTS
// =============================================================================
