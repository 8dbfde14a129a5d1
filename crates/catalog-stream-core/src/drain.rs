//! # Drain Driver
//!
//! Pulls a model dry and hands each rendered record to a sink:
//! all entities first, then all standalone relationships.
//!
//! Sinks are the boundary with loaders, files and network publishers. The
//! driver holds one record at a time; memory is bounded by the model's
//! nesting depth, never by its total record count.

use crate::document::{CanonicalLine, Document};
use crate::primitives::QUALIFIED_NAME;
use crate::protocol::CatalogSerializable;
use crate::{CatalogError, Result};
use std::collections::BTreeSet;
use std::io::Write;

/// Receiver of rendered records.
pub trait RecordSink {
    fn accept_entity(&mut self, line: &CanonicalLine) -> Result<()>;

    fn accept_relationship(&mut self, line: &CanonicalLine) -> Result<()>;
}

/// How many records one drain produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainStats {
    pub entities: usize,
    pub relationships: usize,
}

impl DrainStats {
    /// Add another drain's counts.
    pub fn absorb(&mut self, other: Self) {
        self.entities += other.entities;
        self.relationships += other.relationships;
    }
}

/// Drain both streams of `model` into `sink`.
///
/// Stops at the first record or sink error. The model is exhausted on
/// success and must be discarded.
pub fn drain<M, S>(model: &mut M, sink: &mut S) -> Result<DrainStats>
where
    M: CatalogSerializable + ?Sized,
    S: RecordSink + ?Sized,
{
    let mut stats = DrainStats::default();

    while let Some(entity) = model.next_entity()? {
        tracing::trace!(
            type_name = entity.type_name(),
            qualified_name = entity.qualified_name(),
            "entity"
        );
        sink.accept_entity(&entity.to_canonical_line()?)?;
        stats.entities += 1;
    }

    while let Some(relationship) = model.next_relationship()? {
        tracing::trace!(
            relationship_type = relationship.relationship_type(),
            from = relationship.entity_qualified_name_1(),
            to = relationship.entity_qualified_name_2(),
            "relationship"
        );
        sink.accept_relationship(&relationship.to_canonical_line()?)?;
        stats.relationships += 1;
    }

    tracing::debug!(
        entities = stats.entities,
        relationships = stats.relationships,
        "model drained"
    );
    Ok(stats)
}

// =============================================================================
// SINKS
// =============================================================================

/// Writes entity lines and relationship lines to two writers.
///
/// Pass the same kind of handle twice (e.g. two `io::stdout()` handles) to
/// interleave both streams into one output.
pub struct LineWriter<E: Write, R: Write> {
    entities: E,
    relationships: R,
}

impl<E: Write, R: Write> LineWriter<E, R> {
    pub fn new(entities: E, relationships: R) -> Self {
        Self {
            entities,
            relationships,
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.entities
            .flush()
            .and_then(|()| self.relationships.flush())
            .map_err(|e| CatalogError::IoError(e.to_string()))
    }

    pub fn into_inner(self) -> (E, R) {
        (self.entities, self.relationships)
    }
}

impl<E: Write, R: Write> RecordSink for LineWriter<E, R> {
    fn accept_entity(&mut self, line: &CanonicalLine) -> Result<()> {
        self.entities
            .write_all(line.as_str().as_bytes())
            .map_err(|e| CatalogError::IoError(e.to_string()))
    }

    fn accept_relationship(&mut self, line: &CanonicalLine) -> Result<()> {
        self.relationships
            .write_all(line.as_str().as_bytes())
            .map_err(|e| CatalogError::IoError(e.to_string()))
    }
}

/// Keeps every rendered line in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    pub entities: Vec<CanonicalLine>,
    pub relationships: Vec<CanonicalLine>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for CollectingSink {
    fn accept_entity(&mut self, line: &CanonicalLine) -> Result<()> {
        self.entities.push(line.clone());
        Ok(())
    }

    fn accept_relationship(&mut self, line: &CanonicalLine) -> Result<()> {
        self.relationships.push(line.clone());
        Ok(())
    }
}

/// Check that no qualifiedName repeats across an entity stream.
///
/// Returns the number of distinct qualifiedNames seen. Lines without a
/// qualifiedName are counted as a serialization error.
pub fn check_unique_qualified_names<'a>(
    lines: impl IntoIterator<Item = &'a CanonicalLine>,
) -> Result<usize> {
    let mut seen = BTreeSet::new();
    for line in lines {
        let record = line.parse()?;
        let qualified_name = record.get(QUALIFIED_NAME).flatten().ok_or_else(|| {
            CatalogError::SerializationError(format!("line has no {QUALIFIED_NAME}"))
        })?;
        if !seen.insert(qualified_name.to_string()) {
            return Err(CatalogError::DuplicateQualifiedName(
                qualified_name.to_string(),
            ));
        }
    }
    Ok(seen.len())
}

// =============================================================================
// TESTS
// =============================================================================
