//! # Reference Composite Models
//!
//! Concrete models that pin down correct enumeration order and
//! relationship encoding. They double as regression fixtures.
//!
//! - [`Movie`]: a parent with two kinds of leaf children. Actors are
//!   embedded in the movie's `relationships` field; cities become
//!   standalone `FILMED_AT` records.
//! - [`Studio`]: a parent of composites, showing that nesting only costs
//!   one active child cursor per level.

mod movie;
mod studio;

pub use movie::{Actor, City, Movie};
pub use studio::Studio;

use crate::{EntityRecord, Result};

/// Stream position shared by the reference models.
///
/// `index` walks the current phase's children; it resets on phase change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cursor<P> {
    phase: P,
    index: usize,
}

impl<P: Copy> Cursor<P> {
    fn advance(&mut self, phase: P) {
        self.phase = phase;
        self.index = 0;
    }

    /// Take the current index and step past it.
    fn bump(&mut self) -> usize {
        let current = self.index;
        self.index += 1;
        current
    }
}

/// A leaf entity carrying only `qualifiedName` and `name`.
fn named_entity(type_name: &str, qualified_name: String, name: &str) -> Result<EntityRecord> {
    EntityRecord::new(
        type_name,
        [
            (crate::primitives::QUALIFIED_NAME, qualified_name),
            ("name", name.to_string()),
        ],
    )
}
