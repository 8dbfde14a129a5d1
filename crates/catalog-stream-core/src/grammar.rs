//! # Relationship-String Grammar
//!
//! Folds several outgoing relationships of one entity into the single
//! `relationships` field the catalog's entity-create call understands:
//!
//! ```text
//! actors#ACTOR#actor://Tom Cruise|actors#ACTOR#actor://Meg Ryan
//! └─attr─┘└type┘└─qualifiedName──┘
//! ```
//!
//! There is no escaping. A qualifiedName containing `#` or `|` cannot be
//! expressed in this grammar; callers must keep the separators out of every
//! field. Decoding fails loudly on a segment with the wrong field count
//! instead of skipping it.

use crate::primitives::{RELATIONSHIPS_KV_SEPARATOR, RELATIONSHIPS_SEPARATOR};
use crate::{CatalogError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One relationship embedded in an entity's `relationships` field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EmbeddedRelationship {
    /// Attribute on the owning entity that holds the edge (e.g. `actors`).
    pub attribute_name: String,
    /// Catalog type of the related entity (e.g. `ACTOR`).
    pub related_type: String,
    /// qualifiedName of the related entity.
    pub related_qualified_name: String,
}

impl EmbeddedRelationship {
    #[must_use]
    pub fn new(
        attribute_name: impl Into<String>,
        related_type: impl Into<String>,
        related_qualified_name: impl Into<String>,
    ) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            related_type: related_type.into(),
            related_qualified_name: related_qualified_name.into(),
        }
    }
}

impl fmt::Display for EmbeddedRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.attribute_name,
            self.related_type,
            self.related_qualified_name,
            sep = RELATIONSHIPS_KV_SEPARATOR
        )
    }
}

impl FromStr for EmbeddedRelationship {
    type Err = CatalogError;

    /// Parse a single segment (no `|` inside).
    fn from_str(segment: &str) -> Result<Self> {
        let fields: Vec<&str> = segment.split(RELATIONSHIPS_KV_SEPARATOR).collect();

        match fields.as_slice() {
            [attribute_name, related_type, related_qualified_name] => Ok(Self::new(
                *attribute_name,
                *related_type,
                *related_qualified_name,
            )),
            _ => Err(CatalogError::MalformedRelationship {
                segment: segment.to_string(),
                fields: fields.len(),
            }),
        }
    }
}

/// Encode relationships into one `relationships` value.
///
/// Returns `None` for an empty slice so the serialized field becomes null.
#[must_use]
pub fn encode_relationships(relationships: &[EmbeddedRelationship]) -> Option<String> {
    if relationships.is_empty() {
        return None;
    }

    let mut encoded = String::new();
    for (i, relationship) in relationships.iter().enumerate() {
        if i > 0 {
            encoded.push(RELATIONSHIPS_SEPARATOR);
        }
        encoded.push_str(&relationship.to_string());
    }
    Some(encoded)
}

/// Decode a `relationships` value back into its relationships, in order.
///
/// `None` and the empty string both decode to no relationships.
pub fn decode_relationships(encoded: Option<&str>) -> Result<Vec<EmbeddedRelationship>> {
    match encoded {
        None | Some("") => Ok(Vec::new()),
        Some(encoded) => encoded
            .split(RELATIONSHIPS_SEPARATOR)
            .map(str::parse)
            .collect(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
