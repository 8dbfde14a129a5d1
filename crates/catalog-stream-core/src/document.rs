//! # Canonical Document Lines
//!
//! Renders any serialized record as one line of JSON with sorted keys,
//! explicit `null`s, and a single trailing newline:
//!
//! ```text
//! {"name":"Oakland","operation":"CREATE","qualifiedName":"city://Oakland","relationships":null,"typeName":"City"}\n
//! ```
//!
//! Two semantically identical records always render to the same bytes,
//! which is what bulk loaders reading one record per line depend on.

use crate::serializer::{SerializedRecord, serialize_entity, serialize_relationship};
use crate::{CatalogError, EntityRecord, RelationshipRecord, Result};
use std::fmt;

/// A rendered record: one JSON object followed by exactly one `\n`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalLine(String);

impl CanonicalLine {
    /// Render a serialized record.
    ///
    /// JSON string escaping guarantees no raw newline survives inside the
    /// object, so the line terminator is unambiguous.
    pub fn render(record: &SerializedRecord) -> Result<Self> {
        let mut line = serde_json::to_string(record)
            .map_err(|e| CatalogError::SerializationError(e.to_string()))?;
        line.push('\n');
        Ok(Self(line))
    }

    /// Parse the line back into its sorted mapping.
    pub fn parse(&self) -> Result<SerializedRecord> {
        serde_json::from_str(self.0.trim_end_matches('\n'))
            .map_err(|e| CatalogError::SerializationError(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalLine {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// DOCUMENT CAPABILITY
// =============================================================================

/// Anything that can be flattened into a [`SerializedRecord`] and rendered as
/// a [`CanonicalLine`].
pub trait Document {
    /// The sorted field mapping of this document.
    fn to_serialized(&self) -> SerializedRecord;

    /// Render as one canonical line.
    fn to_canonical_line(&self) -> Result<CanonicalLine> {
        CanonicalLine::render(&self.to_serialized())
    }
}

impl Document for EntityRecord {
    fn to_serialized(&self) -> SerializedRecord {
        serialize_entity(self)
    }
}

impl Document for RelationshipRecord {
    fn to_serialized(&self) -> SerializedRecord {
        serialize_relationship(self)
    }
}

impl Document for SerializedRecord {
    fn to_serialized(&self) -> SerializedRecord {
        self.clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scalar;

    fn city(name: &str) -> EntityRecord {
        EntityRecord::new(
            "City",
            [("qualifiedName", format!("city://{name}")), ("name", name.to_string())],
        )
        .expect("entity")
    }

    #[test]
    fn entity_renders_sorted_with_null() {
        let line = city("Oakland").to_canonical_line().expect("render");
        assert_eq!(
            line.as_str(),
            "{\"name\":\"Oakland\",\"operation\":\"CREATE\",\"qualifiedName\":\"city://Oakland\",\"relationships\":null,\"typeName\":\"City\"}\n"
        );
    }

    #[test]
    fn relationship_renders_sorted() {
        let relationship = RelationshipRecord::new(
            "FILMED_AT",
            "Movie",
            "movie://Top Gun",
            "City",
            "city://Oakland",
        )
        .expect("relationship");
        let line = relationship.to_canonical_line().expect("render");
        assert_eq!(
            line.as_str(),
            "{\"entityQualifiedName1\":\"movie://Top Gun\",\"entityQualifiedName2\":\"city://Oakland\",\"entityType1\":\"Movie\",\"entityType2\":\"City\",\"relationshipType\":\"FILMED_AT\"}\n"
        );
    }

    #[test]
    fn equal_records_render_identical_bytes() {
        let built_one_way = EntityRecord::new(
            "Movie",
            [
                ("qualifiedName", Scalar::from("movie://Heat")),
                ("year", Scalar::from(1995i64)),
            ],
        )
        .expect("entity");
        let built_other_way = EntityRecord::new(
            "Movie",
            [
                ("year", Scalar::from(1995i64)),
                ("qualifiedName", Scalar::from("movie://Heat")),
            ],
        )
        .expect("entity");

        assert_eq!(
            built_one_way.to_canonical_line().expect("render"),
            built_other_way.to_canonical_line().expect("render")
        );
    }

    #[test]
    fn embedded_newline_stays_on_one_line() {
        let entity = EntityRecord::new(
            "Note",
            [("qualifiedName", "note://1"), ("body", "first\nsecond")],
        )
        .expect("entity");
        let line = entity.to_canonical_line().expect("render");
        assert_eq!(line.as_str().matches('\n').count(), 1);
        assert!(line.as_str().ends_with('\n'));
    }

    #[test]
    fn line_parses_back_to_serialized_record() {
        let entity = city("San Diego");
        let line = entity.to_canonical_line().expect("render");
        assert_eq!(line.parse().expect("parse"), entity.to_serialized());
    }

    #[test]
    fn serialized_record_renders_like_its_source() {
        let entity = city("San Diego");
        let serialized = entity.to_serialized();
        assert_eq!(
            serialized.to_canonical_line().expect("render"),
            entity.to_canonical_line().expect("render")
        );
    }

    #[test]
    fn non_ascii_passes_through_compact() {
        let line = city("Zürich").to_canonical_line().expect("render");
        assert!(line.as_str().starts_with("{\"name\":\"Zürich\",\"operation\":"));
        assert!(!line.as_str().contains(", "));
    }
}
