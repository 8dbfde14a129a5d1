//! # Flat Records
//!
//! The two record kinds the catalog ingests.
//!
//! Records are immutable once built. All validation happens in the
//! constructors, so an invalid value never reaches a stream:
//! - non-finite floats are rejected (`UnserializableValue`)
//! - keys owned by the serialized form are rejected (`ReservedAttribute`)
//! - an entity must carry a non-empty string `qualifiedName`

use crate::primitives::{QUALIFIED_NAME, RESERVED_ENTITY_KEYS, RESERVED_RELATIONSHIP_KEYS};
use crate::{CatalogError, EntityOperation, Result, Scalar};
use std::collections::BTreeMap;

/// Attribute bag of a record. Always sorted by key.
pub type Attributes = BTreeMap<String, Scalar>;

/// Collect and validate an attribute bag against a set of reserved keys.
fn collect_attributes<K, V>(
    attributes: impl IntoIterator<Item = (K, V)>,
    reserved: &[&str],
) -> Result<Attributes>
where
    K: Into<String>,
    V: Into<Scalar>,
{
    let mut bag = Attributes::new();
    for (key, value) in attributes {
        let key = key.into();
        let value = value.into();

        if reserved.contains(&key.as_str()) {
            return Err(CatalogError::ReservedAttribute { key });
        }
        if !value.is_serializable() {
            return Err(CatalogError::UnserializableValue { key });
        }

        bag.insert(key, value);
    }
    Ok(bag)
}

fn require_non_empty(value: String, field: &'static str) -> Result<String> {
    if value.is_empty() {
        return Err(CatalogError::EmptyField { field });
    }
    Ok(value)
}

// =============================================================================
// ENTITY RECORD
// =============================================================================

/// One node of the metadata graph, flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    type_name: String,
    operation: EntityOperation,
    attributes: Attributes,
    relationships: Option<String>,
}

impl EntityRecord {
    /// Build a `CREATE` entity with no embedded relationships.
    ///
    /// `attributes` must contain a non-empty string `qualifiedName`.
    pub fn new<K, V>(
        type_name: impl Into<String>,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self>
    where
        K: Into<String>,
        V: Into<Scalar>,
    {
        let type_name = require_non_empty(type_name.into(), "typeName")?;
        let attributes = collect_attributes(attributes, &RESERVED_ENTITY_KEYS)?;

        let has_qualified_name = attributes
            .get(QUALIFIED_NAME)
            .and_then(Scalar::as_str)
            .is_some_and(|qn| !qn.is_empty());
        if !has_qualified_name {
            return Err(CatalogError::MissingQualifiedName { type_name });
        }

        Ok(Self {
            type_name,
            operation: EntityOperation::default(),
            attributes,
            relationships: None,
        })
    }

    /// Replace the write operation.
    #[must_use]
    pub fn with_operation(mut self, operation: EntityOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Attach an encoded relationship string (see [`crate::grammar`]).
    ///
    /// An empty string is stored as `None`: both mean "no relationships".
    #[must_use]
    pub fn with_relationships(mut self, relationships: Option<String>) -> Self {
        self.relationships = relationships.filter(|r| !r.is_empty());
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn operation(&self) -> EntityOperation {
        self.operation
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn relationships(&self) -> Option<&str> {
        self.relationships.as_deref()
    }

    /// The entity's `qualifiedName`. Always present by construction.
    pub fn qualified_name(&self) -> &str {
        self.attributes
            .get(QUALIFIED_NAME)
            .and_then(Scalar::as_str)
            .unwrap_or_default()
    }
}

// =============================================================================
// RELATIONSHIP RECORD
// =============================================================================

/// One standalone edge between two entities named by qualifiedName.
///
/// The endpoints are not checked against any entity stream; the catalog
/// resolves them by qualifiedName on ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipRecord {
    relationship_type: String,
    entity_type_1: String,
    entity_qualified_name_1: String,
    entity_type_2: String,
    entity_qualified_name_2: String,
    attributes: Attributes,
}

impl RelationshipRecord {
    /// Build an edge `(type_1, qualified_name_1) -[relationship_type]-> (type_2, qualified_name_2)`
    /// with no attributes.
    pub fn new(
        relationship_type: impl Into<String>,
        entity_type_1: impl Into<String>,
        entity_qualified_name_1: impl Into<String>,
        entity_type_2: impl Into<String>,
        entity_qualified_name_2: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            relationship_type: require_non_empty(relationship_type.into(), "relationshipType")?,
            entity_type_1: require_non_empty(entity_type_1.into(), "entityType1")?,
            entity_qualified_name_1: require_non_empty(
                entity_qualified_name_1.into(),
                "entityQualifiedName1",
            )?,
            entity_type_2: require_non_empty(entity_type_2.into(), "entityType2")?,
            entity_qualified_name_2: require_non_empty(
                entity_qualified_name_2.into(),
                "entityQualifiedName2",
            )?,
            attributes: Attributes::new(),
        })
    }

    /// Attach edge attributes, validated like entity attributes.
    pub fn with_attributes<K, V>(mut self, attributes: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: Into<String>,
        V: Into<Scalar>,
    {
        self.attributes = collect_attributes(attributes, &RESERVED_RELATIONSHIP_KEYS)?;
        Ok(self)
    }

    pub fn relationship_type(&self) -> &str {
        &self.relationship_type
    }

    pub fn entity_type_1(&self) -> &str {
        &self.entity_type_1
    }

    pub fn entity_qualified_name_1(&self) -> &str {
        &self.entity_qualified_name_1
    }

    pub fn entity_type_2(&self) -> &str {
        &self.entity_type_2
    }

    pub fn entity_qualified_name_2(&self) -> &str {
        &self.entity_qualified_name_2
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> EntityRecord {
        EntityRecord::new(
            "Actor",
            [("qualifiedName", "actor://Tom Cruise"), ("name", "Tom Cruise")],
        )
        .expect("valid entity")
    }

    #[test]
    fn entity_defaults_to_create_without_relationships() {
        let entity = actor();
        assert_eq!(entity.operation(), EntityOperation::Create);
        assert_eq!(entity.relationships(), None);
        assert_eq!(entity.qualified_name(), "actor://Tom Cruise");
        assert_eq!(entity.type_name(), "Actor");
    }

    #[test]
    fn entity_requires_qualified_name() {
        let result = EntityRecord::new("Actor", [("name", "Tom Cruise")]);
        assert!(matches!(
            result,
            Err(CatalogError::MissingQualifiedName { type_name }) if type_name == "Actor"
        ));
    }

    #[test]
    fn entity_rejects_non_string_qualified_name() {
        let result = EntityRecord::new("Actor", [("qualifiedName", Scalar::Int(7))]);
        assert!(matches!(result, Err(CatalogError::MissingQualifiedName { .. })));

        let result = EntityRecord::new("Actor", [("qualifiedName", "")]);
        assert!(matches!(result, Err(CatalogError::MissingQualifiedName { .. })));
    }

    #[test]
    fn entity_rejects_empty_type_name() {
        let result = EntityRecord::new("", [("qualifiedName", "x://1")]);
        assert!(matches!(
            result,
            Err(CatalogError::EmptyField { field: "typeName" })
        ));
    }

    #[test]
    fn entity_rejects_reserved_keys() {
        for key in RESERVED_ENTITY_KEYS {
            let result = EntityRecord::new("Actor", [("qualifiedName", "a://1"), (key, "x")]);
            assert!(
                matches!(result, Err(CatalogError::ReservedAttribute { .. })),
                "{key} should be reserved"
            );
        }
    }

    #[test]
    fn entity_rejects_non_finite_float_at_construction() {
        let result = EntityRecord::new(
            "Movie",
            [
                ("qualifiedName", Scalar::from("movie://Top Gun")),
                ("rating", Scalar::Float(f64::NAN)),
            ],
        );
        assert!(matches!(
            result,
            Err(CatalogError::UnserializableValue { key }) if key == "rating"
        ));
    }

    #[test]
    fn empty_relationships_string_is_none() {
        let entity = actor().with_relationships(Some(String::new()));
        assert_eq!(entity.relationships(), None);

        let entity = actor().with_relationships(Some("a#B#c".to_string()));
        assert_eq!(entity.relationships(), Some("a#B#c"));
    }

    #[test]
    fn relationship_rejects_empty_endpoint() {
        let result = RelationshipRecord::new("FILMED_AT", "Movie", "", "City", "city://Oakland");
        assert!(matches!(
            result,
            Err(CatalogError::EmptyField {
                field: "entityQualifiedName1"
            })
        ));
    }

    #[test]
    fn relationship_attributes_are_validated() {
        let base = RelationshipRecord::new(
            "FILMED_AT",
            "Movie",
            "movie://Top Gun",
            "City",
            "city://Oakland",
        )
        .expect("valid relationship");

        let ok = base
            .clone()
            .with_attributes([("days", Scalar::Int(12))])
            .expect("valid attributes");
        assert_eq!(ok.attributes().get("days"), Some(&Scalar::Int(12)));

        let reserved = base.with_attributes([("entityType2", "City")]);
        assert!(matches!(reserved, Err(CatalogError::ReservedAttribute { .. })));
    }
}
