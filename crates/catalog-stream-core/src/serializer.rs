//! # Record Serializer
//!
//! Flattens a record into the canonical `field name → string` mapping the
//! catalog loaders consume.
//!
//! The mapping is a `BTreeMap`, so keys always come out in ascending
//! lexicographic (byte) order no matter how the record was built.

use crate::primitives::{
    ENTITY_QUALIFIED_NAME_1, ENTITY_QUALIFIED_NAME_2, ENTITY_TYPE_1, ENTITY_TYPE_2, OPERATION,
    RELATIONSHIP_TYPE, RELATIONSHIPS, TYPE_NAME,
};
use crate::record::Attributes;
use crate::{EntityRecord, RelationshipRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// A record flattened to sorted field names and canonical string values.
///
/// `None` is the null marker; it is kept, never omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerializedRecord(BTreeMap<String, Option<String>>);

impl SerializedRecord {
    /// Look up a field.
    ///
    /// Returns `None` if the field is absent, `Some(None)` if it is null.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.0.get(key).map(Option::as_deref)
    }

    /// Field names in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Option<String>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Option<String>> {
        self.0
    }

    fn insert(&mut self, key: &str, value: Option<String>) {
        self.0.insert(key.to_string(), value);
    }

    fn merge_attributes(&mut self, attributes: &Attributes) {
        for (key, value) in attributes {
            self.0.insert(key.clone(), Some(value.to_string()));
        }
    }
}

impl<'a> IntoIterator for &'a SerializedRecord {
    type Item = (&'a String, &'a Option<String>);
    type IntoIter = btree_map::Iter<'a, String, Option<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Serialize an entity: `typeName`, `operation`, `relationships` and every
/// attribute, flattened into one sorted mapping.
#[must_use]
pub fn serialize_entity(entity: &EntityRecord) -> SerializedRecord {
    let mut record = SerializedRecord::default();
    record.insert(TYPE_NAME, Some(entity.type_name().to_string()));
    record.insert(OPERATION, Some(entity.operation().name().to_string()));
    record.insert(RELATIONSHIPS, entity.relationships().map(str::to_string));
    record.merge_attributes(entity.attributes());
    record
}

/// Serialize a standalone relationship: the five endpoint fields plus any
/// attributes, flattened into one sorted mapping.
#[must_use]
pub fn serialize_relationship(relationship: &RelationshipRecord) -> SerializedRecord {
    let mut record = SerializedRecord::default();
    record.insert(
        RELATIONSHIP_TYPE,
        Some(relationship.relationship_type().to_string()),
    );
    record.insert(ENTITY_TYPE_1, Some(relationship.entity_type_1().to_string()));
    record.insert(
        ENTITY_QUALIFIED_NAME_1,
        Some(relationship.entity_qualified_name_1().to_string()),
    );
    record.insert(ENTITY_TYPE_2, Some(relationship.entity_type_2().to_string()));
    record.insert(
        ENTITY_QUALIFIED_NAME_2,
        Some(relationship.entity_qualified_name_2().to_string()),
    );
    record.merge_attributes(relationship.attributes());
    record
}

// =============================================================================
// TESTS
// =============================================================================
