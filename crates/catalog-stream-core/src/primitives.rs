//! # Wire Primitives
//!
//! Field names and separators fixed by the catalog's ingestion format.
//!
//! These are compiled in and never configurable: the catalog parses the
//! exact same names and characters back on its side.

// =============================================================================
// ENTITY FIELDS
// =============================================================================

/// Serialized key holding the catalog type name of an entity.
pub const TYPE_NAME: &str = "typeName";

/// Serialized key holding the write operation (`CREATE`, `UPDATE`).
pub const OPERATION: &str = "operation";

/// Serialized key holding the encoded embedded relationships (or null).
pub const RELATIONSHIPS: &str = "relationships";

/// Attribute key every entity must carry. Its value identifies the entity
/// globally and is the handle relationships use to name an endpoint.
pub const QUALIFIED_NAME: &str = "qualifiedName";

/// Keys an entity's attributes may not use, since the flattened
/// serialized form already owns them.
pub const RESERVED_ENTITY_KEYS: [&str; 3] = [TYPE_NAME, OPERATION, RELATIONSHIPS];

// =============================================================================
// RELATIONSHIP FIELDS
// =============================================================================

pub const RELATIONSHIP_TYPE: &str = "relationshipType";
pub const ENTITY_TYPE_1: &str = "entityType1";
pub const ENTITY_QUALIFIED_NAME_1: &str = "entityQualifiedName1";
pub const ENTITY_TYPE_2: &str = "entityType2";
pub const ENTITY_QUALIFIED_NAME_2: &str = "entityQualifiedName2";

/// Keys a relationship's attributes may not use.
pub const RESERVED_RELATIONSHIP_KEYS: [&str; 5] = [
    RELATIONSHIP_TYPE,
    ENTITY_TYPE_1,
    ENTITY_QUALIFIED_NAME_1,
    ENTITY_TYPE_2,
    ENTITY_QUALIFIED_NAME_2,
];

// =============================================================================
// RELATIONSHIP-STRING GRAMMAR
// =============================================================================

/// Separates the three fields of one embedded relationship:
/// `attributeName#relatedType#relatedQualifiedName`.
///
/// **Not escaped.** Type names, attribute names and qualifiedNames must never
/// contain this character.
pub const RELATIONSHIPS_KV_SEPARATOR: char = '#';

/// Separates embedded relationships inside one `relationships` value.
///
/// **Not escaped**, same constraint as [`RELATIONSHIPS_KV_SEPARATOR`].
pub const RELATIONSHIPS_SEPARATOR: char = '|';
