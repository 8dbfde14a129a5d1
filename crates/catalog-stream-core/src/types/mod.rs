//! # Core Type Definitions
//!
//! This module contains the value-level building blocks shared by every
//! record:
//! - Attribute values (`Scalar`)
//! - Catalog write semantics (`EntityOperation`)
//! - Error types (`CatalogError`)
//!
//! ## Canonical Text
//!
//! Every value here has exactly one canonical string form. The serializer
//! relies on that: two equal values always produce the same bytes.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CatalogError>;

// =============================================================================
// SCALAR
// =============================================================================

/// A single attribute value.
///
/// The catalog accepts a fixed, small set of value kinds under arbitrary
/// attribute names. Floats must be finite; see [`Scalar::is_serializable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// Whether the value has a canonical text form.
    ///
    /// NaN and infinities have none and are rejected when a record is built.
    #[must_use]
    pub fn is_serializable(&self) -> bool {
        match self {
            Self::Float(f) => f.is_finite(),
            Self::Bool(_) | Self::Int(_) | Self::Str(_) => true,
        }
    }

    /// Borrow the value as a string slice if it is a `Str`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

// The value kind does not survive: `Int(2)` and `Float(2.0)` both render `2`.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Scalar {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

// =============================================================================
// ENTITY OPERATION
// =============================================================================

/// Catalog write semantics for an entity.
///
/// Serializes to its symbolic name, never a numeric code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityOperation {
    #[default]
    Create,
    Update,
}

impl EntityOperation {
    /// The symbolic name the catalog expects.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
        }
    }
}

impl fmt::Display for EntityOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building, serializing or emitting records.
///
/// Running a model past its last record is NOT an error: the protocol keeps
/// returning `Ok(None)`.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An embedded relationship segment did not split into exactly three fields.
    #[error("Malformed relationship segment '{segment}': expected 3 fields, found {fields}")]
    MalformedRelationship { segment: String, fields: usize },

    /// An attribute value has no canonical text form (non-finite float).
    #[error("Attribute '{key}' holds a value that cannot be serialized")]
    UnserializableValue { key: String },

    /// An entity was built without a non-empty string `qualifiedName`.
    #[error("Entity of type '{type_name}' has no qualifiedName")]
    MissingQualifiedName { type_name: String },

    /// An attribute key collides with a field the serialized form owns.
    #[error("Attribute '{key}' collides with a reserved record field")]
    ReservedAttribute { key: String },

    /// A required record field was empty.
    #[error("Required field '{field}' is empty")]
    EmptyField { field: &'static str },

    /// The same qualifiedName was emitted twice in one session.
    #[error("Duplicate qualifiedName: {0}")]
    DuplicateQualifiedName(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred in a sink.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_display_is_canonical() {
        assert_eq!(Scalar::from("Top Gun").to_string(), "Top Gun");
        assert_eq!(Scalar::from(1986i64).to_string(), "1986");
        assert_eq!(Scalar::from(-3).to_string(), "-3");
        assert_eq!(Scalar::from(true).to_string(), "true");
        assert_eq!(Scalar::from(1.5).to_string(), "1.5");
        assert_eq!(Scalar::from(2.0).to_string(), "2");
    }

    #[test]
    fn non_finite_floats_are_not_serializable() {
        assert!(!Scalar::Float(f64::NAN).is_serializable());
        assert!(!Scalar::Float(f64::INFINITY).is_serializable());
        assert!(!Scalar::Float(f64::NEG_INFINITY).is_serializable());
        assert!(Scalar::Float(0.25).is_serializable());
        assert!(Scalar::from("x").is_serializable());
    }

    #[test]
    fn operation_uses_symbolic_name() {
        assert_eq!(EntityOperation::default(), EntityOperation::Create);
        assert_eq!(EntityOperation::Create.to_string(), "CREATE");
        assert_eq!(EntityOperation::Update.name(), "UPDATE");
    }

    #[test]
    fn operation_serde_matches_name() {
        let json = serde_json::to_string(&EntityOperation::Update).expect("serialize");
        assert_eq!(json, "\"UPDATE\"");
        let op: EntityOperation = serde_json::from_str("\"CREATE\"").expect("deserialize");
        assert_eq!(op, EntityOperation::Create);
    }

    #[test]
    fn integral_float_renders_like_int() {
        assert_eq!(Scalar::Float(2.0).to_string(), Scalar::Int(2).to_string());
        assert_eq!(Scalar::Float(2.5).to_string(), "2.5");
    }
}
