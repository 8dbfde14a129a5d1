//! # catalog-stream-core
//!
//! Graph-to-stream reduction for graph-metadata catalogs - THE LOGIC.
//!
//! A catalog ingestion API accepts only flat records: a typed entity with a
//! bag of scalar attributes, and a typed relationship between two entities
//! already identified by `qualifiedName`. This crate turns composite domain
//! models into exactly those two streams, one record at a time.
//!
//! ## Data Flow
//!
//! ```text
//!  composite model ──next_entity()──────▶ EntityRecord ──┐
//!  (CatalogSerializable)                                 ├─▶ SerializedRecord ─▶ CanonicalLine ─▶ RecordSink
//!                   ──next_relationship()▶ RelationshipRecord ┘
//! ```
//!
//! ## Architectural Constraints
//!
//! - NO async, NO network, NO file paths: sinks are the only boundary
//! - Deterministic: every serialized mapping is a `BTreeMap`
//! - Lazy: models hold a cursor, never a materialized output

// =============================================================================
// MODULES
// =============================================================================

pub mod document;
pub mod drain;
pub mod grammar;
pub mod models;
pub mod primitives;
pub mod protocol;
pub mod record;
pub mod serializer;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{CatalogError, EntityOperation, Result, Scalar};

pub use record::{Attributes, EntityRecord, RelationshipRecord};

// =============================================================================
// RE-EXPORTS: Grammar & Serialization
// =============================================================================

pub use document::{CanonicalLine, Document};
pub use grammar::{EmbeddedRelationship, decode_relationships, encode_relationships};
pub use serializer::{SerializedRecord, serialize_entity, serialize_relationship};

// =============================================================================
// RE-EXPORTS: Enumeration
// =============================================================================

pub use drain::{
    CollectingSink, DrainStats, LineWriter, RecordSink, check_unique_qualified_names, drain,
};
pub use models::{Actor, City, Movie, Studio};
pub use protocol::{CatalogSerializable, Entities, IterModel, Relationships, entities, relationships};
