//! Movie, with actor and city children.

use super::{Cursor, named_entity};
use crate::grammar::{EmbeddedRelationship, encode_relationships};
use crate::{CatalogSerializable, EntityRecord, RelationshipRecord, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// LEAVES
// =============================================================================

/// A performer. Deserializes from a bare name string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Actor {
    name: String,
}

impl Actor {
    pub const TYPE_NAME: &'static str = "Actor";

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_name(&self) -> String {
        format!("actor://{}", self.name)
    }

    fn to_entity(&self) -> Result<EntityRecord> {
        named_entity(Self::TYPE_NAME, self.qualified_name(), &self.name)
    }
}

/// A filming location. Deserializes from a bare name string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct City {
    name: String,
}

impl City {
    pub const TYPE_NAME: &'static str = "City";

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_name(&self) -> String {
        format!("city://{}", self.name)
    }

    fn to_entity(&self) -> Result<EntityRecord> {
        named_entity(Self::TYPE_NAME, self.qualified_name(), &self.name)
    }
}

// =============================================================================
// MOVIE
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum EntityPhase {
    #[default]
    Actors,
    Cities,
    Movie,
    Done,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum RelationshipPhase {
    #[default]
    FilmedAt,
    Done,
}

/// A movie composed of actors and cities.
///
/// Entity order: every actor, every city, then the movie. The movie embeds
/// one `actors#ACTOR#<actor qualifiedName>` per actor. Each city gets a
/// standalone `FILMED_AT` relationship from the movie instead, since the
/// movie's entity type has no attribute slot for cities.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Movie {
    name: String,
    #[serde(default)]
    actors: Vec<Actor>,
    #[serde(default)]
    cities: Vec<City>,
    #[serde(skip)]
    entity_cursor: Cursor<EntityPhase>,
    #[serde(skip)]
    relationship_cursor: Cursor<RelationshipPhase>,
}

impl Movie {
    pub const TYPE_NAME: &'static str = "Movie";
    pub const ACTOR_ATTRIBUTE: &'static str = "actors";
    pub const ACTOR_RELATION_TYPE: &'static str = "ACTOR";
    pub const CITY_RELATION_TYPE: &'static str = "FILMED_AT";

    pub fn new(
        name: impl Into<String>,
        actors: impl IntoIterator<Item = Actor>,
        cities: impl IntoIterator<Item = City>,
    ) -> Self {
        Self {
            name: name.into(),
            actors: actors.into_iter().collect(),
            cities: cities.into_iter().collect(),
            entity_cursor: Cursor::default(),
            relationship_cursor: Cursor::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn qualified_name(&self) -> String {
        format!("movie://{}", self.name)
    }

    fn to_entity(&self) -> Result<EntityRecord> {
        let embedded: Vec<EmbeddedRelationship> = self
            .actors
            .iter()
            .map(|actor| {
                EmbeddedRelationship::new(
                    Self::ACTOR_ATTRIBUTE,
                    Self::ACTOR_RELATION_TYPE,
                    actor.qualified_name(),
                )
            })
            .collect();

        Ok(
            named_entity(Self::TYPE_NAME, self.qualified_name(), &self.name)?
                .with_relationships(encode_relationships(&embedded)),
        )
    }

    fn filmed_at(&self, city: &City) -> Result<RelationshipRecord> {
        RelationshipRecord::new(
            Self::CITY_RELATION_TYPE,
            Self::TYPE_NAME,
            self.qualified_name(),
            City::TYPE_NAME,
            city.qualified_name(),
        )
    }
}

impl CatalogSerializable for Movie {
    fn next_entity(&mut self) -> Result<Option<EntityRecord>> {
        loop {
            match self.entity_cursor.phase {
                EntityPhase::Actors => match self.actors.get(self.entity_cursor.index) {
                    Some(actor) => {
                        self.entity_cursor.bump();
                        return actor.to_entity().map(Some);
                    }
                    None => self.entity_cursor.advance(EntityPhase::Cities),
                },
                EntityPhase::Cities => match self.cities.get(self.entity_cursor.index) {
                    Some(city) => {
                        self.entity_cursor.bump();
                        return city.to_entity().map(Some);
                    }
                    None => self.entity_cursor.advance(EntityPhase::Movie),
                },
                EntityPhase::Movie => {
                    self.entity_cursor.advance(EntityPhase::Done);
                    return self.to_entity().map(Some);
                }
                EntityPhase::Done => return Ok(None),
            }
        }
    }

    fn next_relationship(&mut self) -> Result<Option<RelationshipRecord>> {
        match self.relationship_cursor.phase {
            RelationshipPhase::FilmedAt => match self.cities.get(self.relationship_cursor.index) {
                Some(city) => {
                    self.relationship_cursor.bump();
                    self.filmed_at(city).map(Some)
                }
                None => {
                    self.relationship_cursor.advance(RelationshipPhase::Done);
                    Ok(None)
                }
            },
            RelationshipPhase::Done => Ok(None),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
