//! Studio, a composite of composites.

use super::{Cursor, Movie, named_entity};
use crate::grammar::{EmbeddedRelationship, encode_relationships};
use crate::{CatalogSerializable, EntityRecord, RelationshipRecord, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum EntityPhase {
    #[default]
    Movies,
    Studio,
    Done,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum RelationshipPhase {
    #[default]
    Movies,
    ProducedBy,
    Done,
}

/// A studio owning movies.
///
/// Entities: each movie's full entity stream in turn, then the studio, which
/// embeds `movies#MOVIE#<movie qualifiedName>` per movie. Relationships: each
/// movie's standalone relationships in turn, then one `PRODUCED_BY` edge per
/// movie.
///
/// The studio drives its movies' own cursors, so only one child is active at
/// a time. Movies are consumed by enumeration. Two movies sharing an actor
/// will both emit that actor; deduplication is left to the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Studio {
    name: String,
    #[serde(default)]
    movies: Vec<Movie>,
    #[serde(skip)]
    entity_cursor: Cursor<EntityPhase>,
    #[serde(skip)]
    relationship_cursor: Cursor<RelationshipPhase>,
}

impl Studio {
    pub const TYPE_NAME: &'static str = "Studio";
    pub const MOVIE_ATTRIBUTE: &'static str = "movies";
    pub const MOVIE_RELATION_TYPE: &'static str = "MOVIE";
    pub const PRODUCED_BY_RELATION_TYPE: &'static str = "PRODUCED_BY";

    /// Build a studio from freshly constructed movies.
    pub fn new(name: impl Into<String>, movies: impl IntoIterator<Item = Movie>) -> Self {
        Self {
            name: name.into(),
            movies: movies.into_iter().collect(),
            entity_cursor: Cursor::default(),
            relationship_cursor: Cursor::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn qualified_name(&self) -> String {
        format!("studio://{}", self.name)
    }

    fn to_entity(&self) -> Result<EntityRecord> {
        let embedded: Vec<EmbeddedRelationship> = self
            .movies
            .iter()
            .map(|movie| {
                EmbeddedRelationship::new(
                    Self::MOVIE_ATTRIBUTE,
                    Self::MOVIE_RELATION_TYPE,
                    movie.qualified_name(),
                )
            })
            .collect();

        Ok(
            named_entity(Self::TYPE_NAME, self.qualified_name(), &self.name)?
                .with_relationships(encode_relationships(&embedded)),
        )
    }

    fn produced_by(&self, movie: &Movie) -> Result<RelationshipRecord> {
        RelationshipRecord::new(
            Self::PRODUCED_BY_RELATION_TYPE,
            Movie::TYPE_NAME,
            movie.qualified_name(),
            Self::TYPE_NAME,
            self.qualified_name(),
        )
    }
}

impl CatalogSerializable for Studio {
    fn next_entity(&mut self) -> Result<Option<EntityRecord>> {
        loop {
            match self.entity_cursor.phase {
                EntityPhase::Movies => match self.movies.get_mut(self.entity_cursor.index) {
                    Some(movie) => match movie.next_entity()? {
                        Some(entity) => return Ok(Some(entity)),
                        None => {
                            self.entity_cursor.bump();
                        }
                    },
                    None => self.entity_cursor.advance(EntityPhase::Studio),
                },
                EntityPhase::Studio => {
                    self.entity_cursor.advance(EntityPhase::Done);
                    return self.to_entity().map(Some);
                }
                EntityPhase::Done => return Ok(None),
            }
        }
    }

    fn next_relationship(&mut self) -> Result<Option<RelationshipRecord>> {
        loop {
            match self.relationship_cursor.phase {
                RelationshipPhase::Movies => {
                    match self.movies.get_mut(self.relationship_cursor.index) {
                        Some(movie) => match movie.next_relationship()? {
                            Some(relationship) => return Ok(Some(relationship)),
                            None => {
                                self.relationship_cursor.bump();
                            }
                        },
                        None => self
                            .relationship_cursor
                            .advance(RelationshipPhase::ProducedBy),
                    }
                }
                RelationshipPhase::ProducedBy => {
                    match self.movies.get(self.relationship_cursor.index) {
                        Some(movie) => {
                            self.relationship_cursor.bump();
                            return self.produced_by(movie).map(Some);
                        }
                        None => self.relationship_cursor.advance(RelationshipPhase::Done),
                    }
                }
                RelationshipPhase::Done => return Ok(None),
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Actor, City, entities, relationships};

    fn paramount() -> Studio {
        Studio::new(
            "Paramount",
            [
                Movie::new(
                    "Top Gun",
                    [Actor::new("Tom Cruise")],
                    [City::new("San Diego")],
                ),
                Movie::new("Airplane!", [], [City::new("Los Angeles")]),
            ],
        )
    }

    #[test]
    fn movie_streams_precede_the_studio() {
        let mut studio = paramount();
        let names: Vec<String> = entities(&mut studio)
            .map(|e| e.expect("entity").qualified_name().to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "actor://Tom Cruise",
                "city://San Diego",
                "movie://Top Gun",
                "city://Los Angeles",
                "movie://Airplane!",
                "studio://Paramount",
            ]
        );
    }

    #[test]
    fn studio_embeds_its_movies() {
        let mut studio = paramount();
        let last = entities(&mut studio)
            .last()
            .expect("some entity")
            .expect("valid entity");

        assert_eq!(
            last.relationships(),
            Some("movies#MOVIE#movie://Top Gun|movies#MOVIE#movie://Airplane!")
        );
    }

    #[test]
    fn filmed_at_edges_then_produced_by_edges() {
        let mut studio = paramount();
        let edges: Vec<(String, String, String)> = relationships(&mut studio)
            .map(|r| {
                let r = r.expect("relationship");
                (
                    r.relationship_type().to_string(),
                    r.entity_qualified_name_1().to_string(),
                    r.entity_qualified_name_2().to_string(),
                )
            })
            .collect();

        let expected = [
            ("FILMED_AT", "movie://Top Gun", "city://San Diego"),
            ("FILMED_AT", "movie://Airplane!", "city://Los Angeles"),
            ("PRODUCED_BY", "movie://Top Gun", "studio://Paramount"),
            ("PRODUCED_BY", "movie://Airplane!", "studio://Paramount"),
        ];
        assert_eq!(edges.len(), expected.len());
        for (edge, (kind, from, to)) in edges.iter().zip(expected) {
            assert_eq!(edge.0, kind);
            assert_eq!(edge.1, from);
            assert_eq!(edge.2, to);
        }
    }

    #[test]
    fn empty_studio_yields_only_itself() {
        let mut studio = Studio::new("Empty Lot", []);

        let entity = studio.next_entity().expect("pull").expect("studio");
        assert_eq!(entity.qualified_name(), "studio://Empty Lot");
        assert_eq!(entity.relationships(), None);
        assert!(studio.next_entity().expect("pull").is_none());
        assert!(studio.next_relationship().expect("pull").is_none());
        assert!(studio.next_relationship().expect("pull").is_none());
    }

    #[test]
    fn misspelled_field_is_rejected() {
        let result = serde_json::from_str::<Studio>(r#"{"name":"Paramount","movie":[]}"#);
        assert!(result.is_err());
    }
}
