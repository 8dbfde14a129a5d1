//! # Model Fixture Files
//!
//! Parses a file describing reference models into ready-to-drain instances.
//!
//! ```toml
//! [[movies]]
//! name = "Top Gun"
//! actors = ["Tom Cruise", "Meg Ryan"]
//! cities = ["San Diego", "Oakland"]
//!
//! [[studios]]
//! name = "Paramount"
//! movies = [{ name = "Airplane!", cities = ["Los Angeles"] }]
//! ```
//!
//! The same shape is accepted as JSON. Parsing only; file access lives in
//! the command layer.

use catalog_stream_core::{CatalogError, CatalogSerializable, Movie, Studio};
use serde::Deserialize;
use std::path::Path;

/// Accepted fixture encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureFormat {
    Toml,
    Json,
}

impl FixtureFormat {
    /// Pick the format from a file extension (`.toml` or `.json`).
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            other => Err(CatalogError::SerializationError(format!(
                "Unsupported fixture extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

/// Top-level contents of a fixture file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelFile {
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub studios: Vec<Studio>,
}

impl ModelFile {
    /// Parse fixture text in the given format.
    pub fn parse(contents: &str, format: FixtureFormat) -> Result<Self, CatalogError> {
        match format {
            FixtureFormat::Toml => toml::from_str(contents)
                .map_err(|e| CatalogError::SerializationError(format!("Invalid TOML: {}", e))),
            FixtureFormat::Json => serde_json::from_str(contents)
                .map_err(|e| CatalogError::SerializationError(format!("Invalid JSON: {}", e))),
        }
    }

    pub fn model_count(&self) -> usize {
        self.movies.len() + self.studios.len()
    }

    /// All models in file order: movies first, then studios.
    pub fn into_models(self) -> Vec<Box<dyn CatalogSerializable>> {
        let movies = self
            .movies
            .into_iter()
            .map(|m| Box::new(m) as Box<dyn CatalogSerializable>);
        let studios = self
            .studios
            .into_iter()
            .map(|s| Box::new(s) as Box<dyn CatalogSerializable>);
        movies.chain(studios).collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TOML_FIXTURE: &str = r#"
[[movies]]
name = "Top Gun"
actors = ["Tom Cruise", "Meg Ryan"]
cities = ["San Diego", "Oakland"]

[[studios]]
name = "Paramount"
movies = [{ name = "Airplane!", cities = ["Los Angeles"] }]
"#;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            FixtureFormat::from_path(Path::new("models.toml")).expect("toml"),
            FixtureFormat::Toml
        );
        assert_eq!(
            FixtureFormat::from_path(Path::new("a/b/models.json")).expect("json"),
            FixtureFormat::Json
        );
        assert!(FixtureFormat::from_path(Path::new("models.yaml")).is_err());
        assert!(FixtureFormat::from_path(Path::new("models")).is_err());
    }

    #[test]
    fn parses_toml_fixture() {
        let file = ModelFile::parse(TOML_FIXTURE, FixtureFormat::Toml).expect("parse");

        assert_eq!(file.model_count(), 2);
        assert_eq!(file.movies[0].name(), "Top Gun");
        assert_eq!(file.movies[0].actors().len(), 2);
        assert_eq!(file.studios[0].movies()[0].name(), "Airplane!");
        assert!(file.studios[0].movies()[0].actors().is_empty());
    }

    #[test]
    fn parses_json_fixture() {
        let file = ModelFile::parse(
            r#"{"movies":[{"name":"Heat","actors":["Al Pacino"]}]}"#,
            FixtureFormat::Json,
        )
        .expect("parse");

        assert_eq!(file.model_count(), 1);
        assert!(file.movies[0].cities().is_empty());
    }

    #[test]
    fn rejects_unknown_sections() {
        let result = ModelFile::parse("[[books]]\nname = \"Dune\"\n", FixtureFormat::Toml);
        assert!(matches!(result, Err(CatalogError::SerializationError(_))));
    }

    #[test]
    fn models_keep_file_order() {
        let file = ModelFile::parse(TOML_FIXTURE, FixtureFormat::Toml).expect("parse");
        let mut models = file.into_models();
        assert_eq!(models.len(), 2);

        let first = models[0].next_entity().expect("pull").expect("entity");
        assert_eq!(first.qualified_name(), "actor://Tom Cruise");
        let second = models[1].next_entity().expect("pull").expect("entity");
        assert_eq!(second.qualified_name(), "city://Los Angeles");
    }

    #[test]
    fn rejects_misspelled_model_field() {
        let result = ModelFile::parse(
            "[[movies]]\nname = \"Top Gun\"\nactor = [\"Tom Cruise\"]\n",
            FixtureFormat::Toml,
        );
        assert!(matches!(result, Err(CatalogError::SerializationError(_))));
    }
}
