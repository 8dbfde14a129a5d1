//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::fixture::{FixtureFormat, ModelFile};
use catalog_stream_core::{
    Actor, CatalogError, CatalogSerializable, City, CollectingSink, DrainStats, LineWriter, Movie,
    RecordSink, check_unique_qualified_names, decode_relationships, drain,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE LIMITS
// =============================================================================

/// Maximum fixture file size (16 MB).
///
/// Fixtures are parsed into memory in full before any model is drained.
pub const MAX_INPUT_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), CatalogError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| CatalogError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(CatalogError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve an input path and make sure it is a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, CatalogError> {
    let canonical = path.canonicalize().map_err(|e| {
        CatalogError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(CatalogError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve an output path: the parent directory must already exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, CatalogError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        CatalogError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(CatalogError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| CatalogError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

/// Resolve both output destinations. `None` means stdout.
///
/// Two independent handles on one file would overwrite each other, so the
/// streams must name different files.
fn resolve_outputs(
    entities: Option<&Path>,
    relationships: Option<&Path>,
) -> Result<(Option<PathBuf>, Option<PathBuf>), CatalogError> {
    let entities = entities.map(validate_output_path).transpose()?;
    let relationships = relationships.map(validate_output_path).transpose()?;

    if let (Some(e), Some(r)) = (&entities, &relationships) {
        if e == r {
            return Err(CatalogError::IoError(format!(
                "Entity and relationship output both point at '{}'",
                e.display()
            )));
        }
    }
    Ok((entities, relationships))
}

/// Open a resolved output destination: a created file, or stdout when absent.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, CatalogError> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                CatalogError::IoError(format!("Cannot create '{}': {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

/// Read and parse a fixture file.
pub fn load_model_file(path: &Path) -> Result<ModelFile, CatalogError> {
    let format = FixtureFormat::from_path(path)?;
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_INPUT_FILE_SIZE)?;

    let contents = std::fs::read_to_string(&validated)
        .map_err(|e| CatalogError::IoError(format!("Read file: {}", e)))?;

    ModelFile::parse(&contents, format)
}

// =============================================================================
// EMIT COMMAND
// =============================================================================

/// Drain one model into `sink`, optionally enforcing unique qualifiedNames.
///
/// With the check on, the model is collected first and only written once it
/// has passed.
fn emit_model<S: RecordSink + ?Sized>(
    model: &mut dyn CatalogSerializable,
    sink: &mut S,
    check_unique: bool,
) -> Result<DrainStats, CatalogError> {
    if !check_unique {
        return drain(model, sink);
    }

    let mut collected = CollectingSink::new();
    let stats = drain(model, &mut collected)?;
    check_unique_qualified_names(&collected.entities)?;

    for line in &collected.entities {
        sink.accept_entity(line)?;
    }
    for line in &collected.relationships {
        sink.accept_relationship(line)?;
    }
    Ok(stats)
}

/// Drain every model of a fixture file into entity and relationship lines.
pub fn cmd_emit(
    input: &Path,
    entities: Option<&Path>,
    relationships: Option<&Path>,
    check_unique: bool,
) -> Result<DrainStats, CatalogError> {
    let (entities, relationships) = resolve_outputs(entities, relationships)?;

    tracing::info!("Loading models from {}", input.display());

    let file = load_model_file(input)?;
    tracing::info!("Loaded {} models", file.model_count());

    let mut writer = LineWriter::new(
        open_output(entities.as_deref())?,
        open_output(relationships.as_deref())?,
    );
    let mut total = DrainStats::default();

    for (index, mut model) in file.into_models().into_iter().enumerate() {
        let stats = emit_model(model.as_mut(), &mut writer, check_unique)?;
        tracing::debug!(
            model = index,
            entities = stats.entities,
            relationships = stats.relationships,
            "model emitted"
        );
        total.absorb(stats);
    }

    writer.flush()?;

    tracing::info!(
        "Emitted {} entities and {} relationships",
        total.entities,
        total.relationships
    );
    Ok(total)
}

// =============================================================================
// DECODE COMMAND
// =============================================================================

/// Print the relationships folded into one `relationships` value.
pub fn cmd_decode(encoded: &str, json_mode: bool) -> Result<(), CatalogError> {
    let decoded = decode_relationships(Some(encoded))?;

    if json_mode {
        let output = serde_json::to_string_pretty(&decoded)
            .map_err(|e| CatalogError::SerializationError(e.to_string()))?;
        println!("{}", output);
        return Ok(());
    }

    println!("Relationships: {}", decoded.len());
    for relationship in &decoded {
        println!(
            "  {} -> {} {}",
            relationship.attribute_name,
            relationship.related_type,
            relationship.related_qualified_name
        );
    }

    Ok(())
}

// =============================================================================
// EXAMPLE COMMAND
// =============================================================================

/// The reference Top Gun model.
pub fn top_gun() -> Movie {
    Movie::new(
        "Top Gun",
        [Actor::new("Tom Cruise"), Actor::new("Meg Ryan")],
        [City::new("San Diego"), City::new("Oakland")],
    )
}

/// Drain the reference model to stdout.
pub fn cmd_example() -> Result<(), CatalogError> {
    let mut writer = LineWriter::new(io::stdout(), io::stdout());
    let stats = drain(&mut top_gun(), &mut writer)?;
    writer.flush()?;

    tracing::info!(
        "Emitted {} entities and {} relationships",
        stats.entities,
        stats.relationships
    );
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
