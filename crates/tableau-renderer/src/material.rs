//! Named material registry.

use std::path::{Path, PathBuf};

use tableau_core::Material;
use thiserror::Error;

/// Material lookup outcome when no entry matches.
///
/// "Nothing is defined at all" and "this tag is missing" are different
/// caller mistakes, so they are distinct variants rather than one sentinel.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaterialLookupError {
    #[error("material library is empty")]
    Empty,
    #[error("no material defined for tag {tag:?}")]
    NotFound { tag: String },
}

/// Errors loading a material table from a RON file.
#[derive(Debug, Error)]
pub enum MaterialConfigError {
    #[error("failed to read material file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse material definitions: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Ordered table of named material property sets.
///
/// Populated once during scene preparation and immutable afterwards; draw
/// code only ever reads it by tag.
pub struct MaterialLibrary {
    materials: Vec<Material>,
}

impl MaterialLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self {
            materials: Vec::new(),
        }
    }

    /// Parses a library from RON text: a list of material records.
    pub fn from_ron(text: &str) -> Result<Self, MaterialConfigError> {
        let materials: Vec<Material> = ron::from_str(text)?;
        tracing::info!(count = materials.len(), "loaded material definitions");
        Ok(Self { materials })
    }

    /// Loads a library from a RON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MaterialConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MaterialConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text)
    }

    /// Appends a material definition.
    ///
    /// Neither tag uniqueness nor color ranges are validated; lookups
    /// return the first match, so a duplicate tag shadows later entries.
    pub fn define(&mut self, material: Material) {
        self.materials.push(material);
    }

    /// Looks up a material by tag; first registration wins on duplicates.
    pub fn find(&self, tag: &str) -> Result<&Material, MaterialLookupError> {
        if self.materials.is_empty() {
            return Err(MaterialLookupError::Empty);
        }
        self.materials
            .iter()
            .find(|material| material.tag == tag)
            .ok_or_else(|| MaterialLookupError::NotFound {
                tag: tag.to_string(),
            })
    }

    /// Returns the defined materials in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    /// Number of defined materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns true if nothing has been defined.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::new()
    }
}
