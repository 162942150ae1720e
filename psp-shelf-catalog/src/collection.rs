//! The user's personal game collection.
//!
//! Stored as pretty-printed JSON at `<data dir>/psp-shelf/collection.json`.
//! Items are keyed by slug and kept in insertion order.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Collection file format version.
const COLLECTION_VERSION: u32 = 1;

/// A game the user has added to their collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionItem {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    /// Local time the item was added, `%Y-%m-%d %H:%M:%S`.
    pub added_at: String,
}

impl CollectionItem {
    /// New item stamped with the current local time.
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            released: None,
            rating: None,
            added_at: chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CollectionFile {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    games: Vec<CollectionItem>,
}

/// A collection bound to the file it was loaded from.
#[derive(Debug)]
pub struct Collection {
    path: PathBuf,
    items: Vec<CollectionItem>,
}

/// Default location of the collection file.
pub fn collection_path() -> Result<PathBuf, CatalogError> {
    let base = dirs::data_dir().ok_or(CatalogError::NoDataDir)?;
    Ok(base.join("psp-shelf").join("collection.json"))
}

impl Collection {
    /// Open the collection at the default location.
    pub fn open_default() -> Result<Self, CatalogError> {
        Self::open(&collection_path()?)
    }

    /// Open the collection at `path`. A missing file is an empty collection.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Ok(Self {
                path: path.to_path_buf(),
                items: Vec::new(),
            });
        }
        let contents = fs::read_to_string(path).map_err(|e| CatalogError::io(path.display(), e))?;
        let file: CollectionFile =
            serde_json::from_str(&contents).map_err(|e| CatalogError::Json {
                path: path.display().to_string(),
                source: e,
            })?;
        if file.version > COLLECTION_VERSION {
            log::warn!(
                "Collection file {} has version {} (expected {}); reading anyway",
                path.display(),
                file.version,
                COLLECTION_VERSION,
            );
        }
        Ok(Self {
            path: path.to_path_buf(),
            items: file.games,
        })
    }

    /// Write the collection back to its file, creating parent directories.
    pub fn save(&self) -> Result<(), CatalogError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent.display(), e))?;
        }
        let file = CollectionFile {
            version: COLLECTION_VERSION,
            games: self.items.clone(),
        };
        let contents = serde_json::to_string_pretty(&file).map_err(|e| CatalogError::Json {
            path: self.path.display().to_string(),
            source: e,
        })?;
        fs::write(&self.path, contents).map_err(|e| CatalogError::io(self.path.display(), e))
    }

    /// Add an item. Returns `false` if the slug is already present.
    pub fn add(&mut self, item: CollectionItem) -> bool {
        if self.contains(&item.slug) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove by slug. Returns `false` if it was not in the collection.
    pub fn remove(&mut self, slug: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.slug != slug);
        self.items.len() != before
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.items.iter().any(|i| i.slug == slug)
    }

    pub fn items(&self) -> &[CollectionItem] {
        &self.items
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
