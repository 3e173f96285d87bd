use super::CatalogSource;
use crate::error::{Result, VitrineError};
use crate::model::Item;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed catalog: a JSON array of items.
///
/// The file is read fresh on every [`CatalogSource::items`] call so a
/// changed snapshot is picked up on the next mount.
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonCatalog {
    fn items(&self) -> Result<Vec<Item>> {
        if !self.path.exists() {
            return Err(VitrineError::Catalog(format!(
                "Catalog file not found: {}",
                self.path.display()
            )));
        }
        let content = fs::read_to_string(&self.path).map_err(VitrineError::Io)?;
        let items: Vec<Item> =
            serde_json::from_str(&content).map_err(VitrineError::Serialization)?;
        Ok(items)
    }
}
