//! Keyed content-block store.
//!
//! One UTF-8 text file per (unit, class, key) triple, laid out as
//! `content/unit<N>/class<M>/<key>.txt`. Saves overwrite wholesale;
//! there is no versioning and no draft state — a block is either
//! absent or present with its current text.

use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Strip every character outside `[A-Za-z0-9_-]` from a content key.
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// The content-block store rooted at a directory.
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn block_dir(&self, unit: u32, class: u32) -> PathBuf {
        self.root
            .join(format!("unit{unit}"))
            .join(format!("class{class}"))
    }

    fn block_path(&self, unit: u32, class: u32, key: &str) -> Result<PathBuf, StoreError> {
        let safe = sanitize_key(key);
        if safe.is_empty() {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.block_dir(unit, class).join(format!("{safe}.txt")))
    }

    /// Overwrite the block with the given text, creating the unit/class
    /// directories as needed. Returns the path written to. A key that
    /// sanitizes to nothing is rejected before any I/O.
    pub fn save(
        &self,
        unit: u32,
        class: u32,
        key: &str,
        text: &str,
    ) -> Result<PathBuf, StoreError> {
        let path = self.block_path(unit, class, key)?;
        let dir = self.block_dir(unit, class);
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        std::fs::write(&path, text).map_err(|e| StoreError::io(&path, e))?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "saved content block");
        Ok(path)
    }

    /// Read the block's current text. `None` when it was never saved;
    /// an empty string and "saved as empty" are indistinguishable
    /// beyond that.
    pub fn load(&self, unit: u32, class: u32, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.block_path(unit, class, key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }
}
