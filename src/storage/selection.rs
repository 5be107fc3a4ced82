//! Persisted radar selection
//!
//! The id of the last selected radar is kept in a one-line text file so the
//! next session opens the same radar.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Config;

/// File-backed store for the selected radar id
#[derive(Debug, Clone)]
pub struct SelectionStore {
    path: PathBuf,
}

impl SelectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the user's data directory, used outside a project
    pub fn user() -> Option<Self> {
        Config::project_dirs().map(|dirs| Self::new(dirs.data_dir().join("selection")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the persisted id, if any
    pub fn get(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let id = content.trim();
                Ok((!id.is_empty()).then(|| id.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read selection: {}", self.path.display())),
        }
    }

    /// Persists an id atomically (temp file + rename)
    pub fn set(&self, id: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, format!("{}\n", id))
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })
    }

    /// Forgets the persisted id; clearing twice is fine
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove selection: {}", self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_means_no_selection() {
        let dir = TempDir::new().unwrap();
        let store = SelectionStore::new(dir.path().join("selection"));
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let dir = TempDir::new().unwrap();
        let store = SelectionStore::new(dir.path().join("state").join("selection"));

        store.set("da").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("da"));

        store.set("default").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("default"));
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn clear_removes_selection() {
        let dir = TempDir::new().unwrap();
        let store = SelectionStore::new(dir.path().join("selection"));

        store.set("da").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn blank_file_means_no_selection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("selection");
        fs::write(&path, "  \n").unwrap();
        assert_eq!(SelectionStore::new(path).get().unwrap(), None);
    }
}
