//! Project management
//!
//! Handles project initialization and provides access to stores.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::RADAR_DIR;
use super::{Config, RadarRegistry, SelectionStore};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a radar project. Run 'radar init' first.")]
    NotInProject,
}

/// A directory holding project radars and configuration
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(RADAR_DIR).is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Initializes a new project at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let radar_dir = root.join(RADAR_DIR);

        let radars_dir = radar_dir.join("radars");
        fs::create_dir_all(&radars_dir).with_context(|| {
            format!("Failed to create radars directory: {}", radars_dir.display())
        })?;

        // Create default config
        let config_path = radar_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# Tech radar configuration

# Radar shown when none is selected
# default_radar = "default"

[layout]
# "maturity_banded" places items by maturity score, "uniform" ignores it
policy = "maturity_banded"
max_attempts = 50

[headers]
observe = "Observere"
trial = "Prøve"
adopt = "Bruke"
avoid = "Unngå"
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        // Create .gitignore for .radar
        let gitignore_path = radar_dir.join(".gitignore");
        if !gitignore_path.exists() {
            let gitignore = r#"# Ignore the persisted radar selection
state/
"#;
            fs::write(&gitignore_path, gitignore).with_context(|| {
                format!("Failed to write .gitignore: {}", gitignore_path.display())
            })?;
        }

        Self::open(root)
    }

    /// Returns the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `.radar` directory
    pub fn radar_dir(&self) -> PathBuf {
        self.root.join(RADAR_DIR)
    }

    /// Returns the directory holding project radars
    pub fn radars_dir(&self) -> PathBuf {
        self.radar_dir().join("radars")
    }

    /// Returns the project configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Built-in radars plus the project's own
    pub fn registry(&self) -> Result<RadarRegistry> {
        RadarRegistry::with_dir(&self.radars_dir())
    }

    /// Selection persisted inside the project
    pub fn selection_store(&self) -> SelectionStore {
        SelectionStore::new(self.radar_dir().join("state").join("selection"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        assert!(project.radar_dir().is_dir());
        assert!(project.radars_dir().is_dir());
        assert!(project.radar_dir().join("config.toml").is_file());
        assert!(project.radar_dir().join(".gitignore").is_file());
    }

    #[test]
    fn init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();
        assert_eq!(project.config().project.headers.avoid, "Unngå");
        assert_eq!(project.config().project.layout.max_attempts, 50);
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        Project::init(dir.path()).unwrap();
        Project::init(dir.path()).unwrap();
    }

    #[test]
    fn open_requires_radar_dir() {
        let dir = TempDir::new().unwrap();
        let err = Project::open(dir.path()).err().unwrap();
        assert!(err.to_string().contains("Not in a radar project"));
    }

    #[test]
    fn registry_includes_project_radars() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();
        fs::write(project.radars_dir().join("team.md"), "# Bruke\n- Git\n").unwrap();

        let registry = project.registry().unwrap();
        assert!(registry.get("team").is_some());
        assert!(registry.get("da").is_some());
    }
}
