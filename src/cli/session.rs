//! Shared command setup: configuration, registry and the chosen radar

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::output::Output;
use crate::domain::RadarDocument;
use crate::layout::PhaseGeometry;
use crate::storage::{Config, Project, RadarEntry, RadarRegistry, RadarSource, SelectionStore};

/// Everything a command needs to find and read radars
pub struct Session {
    pub config: Config,
    pub registry: RadarRegistry,
    pub selection: Option<SelectionStore>,
}

impl Session {
    /// Loads the project around the current directory, if any
    pub fn open(output: &Output) -> Result<Self> {
        let project = match Config::find_project_root() {
            Some(root) => Some(Project::open(root)?),
            None => None,
        };

        let session = match project {
            Some(project) => {
                output.verbose_ctx(
                    "session",
                    &format!("Opened project at: {}", project.root().display()),
                );
                Self {
                    config: project.config().clone(),
                    registry: project.registry()?,
                    selection: Some(project.selection_store()),
                }
            }
            None => {
                output.verbose_ctx("session", "No project found, using built-in radars");
                Self {
                    config: Config::load()?,
                    registry: RadarRegistry::builtin(),
                    selection: SelectionStore::user(),
                }
            }
        };

        output.verbose_ctx(
            "session",
            &format!(
                "Radars available: {}",
                session.registry.ids().collect::<Vec<_>>().join(", ")
            ),
        );

        Ok(session)
    }

    /// The persisted radar id, if any
    pub fn persisted(&self) -> Result<Option<String>> {
        match &self.selection {
            Some(store) => store.get(),
            None => Ok(None),
        }
    }

    /// Picks the radar: `--file` first, then `--radar`, the persisted
    /// selection, the configured default and finally the first radar
    pub fn entry(&self, radar: Option<&str>, file: Option<&Path>, output: &Output) -> Result<RadarEntry> {
        if let Some(path) = file {
            output.verbose_ctx("session", &format!("Reading radar from: {}", path.display()));
            return read_file(path);
        }

        let persisted = self.persisted()?;
        let entry = self
            .registry
            .resolve(radar, persisted.as_deref(), self.config.default_radar())?;

        output.verbose_ctx(
            "session",
            &format!("Using radar '{}' ({})", entry.id, entry.name),
        );

        Ok(entry.clone())
    }

    /// Parses an entry with the configured phase headers
    pub fn document(&self, entry: &RadarEntry) -> RadarDocument {
        entry.document(&self.config.project.headers)
    }

    /// Phase wedges for an entry's theme
    pub fn geometries(&self, entry: &RadarEntry) -> Vec<PhaseGeometry> {
        PhaseGeometry::standard(&entry.theme, &self.config.project.headers)
    }
}

fn read_file(path: &Path) -> Result<RadarEntry> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read radar from stdin")?;
        return RadarEntry::from_content("stdin", &content, RadarSource::Stdin);
    }

    RadarEntry::from_file(path)
}

/// Seeded generator when a seed is given, otherwise fresh entropy
pub fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

