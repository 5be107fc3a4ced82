//! Radar registry
//!
//! Radars come from two places: the built-in sample radars compiled into the
//! binary, and markdown files in `.radar/radars/`. A project file named
//! `{id}.md` may start with YAML frontmatter:
//!
//! ```text
//! ---
//! name: Platform Radar
//! theme: da
//! ---
//! # Observere
//! - Zig [Lang] (4)
//! ```
//!
//! A project radar replaces a built-in radar with the same id.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{parse_with, PhaseHeaders, RadarDocument, RadarTheme};

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("Unknown radar '{0}'. Run 'radar radars' to list available radars.")]
    UnknownRadar(String),

    #[error("Unknown theme '{0}': expected 'default' or 'da'")]
    UnknownTheme(String),

    #[error("No radars registered")]
    Empty,
}

/// Where a radar's text came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadarSource {
    BuiltIn,
    File(PathBuf),
    Stdin,
}

/// A named radar document and its theme
#[derive(Debug, Clone, PartialEq)]
pub struct RadarEntry {
    pub id: String,
    pub name: String,
    pub theme_name: String,
    pub theme: RadarTheme,
    pub source: RadarSource,
    pub text: String,
}

impl RadarEntry {
    /// Parses the radar text
    pub fn document(&self, headers: &PhaseHeaders) -> RadarDocument {
        parse_with(&self.text, headers)
    }

    /// Builds an entry from file content, reading optional frontmatter
    pub fn from_content(id: &str, content: &str, source: RadarSource) -> Result<Self> {
        let (frontmatter, body) = split_frontmatter(content)?;
        let theme_name = frontmatter.theme.unwrap_or_else(|| "default".to_string());
        let theme =
            RadarTheme::named(&theme_name).ok_or_else(|| RegistryError::UnknownTheme(theme_name.clone()))?;

        Ok(Self {
            id: id.to_string(),
            name: frontmatter.name.unwrap_or_else(|| id.to_string()),
            theme_name,
            theme,
            source,
            text: body.to_string(),
        })
    }

    /// Reads a radar file; the id is the file stem
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read radar file: {}", path.display()))?;
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("radar");

        Self::from_content(id, &content, RadarSource::File(path.to_path_buf()))
            .with_context(|| format!("Failed to load radar file: {}", path.display()))
    }
}

#[derive(Debug, Default, Deserialize)]
struct RadarFrontmatter {
    name: Option<String>,
    theme: Option<String>,
}

/// Splits optional `---` delimited YAML frontmatter from the radar body
fn split_frontmatter(content: &str) -> Result<(RadarFrontmatter, &str)> {
    let trimmed = content.trim_start();

    let Some(rest) = trimmed.strip_prefix("---") else {
        return Ok((RadarFrontmatter::default(), content));
    };

    let end_pos = rest
        .find("---")
        .ok_or_else(|| anyhow::anyhow!("Missing frontmatter end delimiter (---)"))?;

    let yaml_content = rest[..end_pos].trim();
    let body = &rest[end_pos + 3..];

    let frontmatter = if yaml_content.is_empty() {
        RadarFrontmatter::default()
    } else {
        serde_yaml::from_str(yaml_content).context("Failed to parse frontmatter")?
    };

    Ok((frontmatter, body))
}

struct BuiltIn {
    id: &'static str,
    name: &'static str,
    theme: &'static str,
    text: &'static str,
}

const BUILT_IN: &[BuiltIn] = &[
    BuiltIn {
        id: "default",
        name: "Tech Radar",
        theme: "default",
        text: include_str!("../../radars/default.md"),
    },
    BuiltIn {
        id: "da",
        name: "DA Tech Radar",
        theme: "da",
        text: include_str!("../../radars/da.md"),
    },
];

/// Ordered collection of available radars
#[derive(Debug, Clone, Default)]
pub struct RadarRegistry {
    entries: Vec<RadarEntry>,
}

impl RadarRegistry {
    /// Registry holding only the built-in radars
    pub fn builtin() -> Self {
        let entries = BUILT_IN
            .iter()
            .map(|b| RadarEntry {
                id: b.id.to_string(),
                name: b.name.to_string(),
                theme_name: b.theme.to_string(),
                theme: RadarTheme::named(b.theme).unwrap_or_default(),
                source: RadarSource::BuiltIn,
                text: b.text.to_string(),
            })
            .collect();

        Self { entries }
    }

    /// Built-in radars plus `*.md` files from a directory
    ///
    /// Files that cannot be read or parsed are skipped. A missing directory
    /// is treated as empty.
    pub fn with_dir(dir: &Path) -> Result<Self> {
        let mut registry = Self::builtin();

        if !dir.is_dir() {
            return Ok(registry);
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|e| e == "md"))
            .collect();
        paths.sort();

        for path in paths {
            if let Ok(entry) = RadarEntry::from_file(&path) {
                registry.insert(entry);
            }
        }

        Ok(registry)
    }

    /// Adds an entry, replacing any entry with the same id in place
    pub fn insert(&mut self, entry: RadarEntry) {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, id: &str) -> Option<&RadarEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Like [`get`](Self::get), but unknown ids are an error
    pub fn require(&self, id: &str) -> Result<&RadarEntry, RegistryError> {
        self.get(id)
            .ok_or_else(|| RegistryError::UnknownRadar(id.to_string()))
    }

    pub fn entries(&self) -> &[RadarEntry] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn first(&self) -> Option<&RadarEntry> {
        self.entries.first()
    }

    /// Position of an id in registry order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Picks the radar to show
    ///
    /// An explicitly requested id must exist. A persisted or configured id
    /// that no longer exists is ignored, falling back to the first radar.
    pub fn resolve(
        &self,
        requested: Option<&str>,
        persisted: Option<&str>,
        configured: Option<&str>,
    ) -> Result<&RadarEntry, RegistryError> {
        if let Some(id) = requested {
            return self.require(id);
        }

        persisted
            .and_then(|id| self.get(id))
            .or_else(|| configured.and_then(|id| self.get(id)))
            .or_else(|| self.first())
            .ok_or(RegistryError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Phase;
    use tempfile::TempDir;

    #[test]
    fn builtin_radars_parse() {
        let registry = RadarRegistry::builtin();
        assert_eq!(registry.ids().collect::<Vec<_>>(), ["default", "da"]);

        let headers = PhaseHeaders::default();
        for entry in registry.entries() {
            let doc = entry.document(&headers);
            for phase in Phase::ALL {
                assert!(!doc.items(phase).is_empty(), "{} has empty {}", entry.id, phase);
            }
        }
    }

    #[test]
    fn da_radar_is_rich() {
        let registry = RadarRegistry::builtin();
        let da = registry.require("da").unwrap();
        assert_eq!(da.theme, RadarTheme::da());

        let doc = da.document(&PhaseHeaders::default());
        assert!(doc
            .iter()
            .flat_map(|(_, items)| items)
            .all(|item| item.category.is_some() && item.maturity.is_some() && item.description.is_some()));
    }

    #[test]
    fn frontmatter_sets_name_and_theme() {
        let content = "---\nname: Platform Radar\ntheme: da\n---\n# Bruke\n- Git\n";
        let entry = RadarEntry::from_content("platform", content, RadarSource::Stdin).unwrap();
        assert_eq!(entry.name, "Platform Radar");
        assert_eq!(entry.theme_name, "da");
        assert_eq!(entry.document(&PhaseHeaders::default()).items(Phase::Adopt).len(), 1);
    }

    #[test]
    fn content_without_frontmatter() {
        let entry = RadarEntry::from_content("plain", "# Bruke\n- Git\n", RadarSource::Stdin).unwrap();
        assert_eq!(entry.name, "plain");
        assert_eq!(entry.theme_name, "default");
        assert_eq!(entry.text, "# Bruke\n- Git\n");
    }

    #[test]
    fn unknown_theme_is_an_error() {
        let content = "---\ntheme: neon\n---\n# Bruke\n";
        assert!(RadarEntry::from_content("x", content, RadarSource::Stdin).is_err());
    }

    #[test]
    fn unterminated_frontmatter_is_an_error() {
        assert!(RadarEntry::from_content("x", "---\nname: x\n# Bruke\n", RadarSource::Stdin).is_err());
    }

    #[test]
    fn directory_radars_are_added_and_override() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("team.md"), "---\nname: Team\n---\n# Bruke\n- Git\n").unwrap();
        fs::write(dir.path().join("da.md"), "# Unngå\n- Everything\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("broken.md"), "---\ntheme: neon\n---\n").unwrap();

        let registry = RadarRegistry::with_dir(dir.path()).unwrap();
        assert_eq!(registry.ids().collect::<Vec<_>>(), ["default", "da", "team"]);

        let da = registry.require("da").unwrap();
        assert!(matches!(da.source, RadarSource::File(_)));
        assert_eq!(da.document(&PhaseHeaders::default()).len(), 1);
    }

    #[test]
    fn missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let registry = RadarRegistry::with_dir(&dir.path().join("nope")).unwrap();
        assert_eq!(registry.entries().len(), 2);
    }

    #[test]
    fn resolve_order() {
        let registry = RadarRegistry::builtin();

        assert_eq!(registry.resolve(Some("da"), Some("default"), None).unwrap().id, "da");
        assert_eq!(registry.resolve(None, Some("da"), Some("default")).unwrap().id, "da");
        assert_eq!(registry.resolve(None, Some("gone"), Some("da")).unwrap().id, "da");
        assert_eq!(registry.resolve(None, None, None).unwrap().id, "default");
        assert_eq!(
            registry.resolve(Some("gone"), None, None).unwrap_err(),
            RegistryError::UnknownRadar("gone".to_string())
        );
    }

    #[test]
    fn empty_registry_cannot_resolve() {
        let registry = RadarRegistry::default();
        assert_eq!(registry.resolve(None, None, None).unwrap_err(), RegistryError::Empty);
    }
}
