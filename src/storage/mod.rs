//! # Storage Layer
//!
//! Everything the radar reads from or writes to disk.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Radars | Markdown, optional YAML frontmatter | `.radar/radars/{id}.md` |
//! | Config | TOML | `.radar/config.toml`, `~/.config/tech-radar/config.toml` |
//! | Selection | Plain text, one id | `.radar/state/selection` |
//!
//! The selection is written atomically (temp file + rename). Outside a
//! project it lives in the user's data directory.
//!
//! ## Project Structure
//!
//! ```text
//! .radar/
//! ├── radars/
//! │   └── team.md       # Project radars
//! ├── state/
//! │   └── selection     # Last selected radar
//! ├── config.toml       # Project configuration
//! └── .gitignore        # Ignores state/
//! ```

mod config;
mod project;
mod registry;
mod selection;

pub use config::{CanvasConfig, Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig, RADAR_DIR};
pub use project::{Project, ProjectError};
pub use registry::{RadarEntry, RadarRegistry, RadarSource, RegistryError};
pub use selection::SelectionStore;
