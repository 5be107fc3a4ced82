//! Configuration handling for the tech radar
//!
//! Configuration is stored in `.radar/config.toml` (project) and
//! `~/.config/tech-radar/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PhaseHeaders;
use crate::layout::{LabelMetrics, PlacementConfig};

/// Angular width of each phase wedge
const QUADRANT: f64 = std::f64::consts::FRAC_PI_2;

/// Name of the per-project directory
pub const RADAR_DIR: &str = ".radar";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Canvas sizing, mirroring the browser chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Largest canvas edge in pixels
    pub max_width: f64,

    /// Share of the available width used by the canvas
    pub size_multiplier: f64,

    /// Chart radius as a share of the canvas width
    pub radius_multiplier: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            max_width: 1400.0,
            size_multiplier: 0.8,
            radius_multiplier: 0.42,
        }
    }
}

impl CanvasConfig {
    /// Canvas edge for a container of the given width
    pub fn canvas_size(&self, container_width: f64) -> f64 {
        container_width.min(self.max_width) * self.size_multiplier
    }

    /// Chart radius for a canvas of the given edge
    pub fn radius(&self, canvas_size: f64) -> f64 {
        canvas_size * self.radius_multiplier
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_width <= 0.0 || self.size_multiplier <= 0.0 || self.radius_multiplier <= 0.0 {
            return Err(ConfigError::Invalid(
                "canvas sizes and multipliers must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// Radar shown when none is requested or persisted
    pub default_radar: Option<String>,

    /// Placement engine settings
    pub layout: PlacementConfig,

    /// Label box metrics (pixels)
    pub labels: LabelMetrics,

    /// Canvas sizing
    pub canvas: CanvasConfig,

    /// Phase header names recognised in radar documents
    pub headers: PhaseHeaders,
}

impl ProjectConfig {
    /// Checks values the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.canvas.validate()?;

        let layout = &self.layout;
        let fractions = [
            ("angle_offset", layout.angle_offset),
            ("angle_spread", layout.angle_spread),
            ("radius_offset", layout.radius_offset),
            ("radius_spread", layout.radius_spread),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "layout.{} must lie within 0..=1, got {}",
                    name, value
                )));
            }
        }
        if !(0.0..=1.0).contains(&(layout.angle_offset + layout.angle_spread)) {
            return Err(ConfigError::Invalid(
                "layout.angle_offset + layout.angle_spread must lie within 0..=1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&(layout.radius_offset + layout.radius_spread)) {
            return Err(ConfigError::Invalid(
                "layout.radius_offset + layout.radius_spread must lie within 0..=1".to_string(),
            ));
        }

        // Jitter is symmetric and must stay inside both wedge margins
        let jitter = layout.angle_jitter;
        if !jitter.is_finite() || jitter < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "layout.angle_jitter must be a non-negative number, got {}",
                jitter
            )));
        }
        let start_margin = layout.angle_offset * QUADRANT;
        let end_margin = (1.0 - layout.angle_offset - layout.angle_spread) * QUADRANT;
        if jitter / 2.0 > start_margin.min(end_margin) {
            return Err(ConfigError::Invalid(format!(
                "layout.angle_jitter {} does not fit the wedge margins ({:.3} rad each side at most)",
                jitter,
                start_margin.min(end_margin)
            )));
        }

        if self.labels.padding < 0.0 || self.labels.height <= 0.0 || self.labels.char_width <= 0.0 {
            return Err(ConfigError::Invalid(
                "label padding must be non-negative, height and char_width positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Radar shown when no project default exists
    pub default_radar: Option<String>,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let (project, project_root) = Self::load_project()?;

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
            project_root: Some(project_root.to_path_buf()),
        })
    }

    /// Returns the platform directories for the tool
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "tech-radar", "tech-radar")
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    pub fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Finds and loads project configuration
    fn load_project() -> Result<(ProjectConfig, Option<PathBuf>)> {
        match Self::find_project_root() {
            Some(root) => {
                let config = Self::load_project_config(&root)?;
                Ok((config, Some(root)))
            }
            None => Ok((ProjectConfig::default(), None)),
        }
    }

    /// Loads project configuration from a specific root
    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(RADAR_DIR).join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        config
            .validate()
            .with_context(|| format!("Invalid project config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Finds the project root by looking for a `.radar/` directory
    pub fn find_project_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join(RADAR_DIR).is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns true if we're in a radar project
    pub fn is_in_project(&self) -> bool {
        self.project_root.is_some()
    }

    /// Radar configured as default, project first
    pub fn default_radar(&self) -> Option<&str> {
        self.project
            .default_radar
            .as_deref()
            .or(self.global.default_radar.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RadiusPolicy;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config {
            project: ProjectConfig::default(),
            global: GlobalConfig::default(),
            project_root: None,
        };

        assert_eq!(config.project.layout.max_attempts, 50);
        assert_eq!(config.project.layout.policy, RadiusPolicy::MaturityBanded);
        assert_eq!(config.project.headers.trial, "Prøve");
        assert_eq!(config.global.default_format, OutputFormat::Text);
        assert!(!config.is_in_project());
        assert!(config.project.validate().is_ok());
    }

    #[test]
    fn parse_project_config() {
        let toml = r#"
default_radar = "da"

[layout]
policy = "uniform"
max_attempts = 20

[labels]
padding = 4.0

[headers]
observe = "Assess"
avoid = "Hold"
"#;

        let config: ProjectConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.default_radar.as_deref(), Some("da"));
        assert_eq!(config.layout.policy, RadiusPolicy::Uniform);
        assert_eq!(config.layout.max_attempts, 20);
        assert_eq!(config.layout.angle_spread, 0.8);
        assert_eq!(config.labels.padding, 4.0);
        assert_eq!(config.labels.height, 14.0);
        assert_eq!(config.headers.observe, "Assess");
        assert_eq!(config.headers.trial, "Prøve");
    }

    #[test]
    fn parse_global_config() {
        let toml = r#"
default_format = "json"
default_radar = "default"
"#;

        let config: GlobalConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
        assert_eq!(config.default_radar.as_deref(), Some("default"));
    }

    #[test]
    fn invalid_spread_is_rejected() {
        let mut config = ProjectConfig::default();
        config.layout.angle_spread = 0.95;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    fn invalid_layout(edit: impl FnOnce(&mut PlacementConfig)) -> bool {
        let mut config = ProjectConfig::default();
        edit(&mut config.layout);
        matches!(config.validate(), Err(ConfigError::Invalid(_)))
    }

    #[test]
    fn negative_angle_offset_is_rejected() {
        // The sum alone (0.5) would be in range
        assert!(invalid_layout(|l| {
            l.angle_offset = -0.5;
            l.angle_spread = 1.0;
        }));
    }

    #[test]
    fn angle_spread_above_one_is_rejected() {
        assert!(invalid_layout(|l| {
            l.angle_offset = 0.0;
            l.angle_spread = 1.2;
        }));
    }

    #[test]
    fn negative_radius_offset_is_rejected() {
        assert!(invalid_layout(|l| {
            l.radius_offset = -0.2;
            l.radius_spread = 0.9;
        }));
    }

    #[test]
    fn negative_radius_spread_is_rejected() {
        assert!(invalid_layout(|l| l.radius_spread = -0.1));
    }

    #[test]
    fn non_finite_fraction_is_rejected() {
        assert!(invalid_layout(|l| l.angle_offset = f64::NAN));
    }

    #[test]
    fn negative_jitter_is_rejected() {
        assert!(invalid_layout(|l| l.angle_jitter = -0.1));
    }

    #[test]
    fn jitter_wider_than_margins_is_rejected() {
        // 0.1 of a quadrant is about 0.157 rad
        assert!(invalid_layout(|l| l.angle_jitter = 0.4));
        assert!(invalid_layout(|l| {
            l.angle_offset = 0.0;
            l.angle_spread = 0.9;
            l.angle_jitter = 0.1;
        }));
    }

    #[test]
    fn jitter_inside_margins_is_accepted() {
        let mut config = ProjectConfig::default();
        config.layout.angle_jitter = 0.0;
        config.layout.angle_offset = 0.0;
        config.layout.angle_spread = 1.0;
        assert!(config.validate().is_ok());

        config.layout = PlacementConfig::default();
        config.layout.angle_jitter = 0.3;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_project_config_from_disk() {
        let dir = TempDir::new().unwrap();
        let radar_dir = dir.path().join(RADAR_DIR);
        fs::create_dir_all(&radar_dir).unwrap();
        fs::write(radar_dir.join("config.toml"), "default_radar = \"da\"\n").unwrap();

        let config = Config::for_project(dir.path()).unwrap();
        assert_eq!(config.project.default_radar.as_deref(), Some("da"));
        assert!(config.is_in_project());
    }

    #[test]
    fn broken_project_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let radar_dir = dir.path().join(RADAR_DIR);
        fs::create_dir_all(&radar_dir).unwrap();
        fs::write(radar_dir.join("config.toml"), "[layout]\nmax_attempts = \"many\"\n").unwrap();

        assert!(Config::for_project(dir.path()).is_err());
    }

    #[test]
    fn canvas_sizing() {
        let canvas = CanvasConfig::default();
        assert_eq!(canvas.canvas_size(2000.0), 1120.0);
        assert_eq!(canvas.canvas_size(1000.0), 800.0);
        assert!((canvas.radius(1000.0) - 420.0).abs() < 1e-9);
    }

    #[test]
    fn default_radar_prefers_project() {
        let mut config = Config {
            project: ProjectConfig::default(),
            global: GlobalConfig {
                default_radar: Some("default".to_string()),
                ..GlobalConfig::default()
            },
            project_root: None,
        };
        assert_eq!(config.default_radar(), Some("default"));

        config.project.default_radar = Some("da".to_string());
        assert_eq!(config.default_radar(), Some("da"));
    }
}
