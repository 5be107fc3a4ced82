//! Radar colour themes
//!
//! Colours are opaque `#RRGGBB` strings; only the terminal presentation
//! decodes them.

use serde::{Deserialize, Serialize};

use super::Phase;

/// Colour per phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseColors {
    pub observe: String,
    pub trial: String,
    pub adopt: String,
    pub avoid: String,
}

impl PhaseColors {
    pub fn color(&self, phase: Phase) -> &str {
        match phase {
            Phase::Observe => &self.observe,
            Phase::Trial => &self.trial,
            Phase::Adopt => &self.adopt,
            Phase::Avoid => &self.avoid,
        }
    }
}

/// Colours and background for one radar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarTheme {
    pub phase_colors: PhaseColors,
    pub gradient: String,
}

impl Default for RadarTheme {
    fn default() -> Self {
        Self {
            phase_colors: PhaseColors {
                observe: "#3498db".to_string(),
                trial: "#f39c12".to_string(),
                adopt: "#27ae60".to_string(),
                avoid: "#e74c3c".to_string(),
            },
            gradient: "linear-gradient(135deg, #e0e0e0 0%, #f5f5f5 25%, #d0d0d0 50%, #f0f0f0 75%, #c0c0c0 100%)"
                .to_string(),
        }
    }
}

impl RadarTheme {
    /// Pantone palette with a teal/grey background
    pub fn da() -> Self {
        Self {
            phase_colors: PhaseColors {
                observe: "#9AB8B7".to_string(),
                trial: "#F2A68F".to_string(),
                adopt: "#4D6463".to_string(),
                avoid: "#F27E55".to_string(),
            },
            gradient: "linear-gradient(135deg, #ACBBC6 0%, #4F6A7E 100%)".to_string(),
        }
    }

    /// Looks up a built-in theme by name
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "da" => Some(Self::da()),
            _ => None,
        }
    }
}

/// Decodes `#RRGGBB` (or `RRGGBB`) into its components
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_themes() {
        assert_eq!(RadarTheme::named("default"), Some(RadarTheme::default()));
        assert_eq!(RadarTheme::named("da").unwrap().phase_colors.adopt, "#4D6463");
        assert!(RadarTheme::named("neon").is_none());
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#3498db"), Some((0x34, 0x98, 0xdb)));
        assert_eq!(parse_hex_color("F27E55"), Some((0xF2, 0x7E, 0x55)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }
}
