//! Label measurement

use serde::{Deserialize, Serialize};

/// Maps label text to its rendered width
pub trait TextMeasure {
    fn width(&self, text: &str) -> f64;
}

/// Fixed advance per character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub char_width: f64,
}

impl TextMeasure for MonospaceMeasure {
    fn width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f64,
{
    fn width(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Padding and line height of a label box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelMetrics {
    /// Horizontal padding on each side; also added once to the height
    pub padding: f64,
    /// Text line height
    pub height: f64,
    /// Advance per character for monospace measurement
    pub char_width: f64,
}

impl Default for LabelMetrics {
    fn default() -> Self {
        Self {
            padding: 8.0,
            height: 14.0,
            char_width: 7.0,
        }
    }
}

impl LabelMetrics {
    /// Monospace measure matching these metrics
    pub fn monospace(&self) -> MonospaceMeasure {
        MonospaceMeasure {
            char_width: self.char_width,
        }
    }

    /// Width and height of the box around a measured label
    pub fn box_size(&self, text_width: f64) -> (f64, f64) {
        (text_width + self.padding * 2.0, self.height + self.padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_counts_chars() {
        let measure = MonospaceMeasure { char_width: 7.0 };
        assert_eq!(measure.width("Rust"), 28.0);
        assert_eq!(measure.width("Unngå"), 35.0);
        assert_eq!(measure.width(""), 0.0);
    }

    #[test]
    fn closures_measure_text() {
        let measure = |text: &str| text.len() as f64 * 2.0;
        assert_eq!(measure.width("abc"), 6.0);
    }

    #[test]
    fn box_size_adds_padding() {
        let metrics = LabelMetrics::default();
        assert_eq!(metrics.box_size(28.0), (44.0, 22.0));
    }
}
