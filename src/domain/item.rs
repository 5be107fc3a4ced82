//! Radar item domain model

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Category, Phase};

#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("Maturity score must be between 1 and 5, got {0}")]
    OutOfRange(u32),
}

/// Maturity rating from 1 (most mature, chart centre) to 5 (least mature, rim)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MaturityScore(u8);

impl MaturityScore {
    pub const MIN: MaturityScore = MaturityScore(1);
    pub const MAX: MaturityScore = MaturityScore(5);

    /// Creates a score, rejecting values outside 1..=5
    pub fn new(value: u32) -> Result<Self, ScoreError> {
        match value {
            1..=5 => Ok(Self(value as u8)),
            _ => Err(ScoreError::OutOfRange(value)),
        }
    }

    /// Creates a score, clamping into 1..=5
    pub fn clamped(value: u32) -> Self {
        Self(value.clamp(1, 5) as u8)
    }

    pub fn get(&self) -> u32 {
        self.0 as u32
    }
}

impl TryFrom<u32> for MaturityScore {
    type Error = ScoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MaturityScore> for u32 {
    fn from(score: MaturityScore) -> Self {
        score.get()
    }
}

impl fmt::Display for MaturityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One technology entry on the radar
///
/// The minimal document format only carries a name; every other field is
/// optional so both formats share this one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechItem {
    /// Display name, never empty
    pub name: String,

    /// Phase the item was listed under
    pub phase: Phase,

    /// Category used for filtering; absent means always visible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Maturity score controlling distance from the chart centre
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity: Option<MaturityScore>,

    /// Free-text explanation shown as detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TechItem {
    /// Creates a name-only item
    pub fn new(name: impl Into<String>, phase: Phase) -> Self {
        Self {
            name: name.into(),
            phase,
            category: None,
            maturity: None,
            description: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_maturity(mut self, score: MaturityScore) -> Self {
        self.maturity = Some(score);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_rejects_out_of_range() {
        assert_eq!(MaturityScore::new(0), Err(ScoreError::OutOfRange(0)));
        assert_eq!(MaturityScore::new(6), Err(ScoreError::OutOfRange(6)));
        assert_eq!(MaturityScore::new(3).unwrap().get(), 3);
    }

    #[test]
    fn score_clamps() {
        assert_eq!(MaturityScore::clamped(0), MaturityScore::MIN);
        assert_eq!(MaturityScore::clamped(42), MaturityScore::MAX);
        assert_eq!(MaturityScore::clamped(2).get(), 2);
    }

    #[test]
    fn minimal_item_serializes_without_optional_fields() {
        let item = TechItem::new("React", Phase::Adopt);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({"name": "React", "phase": "adopt"}));
    }

    #[test]
    fn rich_item_serializes_all_fields() {
        let item = TechItem::new("Go", Phase::Observe)
            .with_category(Category::Lang)
            .with_maturity(MaturityScore::MIN)
            .with_description("Statically typed language");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["category"], "Lang");
        assert_eq!(json["maturity"], 1);
        assert_eq!(json["description"], "Statically typed language");
    }

    #[test]
    fn score_deserialization_validates_range() {
        assert!(serde_json::from_str::<MaturityScore>("4").is_ok());
        assert!(serde_json::from_str::<MaturityScore>("9").is_err());
    }
}
