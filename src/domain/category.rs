//! Item categories and category visibility

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TechItem;

#[derive(Debug, Error, PartialEq)]
#[error("Unknown category '{0}'")]
pub struct UnknownCategory(pub String);

/// Fixed set of technology categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Lang,
    FW,
    Lib,
    Tool,
    Plat,
    DB,
    Proto,
    Format,
    Infra,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 9] = [
        Category::Lang,
        Category::FW,
        Category::Lib,
        Category::Tool,
        Category::Plat,
        Category::DB,
        Category::Proto,
        Category::Format,
        Category::Infra,
    ];

    /// Short code used in radar documents and labels
    pub fn code(&self) -> &'static str {
        match self {
            Category::Lang => "Lang",
            Category::FW => "FW",
            Category::Lib => "Lib",
            Category::Tool => "Tool",
            Category::Plat => "Plat",
            Category::DB => "DB",
            Category::Proto => "Proto",
            Category::Format => "Format",
            Category::Infra => "Infra",
        }
    }

    /// Long human-readable name
    pub fn long_name(&self) -> &'static str {
        match self {
            Category::Lang => "Language",
            Category::FW => "Framework",
            Category::Lib => "Library",
            Category::Tool => "Tool",
            Category::Plat => "Platform",
            Category::DB => "Database",
            Category::Proto => "Protocol",
            Category::Format => "Format",
            Category::Infra => "Infrastructure",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts either the short code or the long name, case-sensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.code() == s || c.long_name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Set of categories currently shown
///
/// Items without a category are always admitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    visible: BTreeSet<Category>,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl CategoryFilter {
    /// Every category visible
    pub fn all() -> Self {
        Self {
            visible: Category::ALL.into_iter().collect(),
        }
    }

    /// No category visible
    pub fn none() -> Self {
        Self {
            visible: BTreeSet::new(),
        }
    }

    /// All categories except the given ones
    pub fn hiding(hidden: &[Category]) -> Self {
        let mut filter = Self::all();
        for category in hidden {
            filter.hide(*category);
        }
        filter
    }

    pub fn is_visible(&self, category: Category) -> bool {
        self.visible.contains(&category)
    }

    pub fn show(&mut self, category: Category) {
        self.visible.insert(category);
    }

    pub fn hide(&mut self, category: Category) {
        self.visible.remove(&category);
    }

    /// Flips a category, returning whether it is now visible
    pub fn toggle(&mut self, category: Category) -> bool {
        if self.visible.remove(&category) {
            false
        } else {
            self.visible.insert(category);
            true
        }
    }

    /// Returns true if the item should be drawn
    pub fn admits(&self, item: &TechItem) -> bool {
        item.category.map_or(true, |c| self.is_visible(c))
    }

    /// Categories currently hidden, in display order
    pub fn hidden(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| !self.visible.contains(c))
            .collect()
    }

    /// Returns true if nothing is hidden
    pub fn shows_all(&self) -> bool {
        self.visible.len() == Category::ALL.len()
    }
}
