//! Domain models for the tech radar
//!
//! Contains the radar data model and the document parser, without any I/O
//! concerns.

mod phase;
mod category;
mod item;
mod radar;
mod parser;
mod theme;

pub use phase::{Phase, PhaseHeaders, UnknownPhase};
pub use category::{Category, CategoryFilter, UnknownCategory};
pub use item::{MaturityScore, ScoreError, TechItem};
pub use radar::RadarDocument;
pub use parser::{parse, parse_entry, parse_with};
pub use theme::{parse_hex_color, PhaseColors, RadarTheme};
