//! Tech Radar - technology radars from plain text
//!
//! A radar document lists technologies under four phase headers. This crate
//! parses such documents, places every item's label on a circular chart
//! without overlaps, and shows the result in the terminal.

pub mod domain;
pub mod layout;
pub mod events;
pub mod storage;
pub mod cli;

pub use domain::{parse, Category, CategoryFilter, MaturityScore, Phase, RadarDocument, TechItem};
pub use layout::{LayoutEngine, PlacementConfig, RadarLayout, RadiusPolicy};
