//! # Radial Layout
//!
//! Turns a parsed [`RadarDocument`](crate::domain::RadarDocument) into label
//! positions on a circular chart.
//!
//! The chart is split into one angular wedge per phase ([`PhaseGeometry`]).
//! Inside a wedge, items are spread by their order among the visible items
//! of the phase and pushed outwards by maturity score into five
//! equal-area rings. Labels avoid each other by bounded random retry; see
//! [`LayoutEngine`].
//!
//! All coordinates are relative to the chart centre, with y growing
//! downwards.

mod geometry;
mod measure;
mod engine;

pub use geometry::{BoundingBox, PhaseGeometry};
pub use measure::{LabelMetrics, MonospaceMeasure, TextMeasure};
pub use engine::{
    ring_bounds, LayoutEngine, PhaseLayout, PlacedBoxes, Placement, PlacementConfig, RadarLayout,
    RadiusPolicy, UnknownPolicy, MATURITY_RINGS,
};
