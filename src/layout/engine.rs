//! Label placement engine
//!
//! Positions every visible item's label inside its phase wedge. Each item
//! gets an angle from its slot among the visible items of its phase (plus a
//! little jitter) and a radius from its maturity ring. Candidates that
//! collide with an already placed label are redrawn, up to
//! [`PlacementConfig::max_attempts`] times; after that the last candidate is
//! kept even though it overlaps.
//!
//! Placement is not stable across runs: every call draws fresh random
//! numbers from the supplied generator. Seed the generator for repeatable
//! layouts.

use std::fmt;
use std::str::FromStr;

use rand::distributions::Open01;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BoundingBox, LabelMetrics, PhaseGeometry, TextMeasure};
use crate::domain::{MaturityScore, Phase, RadarDocument, TechItem};

/// Number of equal-area maturity rings
pub const MATURITY_RINGS: u32 = 5;

#[derive(Debug, Error, PartialEq)]
#[error("Unknown radius policy '{0}': expected uniform or maturity-banded")]
pub struct UnknownPolicy(pub String);

/// How an item's distance from the centre is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusPolicy {
    /// Random radius in a fixed band, ignoring maturity
    Uniform,
    /// Random radius inside the item's equal-area maturity ring
    #[default]
    MaturityBanded,
}

impl fmt::Display for RadiusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadiusPolicy::Uniform => f.write_str("uniform"),
            RadiusPolicy::MaturityBanded => f.write_str("maturity-banded"),
        }
    }
}

impl FromStr for RadiusPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(RadiusPolicy::Uniform),
            "maturity-banded" | "maturity_banded" | "banded" => Ok(RadiusPolicy::MaturityBanded),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// Tuning of the placement search
///
/// Angle fractions are relative to the wedge width, radius fractions to the
/// chart radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub policy: RadiusPolicy,

    /// Candidates tried per item before accepting an overlap
    pub max_attempts: usize,

    /// Margin reserved at the start of the wedge
    pub angle_offset: f64,

    /// Share of the wedge used to distribute items
    pub angle_spread: f64,

    /// Full range of the random angle jitter, in radians
    pub angle_jitter: f64,

    /// Inner edge of the uniform radius band
    pub radius_offset: f64,

    /// Width of the uniform radius band
    pub radius_spread: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            policy: RadiusPolicy::MaturityBanded,
            max_attempts: 50,
            angle_offset: 0.1,
            angle_spread: 0.8,
            angle_jitter: 0.3,
            radius_offset: 0.15,
            radius_spread: 0.7,
        }
    }
}

/// Inner and outer edge of a maturity ring, as fractions of the chart radius
///
/// Ring `s` spans `sqrt((s-1)/5)..sqrt(s/5)` so that every ring covers the
/// same area.
pub fn ring_bounds(score: MaturityScore) -> (f64, f64) {
    let rings = MATURITY_RINGS as f64;
    let s = score.get() as f64;
    (((s - 1.0) / rings).sqrt(), (s / rings).sqrt())
}

/// A placed label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub item: TechItem,
    /// Label box, relative to the chart centre
    pub bbox: BoundingBox,
    pub angle: f64,
    pub radius: f64,
    /// Set when no free spot was found and the label overlaps another
    pub overlapping: bool,
}

/// Boxes placed so far in one render pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacedBoxes(Vec<BoundingBox>);

impl PlacedBoxes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the box intersects any placed box
    pub fn collides(&self, candidate: &BoundingBox) -> bool {
        self.0.iter().any(|placed| candidate.intersects(placed))
    }

    pub fn push(&mut self, bbox: BoundingBox) {
        self.0.push(bbox);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundingBox> {
        self.0.iter()
    }
}

/// Placements of one phase, in document order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseLayout {
    pub phase: Phase,
    pub placements: Vec<Placement>,
}

/// Result of one full render pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RadarLayout {
    pub radius: f64,
    pub phases: Vec<PhaseLayout>,
}

impl RadarLayout {
    /// All placements, phase by phase
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.phases.iter().flat_map(|p| p.placements.iter())
    }

    pub fn len(&self) -> usize {
        self.phases.iter().map(|p| p.placements.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of label pairs whose boxes intersect
    pub fn overlaps(&self) -> usize {
        let boxes: Vec<_> = self.placements().map(|p| p.bbox).collect();
        boxes
            .iter()
            .enumerate()
            .map(|(i, a)| boxes[i + 1..].iter().filter(|b| a.intersects(b)).count())
            .sum()
    }
}

/// Computes label positions for a chart of a given radius
pub struct LayoutEngine<'m> {
    radius: f64,
    config: PlacementConfig,
    metrics: LabelMetrics,
    measure: &'m dyn TextMeasure,
}

impl<'m> LayoutEngine<'m> {
    pub fn new(
        radius: f64,
        config: PlacementConfig,
        metrics: LabelMetrics,
        measure: &'m dyn TextMeasure,
    ) -> Self {
        Self {
            radius,
            config,
            metrics,
            measure,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Size of the box around an item's label
    pub fn label_size(&self, text: &str) -> (f64, f64) {
        self.metrics.box_size(self.measure.width(text))
    }

    /// Lays out every phase, later phases avoiding earlier ones
    pub fn layout<R, F>(
        &self,
        document: &RadarDocument,
        geometries: &[PhaseGeometry],
        visible: F,
        rng: &mut R,
    ) -> RadarLayout
    where
        R: Rng + ?Sized,
        F: Fn(&TechItem) -> bool,
    {
        let mut placed = PlacedBoxes::new();
        let mut phases = Vec::with_capacity(geometries.len());

        for geometry in geometries {
            let items = document.items(geometry.phase);
            let (placements, next) = self.place(geometry, items, &visible, placed, rng);
            placed = next;
            phases.push(PhaseLayout {
                phase: geometry.phase,
                placements,
            });
        }

        RadarLayout {
            radius: self.radius,
            phases,
        }
    }

    /// Places the visible items of one phase
    ///
    /// Takes the boxes placed so far and returns them extended with this
    /// phase's labels. Hidden items take no slot, so hiding an item respaces
    /// the rest of its phase.
    pub fn place<R, F>(
        &self,
        geometry: &PhaseGeometry,
        items: &[TechItem],
        visible: F,
        mut placed: PlacedBoxes,
        rng: &mut R,
    ) -> (Vec<Placement>, PlacedBoxes)
    where
        R: Rng + ?Sized,
        F: Fn(&TechItem) -> bool,
    {
        let shown: Vec<&TechItem> = items.iter().filter(|item| visible(item)).collect();
        let total = shown.len();
        let mut placements = Vec::with_capacity(total);

        for (index, item) in shown.into_iter().enumerate() {
            let placement = self.place_item(geometry, item, index, total, &placed, rng);
            placed.push(placement.bbox);
            placements.push(placement);
        }

        (placements, placed)
    }

    fn place_item<R: Rng + ?Sized>(
        &self,
        geometry: &PhaseGeometry,
        item: &TechItem,
        index: usize,
        total: usize,
        placed: &PlacedBoxes,
        rng: &mut R,
    ) -> Placement {
        let (width, height) = self.label_size(&item.name);
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let angle = self.angle(geometry, index, total, rng);
            let radius = self.item_radius(item, rng);
            let bbox = BoundingBox::new(angle.cos() * radius, angle.sin() * radius, width, height);
            let overlapping = placed.collides(&bbox);

            if !overlapping || attempt >= max_attempts {
                return Placement {
                    item: item.clone(),
                    bbox,
                    angle,
                    radius,
                    overlapping,
                };
            }
            attempt += 1;
        }
    }

    /// Angle for slot `index` of `total` visible items, with jitter
    pub fn angle<R: Rng + ?Sized>(
        &self,
        geometry: &PhaseGeometry,
        index: usize,
        total: usize,
        rng: &mut R,
    ) -> f64 {
        let width = geometry.width();
        let offset = width * self.config.angle_offset;
        let spread = width * self.config.angle_spread;
        let jitter = (rng.gen::<f64>() - 0.5) * self.config.angle_jitter;

        geometry.start_angle + offset + spread * (index + 1) as f64 / (total + 1) as f64 + jitter
    }

    /// Distance from the centre for an item
    ///
    /// Items without a score fall back to the uniform band even under the
    /// banded policy.
    pub fn item_radius<R: Rng + ?Sized>(&self, item: &TechItem, rng: &mut R) -> f64 {
        match (self.config.policy, item.maturity) {
            (RadiusPolicy::MaturityBanded, Some(score)) => {
                let (inner, outer) = ring_bounds(score);
                let t: f64 = rng.sample(Open01);
                self.radius * (inner + (outer - inner) * t)
            }
            _ => {
                let t: f64 = rng.gen();
                self.radius * (self.config.radius_offset + self.config.radius_spread * t)
            }
        }
    }
}
