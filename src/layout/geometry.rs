//! Chart geometry: phase wedges and label boxes

use std::f64::consts::{FRAC_PI_2, PI};

use serde::Serialize;

use crate::domain::{Phase, PhaseHeaders, RadarTheme};

/// Angular wedge of the chart assigned to one phase
///
/// Angles are in radians, measured clockwise from the positive x axis in
/// screen coordinates (y grows downwards).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseGeometry {
    pub phase: Phase,
    pub title: String,
    pub description: String,
    pub color: String,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PhaseGeometry {
    /// The four standard quadrants, in canonical phase order
    pub fn standard(theme: &RadarTheme, headers: &PhaseHeaders) -> Vec<PhaseGeometry> {
        Phase::ALL
            .into_iter()
            .map(|phase| {
                let (start_angle, end_angle) = quadrant(phase);
                PhaseGeometry {
                    phase,
                    title: headers.header(phase).to_string(),
                    description: phase_description(phase).to_string(),
                    color: theme.phase_colors.color(phase).to_string(),
                    start_angle,
                    end_angle,
                }
            })
            .collect()
    }

    /// Angular width of the wedge
    pub fn width(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Angle through the middle of the wedge
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

fn quadrant(phase: Phase) -> (f64, f64) {
    match phase {
        Phase::Observe => (PI, 3.0 * FRAC_PI_2),
        Phase::Trial => (3.0 * FRAC_PI_2, 2.0 * PI),
        Phase::Adopt => (0.0, FRAC_PI_2),
        Phase::Avoid => (FRAC_PI_2, PI),
    }
}

fn phase_description(phase: Phase) -> &'static str {
    match phase {
        Phase::Observe => "Teknologier vi følger med på og utforsker. Disse er interessante, men vi har ikke besluttet å ta i bruk ennå.",
        Phase::Trial => "Teknologier vi aktivt eksperimenterer med i pilotprosjekter eller begrensede sammenhenger for å evaluere nytte og modenhet.",
        Phase::Adopt => "Teknologier som er godkjent og anbefalt for bruk i produksjon. Disse er stabile, velprøvde og støttes aktivt.",
        Phase::Avoid => "Teknologier vi faser ut, har evaluert og forkastet, eller aktivt unngår. Nye prosjekter bør ikke bruke disse.",
    }
}

/// Footprint of a label, centred on (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Axis-aligned overlap test; boxes that merely touch also collide
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.right() < other.left()
            || self.left() > other.right()
            || self.bottom() < other.top()
            || self.top() > other.bottom())
    }
}
