//! Radial chart drawn in terminal cells
//!
//! The chart is laid out in cell units: one unit per column horizontally and
//! two units per row vertically, which keeps circles round on a terminal
//! with roughly 1:2 cells. [`RadarChart`] draws rings, axes, phase titles
//! and labels with a ratatui canvas; the `chart` command renders it into an
//! off-screen buffer and prints the text.

use anyhow::Result;
use rand::Rng;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::Widget;
use thiserror::Error;

use super::output::Output;
use super::session::{self, Session};
use crate::domain::{parse_hex_color, Category, CategoryFilter, RadarDocument};
use crate::layout::{
    LabelMetrics, LayoutEngine, PhaseGeometry, PlacementConfig, RadarLayout, MATURITY_RINGS,
};
use crate::storage::RadarEntry;

/// Smallest surface the chart can be drawn on
pub const MIN_WIDTH: u16 = 30;
pub const MIN_HEIGHT: u16 = 12;

/// Label box metrics in cell units
pub const CELL_METRICS: LabelMetrics = LabelMetrics {
    padding: 0.5,
    height: 2.0,
    char_width: 1.0,
};

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("Chart surface unavailable: {width}x{height} cells, need at least 30x12")]
    SurfaceUnavailable { width: u16, height: u16 },
}

/// Fails when the surface is too small to hold a chart
pub fn check_surface(area: Rect) -> Result<(), RenderError> {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        return Err(RenderError::SurfaceUnavailable {
            width: area.width,
            height: area.height,
        });
    }
    Ok(())
}

/// Chart radius in cell units, leaving a margin for labels at the rim
pub fn cell_radius(area: Rect) -> f64 {
    (area.width as f64 / 2.0).min(area.height as f64) * 0.9
}

/// Runs the placement engine for a surface of the given size
pub fn layout_for_surface<R: Rng + ?Sized>(
    document: &RadarDocument,
    geometries: &[PhaseGeometry],
    filter: &CategoryFilter,
    config: PlacementConfig,
    area: Rect,
    rng: &mut R,
) -> RadarLayout {
    let measure = CELL_METRICS.monospace();
    let engine = LayoutEngine::new(cell_radius(area), config, CELL_METRICS, &measure);
    engine.layout(document, geometries, |item| filter.admits(item), rng)
}

/// Terminal colour for a `#RRGGBB` phase colour
pub fn phase_color(color: &str) -> Color {
    parse_hex_color(color)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

/// Canvas widget showing one laid out radar
pub struct RadarChart<'a> {
    layout: &'a RadarLayout,
    geometries: &'a [PhaseGeometry],
    highlight: Option<&'a str>,
}

impl<'a> RadarChart<'a> {
    pub fn new(layout: &'a RadarLayout, geometries: &'a [PhaseGeometry]) -> Self {
        Self {
            layout,
            geometries,
            highlight: None,
        }
    }

    /// Draws the label with this name reversed
    pub fn highlight(mut self, name: Option<&'a str>) -> Self {
        self.highlight = name;
        self
    }
}

impl Widget for RadarChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let half_w = area.width as f64 / 2.0;
        let half_h = area.height as f64;
        let radius = self.layout.radius;

        // Keeps text inside the canvas bounds; labels outside are dropped
        let clamp = |x: f64, y: f64, len: f64| {
            (
                x.clamp(-half_w, (half_w - len).max(-half_w)),
                y.clamp(-half_h, half_h),
            )
        };

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-half_w, half_w])
            .y_bounds([-half_h, half_h])
            .paint(|ctx| {
                for ring in 1..=MATURITY_RINGS {
                    ctx.draw(&Circle {
                        x: 0.0,
                        y: 0.0,
                        radius: radius * (ring as f64 / MATURITY_RINGS as f64).sqrt(),
                        color: Color::DarkGray,
                    });
                }
                ctx.draw(&CanvasLine::new(-radius, 0.0, radius, 0.0, Color::DarkGray));
                ctx.draw(&CanvasLine::new(0.0, -radius, 0.0, radius, Color::DarkGray));
                ctx.layer();

                for geometry in self.geometries {
                    let color = phase_color(&geometry.color);
                    let len = geometry.title.chars().count() as f64;
                    let mid = geometry.mid_angle();
                    let x = if mid.cos() < 0.0 { -half_w } else { half_w - len };
                    // Screen y grows downwards, canvas y upwards
                    let y = if mid.sin() < 0.0 { half_h } else { -half_h };
                    let (x, y) = clamp(x, y, len);
                    ctx.print(
                        x,
                        y,
                        Span::styled(
                            geometry.title.clone(),
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        ),
                    );
                }

                for (phase_layout, geometry) in self.layout.phases.iter().zip(self.geometries) {
                    let color = phase_color(&geometry.color);
                    for placement in &phase_layout.placements {
                        let name = &placement.item.name;
                        let len = name.chars().count() as f64;
                        let (x, y) = clamp(placement.bbox.x - len / 2.0, -placement.bbox.y, len);

                        let mut style = Style::default().fg(color);
                        if self.highlight == Some(name.as_str()) {
                            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                        }
                        ctx.print(x, y, Span::styled(name.clone(), style));
                    }
                }
            })
            .render(area, buf);
    }
}

/// Renders a chart off-screen and returns its text, one line per row
pub fn render_to_text(chart: RadarChart<'_>, width: u16, height: u16) -> Result<String, RenderError> {
    let area = Rect::new(0, 0, width, height);
    check_surface(area)?;

    let mut buf = Buffer::empty(area);
    chart.render(area, &mut buf);

    let lines: Vec<String> = buf
        .content
        .chunks(area.width as usize)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect();

    Ok(lines.join("\n"))
}

pub struct ChartArgs<'a> {
    pub width: u16,
    pub height: u16,
    pub hidden: &'a [Category],
    pub seed: Option<u64>,
}

/// The `chart` command
pub fn run(output: &Output, session: &Session, entry: &RadarEntry, args: ChartArgs) -> Result<()> {
    let area = Rect::new(0, 0, args.width, args.height);
    check_surface(area)?;

    let document = session.document(entry);
    let geometries = session.geometries(entry);
    let filter = CategoryFilter::hiding(args.hidden);
    let mut rng = session::rng(args.seed);

    let layout = layout_for_surface(
        &document,
        &geometries,
        &filter,
        session.config.project.layout,
        area,
        &mut rng,
    );
    output.verbose_ctx(
        "chart",
        &format!(
            "{}x{} cells, radius {:.1}, {} labels, {} overlapping pairs",
            args.width,
            args.height,
            layout.radius,
            layout.len(),
            layout.overlaps()
        ),
    );

    let text = render_to_text(RadarChart::new(&layout, &geometries), args.width, args.height)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "radar": entry.id,
            "width": args.width,
            "height": args.height,
            "lines": text.lines().collect::<Vec<_>>(),
        }));
    } else {
        println!("{}", entry.name);
        println!("{}", text);
    }

    Ok(())
}
