//! Layout command: runs the placement engine and prints label positions

use anyhow::Result;
use serde::Serialize;

use super::output::Output;
use super::session::{self, Session};
use super::tui::utils::truncate_str;
use crate::domain::{Category, CategoryFilter};
use crate::layout::{LayoutEngine, RadarLayout, RadiusPolicy};
use crate::storage::RadarEntry;

pub struct LayoutArgs<'a> {
    pub hidden: &'a [Category],
    pub container_width: f64,
    pub seed: Option<u64>,
    pub policy: Option<RadiusPolicy>,
}

#[derive(Serialize)]
struct LayoutReport<'a> {
    radar: &'a str,
    canvas_size: f64,
    policy: RadiusPolicy,
    overlaps: usize,
    #[serde(flatten)]
    layout: &'a RadarLayout,
}

pub fn run(output: &Output, session: &Session, entry: &RadarEntry, args: LayoutArgs) -> Result<()> {
    let project = &session.config.project;
    let canvas_size = project.canvas.canvas_size(args.container_width);
    let radius = project.canvas.radius(canvas_size);

    let mut config = project.layout;
    if let Some(policy) = args.policy {
        config.policy = policy;
    }

    output.verbose_ctx(
        "layout",
        &format!(
            "Canvas {:.0}px, radius {:.1}px, policy {}, seed {:?}",
            canvas_size, radius, config.policy, args.seed
        ),
    );

    let measure = project.labels.monospace();
    let engine = LayoutEngine::new(radius, config, project.labels, &measure);
    let filter = CategoryFilter::hiding(args.hidden);
    let document = session.document(entry);
    let geometries = session.geometries(entry);

    let mut rng = session::rng(args.seed);
    let layout = engine.layout(&document, &geometries, |item| filter.admits(item), &mut rng);
    let overlaps = layout.overlaps();

    output.verbose_ctx(
        "layout",
        &format!("Placed {} labels, {} overlapping pairs", layout.len(), overlaps),
    );

    if output.is_json() {
        output.data(&LayoutReport {
            radar: &entry.id,
            canvas_size,
            policy: config.policy,
            overlaps,
            layout: &layout,
        });
        return Ok(());
    }

    println!(
        "{} - canvas {:.0}px, radius {:.1}px, {} policy",
        entry.name, canvas_size, radius, config.policy
    );
    println!(
        "{:<10} {:<28} {:>8} {:>8} {:>6} {:>5} {:>6} {:>7}",
        "PHASE", "NAME", "X", "Y", "W", "H", "ANGLE", "RADIUS"
    );
    println!("{}", "-".repeat(86));

    for (phase_layout, geometry) in layout.phases.iter().zip(&geometries) {
        for placement in &phase_layout.placements {
            println!(
                "{:<10} {:<28} {:>8.1} {:>8.1} {:>6.1} {:>5.1} {:>6.3} {:>7.1}{}",
                geometry.title,
                truncate_str(&placement.item.name, 28),
                placement.bbox.x,
                placement.bbox.y,
                placement.bbox.width,
                placement.bbox.height,
                placement.angle,
                placement.radius,
                if placement.overlapping { "  overlap" } else { "" }
            );
        }
    }

    println!();
    println!("{} labels placed, {} overlapping pairs", layout.len(), overlaps);

    Ok(())
}
