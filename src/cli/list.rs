//! Document commands (parse, list)

use anyhow::Result;
use serde::Serialize;

use super::output::Output;
use crate::domain::{Category, CategoryFilter, Phase, PhaseHeaders, TechItem};
use crate::layout::PhaseGeometry;
use crate::storage::RadarEntry;

/// Prints the parsed document, or a per-phase summary in text mode
pub fn parse(
    output: &Output,
    entry: &RadarEntry,
    geometries: &[PhaseGeometry],
    headers: &PhaseHeaders,
) -> Result<()> {
    let document = entry.document(headers);
    output.verbose_ctx("parse", &format!("Parsed {} items", document.len()));

    if output.is_json() {
        output.data(&document);
        return Ok(());
    }

    println!("{} ({} items)", entry.name, document.len());
    for geometry in geometries {
        let items = document.items(geometry.phase);
        let scored = items.iter().filter(|i| i.maturity.is_some()).count();
        println!(
            "  {:<12} {:>3} items, {:>3} scored",
            geometry.title,
            items.len(),
            scored
        );
    }

    Ok(())
}

#[derive(Serialize)]
struct ListedPhase<'a> {
    phase: Phase,
    title: &'a str,
    description: &'a str,
    color: &'a str,
    items: Vec<ListedItem<'a>>,
}

#[derive(Serialize)]
struct ListedItem<'a> {
    #[serde(flatten)]
    item: &'a TechItem,
    hidden: bool,
}

/// The textual list view
///
/// Items hidden by the filter stay in the list, marked with `~`.
pub fn list(
    output: &Output,
    entry: &RadarEntry,
    geometries: &[PhaseGeometry],
    headers: &PhaseHeaders,
    hidden: &[Category],
) -> Result<()> {
    let document = entry.document(headers);
    let filter = CategoryFilter::hiding(hidden);
    output.verbose_ctx(
        "list",
        &format!("Listing {} items, hidden categories: {:?}", document.len(), filter.hidden()),
    );

    let phases: Vec<ListedPhase> = geometries
        .iter()
        .map(|geometry| ListedPhase {
            phase: geometry.phase,
            title: &geometry.title,
            description: &geometry.description,
            color: &geometry.color,
            items: document
                .items(geometry.phase)
                .iter()
                .map(|item| ListedItem {
                    item,
                    hidden: !filter.admits(item),
                })
                .collect(),
        })
        .collect();

    if output.is_json() {
        output.data(&phases);
        return Ok(());
    }

    println!("{}", entry.name);
    for phase in &phases {
        println!();
        println!("{} - {}", phase.title, phase.description);
        println!("{}", "-".repeat(60));

        if phase.items.is_empty() {
            println!("  (no items)");
        }
        for listed in &phase.items {
            println!("{}", format_item(listed.item, listed.hidden));
        }
    }

    Ok(())
}

/// One list line: marker, name, category, score and description
fn format_item(item: &TechItem, hidden: bool) -> String {
    let mut line = format!("{} {}", if hidden { "~" } else { " " }, item.name);

    if let Some(category) = item.category {
        line.push_str(&format!(" [{}]", category));
    }
    if let Some(score) = item.maturity {
        line.push_str(&format!(" ({})", score));
    }
    if let Some(description) = &item.description {
        line.push_str(&format!(" - {}", description));
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MaturityScore;

    #[test]
    fn format_full_item() {
        let item = TechItem::new("Go", Phase::Adopt)
            .with_category(Category::Lang)
            .with_maturity(MaturityScore::clamped(1))
            .with_description("Statically typed language");
        assert_eq!(format_item(&item, false), "  Go [Lang] (1) - Statically typed language");
    }

    #[test]
    fn format_hidden_item() {
        let item = TechItem::new("MongoDB", Phase::Avoid).with_category(Category::DB);
        assert_eq!(format_item(&item, true), "~ MongoDB [DB]");
    }

    #[test]
    fn format_plain_item() {
        assert_eq!(format_item(&TechItem::new("React", Phase::Trial), false), "  React");
    }
}
