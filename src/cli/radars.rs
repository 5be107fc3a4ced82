//! Registry commands (init, radars, select)

use anyhow::{bail, Result};
use serde::Serialize;

use super::output::Output;
use super::session::Session;
use crate::storage::{Project, RadarSource};

/// Initializes a project directory
pub fn init(output: &Output, path: &str) -> Result<()> {
    output.verbose_ctx("init", &format!("Initializing project at: {}", path));
    let project = Project::init(path)?;
    output.verbose_ctx(
        "init",
        &format!("Created .radar directory at: {}", project.radar_dir().display()),
    );
    output.success(&format!(
        "Initialized radar project at {}",
        project.root().display()
    ));
    Ok(())
}

#[derive(Serialize)]
struct RadarSummary<'a> {
    id: &'a str,
    name: &'a str,
    theme: &'a str,
    source: String,
    items: usize,
    current: bool,
}

/// Lists the registry, marking the radar that would be shown
pub fn list(output: &Output, session: &Session) -> Result<()> {
    let persisted = session.persisted()?;
    let current = session
        .registry
        .resolve(None, persisted.as_deref(), session.config.default_radar())
        .ok()
        .map(|e| e.id.clone());

    let summaries: Vec<RadarSummary> = session
        .registry
        .entries()
        .iter()
        .map(|entry| RadarSummary {
            id: &entry.id,
            name: &entry.name,
            theme: &entry.theme_name,
            source: match &entry.source {
                RadarSource::BuiltIn => "built-in".to_string(),
                RadarSource::File(path) => path.display().to_string(),
                RadarSource::Stdin => "stdin".to_string(),
            },
            items: session.document(entry).len(),
            current: current.as_deref() == Some(entry.id.as_str()),
        })
        .collect();

    if output.is_json() {
        output.data(&summaries);
        return Ok(());
    }

    println!("  {:<16} {:<24} {:<8} {:>5}  SOURCE", "ID", "NAME", "THEME", "ITEMS");
    println!("{}", "-".repeat(72));
    for summary in &summaries {
        println!(
            "{} {:<16} {:<24} {:<8} {:>5}  {}",
            if summary.current { "*" } else { " " },
            summary.id,
            summary.name,
            summary.theme,
            summary.items,
            summary.source
        );
    }

    Ok(())
}

/// Persists or clears the selected radar
pub fn select(output: &Output, session: &Session, id: Option<&str>, clear: bool) -> Result<()> {
    let Some(store) = &session.selection else {
        bail!("No location available to store the selection");
    };
    output.verbose_ctx("select", &format!("Selection file: {}", store.path().display()));

    if clear {
        store.clear()?;
        output.success("Cleared radar selection");
        return Ok(());
    }

    let Some(id) = id else {
        bail!("Specify a radar id or --clear");
    };

    let entry = session.registry.require(id)?;
    store.set(&entry.id)?;
    output.success(&format!("Selected radar '{}' ({})", entry.id, entry.name));

    Ok(())
}
