//! List and detail panels
//!
//! The list shows every item of the radar grouped by phase. Items hidden by
//! the category filter stay listed in grey.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::cli::chart::phase_color;
use crate::cli::tui::app::App;
use crate::cli::tui::utils::truncate_str;

/// Draw the item list
pub fn draw_list(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(6) as usize;
    let mut rows: Vec<ListItem> = Vec::new();
    let mut selected_row = None;
    let mut index = 0;

    for geometry in app.geometries() {
        rows.push(ListItem::new(Line::from(Span::styled(
            geometry.title.clone(),
            Style::default()
                .fg(phase_color(&geometry.color))
                .add_modifier(Modifier::BOLD),
        ))));

        for item in app.document().items(geometry.phase) {
            if index == app.item_index() {
                selected_row = Some(rows.len());
            }
            index += 1;

            let visible = app.filter().admits(item);
            let marker = if visible { " " } else { "~" };
            let style = if visible {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };

            rows.push(ListItem::new(Line::from(Span::styled(
                format!("{} {}", marker, truncate_str(&item.name, width)),
                style,
            ))));
        }
    }

    let list = List::new(rows)
        .block(Block::default().title("Items").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(selected_row);

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the details of the selected item
pub fn draw_details(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.selected_item() {
        Some(item) => {
            let phase_title = app
                .geometries()
                .iter()
                .find(|g| g.phase == item.phase)
                .map(|g| g.title.as_str())
                .unwrap_or_default();

            let mut lines = vec![
                Line::from(Span::styled(
                    item.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("Phase: {}", phase_title)),
            ];

            if let Some(category) = item.category {
                lines.push(Line::from(format!("Category: {}", category.long_name())));
            }
            if let Some(score) = item.maturity {
                lines.push(Line::from(format!("Maturity: {}/5", score)));
            }

            let placement = match app.selected_placement() {
                Some(p) if p.overlapping => "overlapping".to_string(),
                Some(p) => format!("placed at ({:.0}, {:.0})", p.bbox.x, p.bbox.y),
                None if !app.filter().admits(item) => "hidden".to_string(),
                None => "not placed".to_string(),
            };
            lines.push(Line::from(Span::styled(
                format!("Label: {}", placement),
                Style::default().fg(Color::DarkGray),
            )));

            if let Some(description) = &item.description {
                lines.push(Line::from(""));
                lines.push(Line::from(description.clone()));
            }

            lines
        }
        None => vec![Line::from("No items")],
    };

    let paragraph = Paragraph::new(content)
        .block(Block::default().title("Details").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
