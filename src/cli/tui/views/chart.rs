//! Chart panel

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::cli::chart::{check_surface, RadarChart};
use crate::cli::tui::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let name = app.entry().map(|e| e.name.as_str()).unwrap_or("Radar");
    let hidden = app.filter().hidden();
    let title = if hidden.is_empty() {
        format!("{} ({} placed)", name, app.layout().len())
    } else {
        let codes: Vec<&str> = hidden.iter().map(|c| c.code()).collect();
        format!(
            "{} ({} placed, hiding {})",
            name,
            app.layout().len(),
            codes.join(", ")
        )
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Err(e) = check_surface(inner) {
        let message = Paragraph::new(e.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(message, inner);
        return;
    }

    let highlight = app.selected_placement().map(|p| p.item.name.as_str());
    frame.render_widget(
        RadarChart::new(app.layout(), app.geometries()).highlight(highlight),
        inner,
    );
}
