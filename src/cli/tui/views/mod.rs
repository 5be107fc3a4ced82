//! Screen layout: chart on the left, item list and details on the right

pub mod chart;
pub mod list;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::app::App;

/// Regions of the screen
pub struct Areas {
    pub chart: Rect,
    pub list: Rect,
    pub detail: Rect,
    pub status: Rect,
}

pub fn areas(area: Rect) -> Areas {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(65), // Chart
            Constraint::Percentage(35), // List + details
        ])
        .split(main_chunks[0]);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // List
            Constraint::Length(9), // Details
        ])
        .split(content_chunks[1]);

    Areas {
        chart: content_chunks[0],
        list: side_chunks[0],
        detail: side_chunks[1],
        status: main_chunks[1],
    }
}

/// Inside of the chart panel, where labels are laid out
pub fn chart_surface(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(areas(area).chart)
}

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App) {
    let areas = areas(frame.area());

    chart::draw(frame, app, areas.chart);
    list::draw_list(frame, app, areas.list);
    list::draw_details(frame, app, areas.detail);
    draw_status_bar(frame, app, areas.status);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = app
        .status_message()
        .unwrap_or("[Tab]radar [1-9]category [a]ll [r]e-layout [j/k]move [q]uit [?]help");

    let paragraph = Paragraph::new(format!("Radar {}", content))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
