//! TUI application state and logic
//!
//! Key handlers never change the radar or the filter directly: they publish
//! on the [`EventBus`], and the subscribers registered in [`App::new`] record
//! the change. Pending changes are applied after every key, and the layout
//! is recomputed lazily before the next draw.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use ratatui::layout::Rect;

use super::event::{Event, EventHandler};
use super::terminal::Terminal;
use super::views;
use crate::cli::chart;
use crate::cli::session::{self, Session};
use crate::domain::{Category, CategoryFilter, PhaseHeaders, RadarDocument, TechItem};
use crate::events::{EventBus, EventKind, RadarEvent};
use crate::layout::{PhaseGeometry, Placement, PlacementConfig, RadarLayout};
use crate::storage::{RadarEntry, RadarRegistry};

/// Changes recorded by event subscribers, applied after each key
#[derive(Debug, Default)]
struct Pending {
    radar: Option<String>,
    filter: Option<CategoryFilter>,
    message: Option<String>,
}

/// Application state
pub struct App {
    /// Radars reachable with Tab/BackTab
    registry: RadarRegistry,

    /// Index of the shown radar in the registry
    current: usize,

    headers: PhaseHeaders,
    config: PlacementConfig,

    bus: EventBus,
    pending: Rc<RefCell<Pending>>,

    document: RadarDocument,
    geometries: Vec<PhaseGeometry>,
    filter: CategoryFilter,

    /// Last computed layout and the surface it was computed for
    layout: RadarLayout,
    surface: Rect,
    dirty: bool,
    rng: StdRng,

    /// Selected item, in document order
    item_index: usize,

    /// Status message to display
    status_message: Option<String>,

    /// Whether to quit
    should_quit: bool,
}

impl App {
    /// Create a new application showing `entry`
    ///
    /// An entry that is not in the session's registry (read with `--file`)
    /// is added to it so that Tab can come back to it.
    pub fn new(session: Session, entry: RadarEntry, seed: Option<u64>) -> Self {
        let Session {
            config,
            mut registry,
            selection,
        } = session;

        if registry.get(&entry.id) != Some(&entry) {
            registry.insert(entry.clone());
        }
        let current = registry.position(&entry.id).unwrap_or(0);

        let pending = Rc::new(RefCell::new(Pending::default()));
        let bus = EventBus::new();

        {
            let pending = Rc::clone(&pending);
            bus.subscribe(EventKind::RadarChanged, move |event| {
                if let RadarEvent::RadarChanged(id) = event {
                    let mut pending = pending.borrow_mut();
                    if let Some(store) = &selection {
                        if let Err(e) = store.set(id) {
                            pending.message = Some(format!("Failed to save selection: {:#}", e));
                        }
                    }
                    pending.radar = Some(id.clone());
                }
            });
        }
        {
            let pending = Rc::clone(&pending);
            bus.subscribe(EventKind::CategoryFilterChanged, move |event| {
                if let RadarEvent::CategoryFilterChanged(filter) = event {
                    pending.borrow_mut().filter = Some(filter.clone());
                }
            });
        }

        let headers = config.project.headers.clone();

        Self {
            document: entry.document(&headers),
            geometries: PhaseGeometry::standard(&entry.theme, &headers),
            registry,
            current,
            headers,
            config: config.project.layout,
            bus,
            pending,
            filter: CategoryFilter::all(),
            layout: RadarLayout::default(),
            surface: Rect::default(),
            dirty: true,
            rng: session::rng(seed),
            item_index: 0,
            status_message: None,
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit() {
            let size = terminal.size()?;
            self.prepare(Rect::new(0, 0, size.width, size.height));

            terminal.draw(|frame| views::draw(frame, self))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize | Event::Tick => {}
            }
        }

        Ok(())
    }

    /// Recomputes the layout if the chart surface changed or it is stale
    pub fn prepare(&mut self, area: Rect) {
        let surface = views::chart_surface(area);
        if surface != self.surface {
            self.surface = surface;
            self.dirty = true;
        }

        if self.dirty {
            self.layout = if chart::check_surface(surface).is_ok() {
                chart::layout_for_surface(
                    &self.document,
                    &self.geometries,
                    &self.filter,
                    self.config,
                    surface,
                    &mut self.rng,
                )
            } else {
                RadarLayout::default()
            };
            self.dirty = false;
        }
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }

            // Radar selection
            KeyCode::Tab => self.switch_radar(1),
            KeyCode::BackTab => self.switch_radar(-1),

            // Category filter
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(&category) = Category::ALL.get(index) {
                    let mut filter = self.filter.clone();
                    let visible = filter.toggle(category);
                    self.status_message = Some(format!(
                        "{} {}",
                        category.long_name(),
                        if visible { "shown" } else { "hidden" }
                    ));
                    self.bus.publish(&RadarEvent::CategoryFilterChanged(filter));
                }
            }
            KeyCode::Char('a') => {
                self.status_message = Some("All categories shown".to_string());
                self.bus
                    .publish(&RadarEvent::CategoryFilterChanged(CategoryFilter::all()));
            }

            KeyCode::Char('r') => {
                self.dirty = true;
                self.status_message = Some("Re-laid out".to_string());
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => {
                if self.item_index + 1 < self.document.len() {
                    self.item_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.item_index = self.item_index.saturating_sub(1);
            }

            KeyCode::Char('?') => {
                let legend: Vec<String> = Category::ALL
                    .iter()
                    .enumerate()
                    .map(|(i, c)| format!("{}:{}", i + 1, c))
                    .collect();
                self.status_message = Some(format!(
                    "Tab/S-Tab:radar a:all r:re-layout j/k:move q:quit  {}",
                    legend.join(" ")
                ));
            }

            _ => {}
        }

        self.apply_pending();
    }

    /// Publishes the radar `step` places away from the current one
    fn switch_radar(&mut self, step: isize) {
        let count = self.registry.entries().len() as isize;
        if count == 0 {
            return;
        }

        let next = (self.current as isize + step).rem_euclid(count) as usize;
        if let Some(entry) = self.registry.entries().get(next) {
            let id = entry.id.clone();
            self.bus.publish(&RadarEvent::RadarChanged(id));
        }
    }

    /// Applies what the event subscribers recorded
    fn apply_pending(&mut self) {
        let pending = std::mem::take(&mut *self.pending.borrow_mut());

        if let Some(id) = pending.radar {
            if let Some(index) = self.registry.position(&id) {
                let entry = &self.registry.entries()[index];
                self.current = index;
                self.document = entry.document(&self.headers);
                self.geometries = PhaseGeometry::standard(&entry.theme, &self.headers);
                self.item_index = 0;
                self.dirty = true;
                self.status_message = Some(format!("Radar: {}", entry.name));
            }
        }

        if let Some(filter) = pending.filter {
            self.filter = filter;
            self.dirty = true;
        }

        if let Some(message) = pending.message {
            self.status_message = Some(message);
        }
    }

    // Public accessors for views

    pub fn entry(&self) -> Option<&RadarEntry> {
        self.registry.entries().get(self.current)
    }

    pub fn document(&self) -> &RadarDocument {
        &self.document
    }

    pub fn geometries(&self) -> &[PhaseGeometry] {
        &self.geometries
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn layout(&self) -> &RadarLayout {
        &self.layout
    }

    pub fn item_index(&self) -> usize {
        self.item_index
    }

    pub fn selected_item(&self) -> Option<&TechItem> {
        self.document
            .iter()
            .flat_map(|(_, items)| items)
            .nth(self.item_index)
    }

    /// Placement of the selected item, if it is visible
    pub fn selected_placement(&self) -> Option<&Placement> {
        let item = self.selected_item()?;
        self.layout.placements().find(|p| &p.item == item)
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
