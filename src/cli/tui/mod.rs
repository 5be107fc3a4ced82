//! Interactive radar viewer
//!
//! Shows the chart, the item list and the selected item's details in the
//! terminal using ratatui.

mod app;
mod event;
mod terminal;
pub(super) mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};

use super::output::Output;
use super::session::Session;
use crate::storage::RadarEntry;
use app::App;
use event::EventHandler;

/// Launch the TUI
pub fn run(output: &Output, session: Session, entry: RadarEntry, seed: Option<u64>) -> Result<()> {
    output.verbose_ctx(
        "tui",
        &format!("Initializing TUI application with radar '{}'", entry.id),
    );

    let mut app = App::new(session, entry, seed);

    // Initialize terminal
    let mut terminal = terminal::enter()?;

    // Create event handler
    let event_handler = EventHandler::new(250);

    // Run the main loop with panic safety
    // This ensures terminal is restored even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, event_handler)
    }));

    // Always restore terminal, even on panic
    let restore_result = terminal::leave();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}
