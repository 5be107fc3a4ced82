//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Project | Setup and radar selection | `init`, `radars`, `select da` |
//! | Document | Parsed content | `parse`, `list --hide DB` |
//! | Chart | Label placement and drawing | `layout --seed 7`, `chart`, `tui` |
//!
//! The radar is chosen with `--radar <id>` or read with `--file <path>`
//! (`-` for stdin). Without either, the persisted selection, then the
//! configured default, then the first registered radar is used.
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! radar --verbose layout --seed 7
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod session;
mod list;
mod layout_cmd;
mod chart;
mod radars;
mod tui;

pub use app::{Cli, Commands, run};
pub use chart::{render_to_text, RadarChart, RenderError};
pub use output::{Output, OutputFormat};
