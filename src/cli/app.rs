//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::chart::{self, ChartArgs};
use super::layout_cmd::{self, LayoutArgs};
use super::output::{Output, OutputFormat};
use super::session::Session;
use super::{list, radars, tui};
use crate::domain::Category;
use crate::layout::RadiusPolicy;
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "radar")]
#[command(author, version, about = "Technology radars from plain text")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Radar to use (see `radar radars`)
    #[arg(long, short = 'r', global = true)]
    pub radar: Option<String>,

    /// Read the radar from a file instead ("-" for stdin)
    #[arg(long, global = true, conflicts_with = "radar")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new radar project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// List available radars
    Radars,

    /// Remember the radar to show by default
    Select {
        /// Radar id
        #[arg(required_unless_present = "clear")]
        id: Option<String>,

        /// Forget the remembered radar
        #[arg(long, conflicts_with = "id")]
        clear: bool,
    },

    /// Parse a radar and print its items
    Parse,

    /// Show the radar as a list, grouped by phase
    List {
        /// Categories to grey out (comma separated, e.g. DB,Tool)
        #[arg(long, value_delimiter = ',')]
        hide: Vec<Category>,
    },

    /// Compute label positions in pixels
    Layout {
        /// Categories to leave out
        #[arg(long, value_delimiter = ',')]
        hide: Vec<Category>,

        /// Container width in pixels
        #[arg(long, default_value_t = 1000.0, value_parser = parse_container_width)]
        size: f64,

        /// Random seed for a repeatable layout
        #[arg(long)]
        seed: Option<u64>,

        /// Radius policy (uniform, maturity-banded)
        #[arg(long)]
        policy: Option<RadiusPolicy>,
    },

    /// Draw the radar chart as text
    Chart {
        /// Chart width in columns
        #[arg(long, default_value_t = 100)]
        width: u16,

        /// Chart height in rows
        #[arg(long, default_value_t = 40)]
        height: u16,

        /// Categories to leave out
        #[arg(long, value_delimiter = ',')]
        hide: Vec<Category>,

        /// Random seed for a repeatable layout
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Browse radars interactively
    Tui {
        /// Random seed for a repeatable layout
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Container widths must be finite and positive; a negative width would
/// mirror every label through the centre
fn parse_container_width(s: &str) -> Result<f64, String> {
    let width: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if !width.is_finite() || width <= 0.0 {
        return Err(format!("container width must be a positive number of pixels, got {}", s));
    }
    Ok(width)
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let format = match cli.format {
        Some(format) => format,
        None => Config::load_global()?.default_format.into(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("Tech radar starting");

    if let Commands::Init { path } = &cli.command {
        radars::init(&output, path)?;
        output.verbose("Command completed successfully");
        return Ok(());
    }

    let session = Session::open(&output)?;
    let radar = cli.radar.as_deref();
    let file = cli.file.as_deref();

    match cli.command {
        Commands::Init { .. } => {}

        Commands::Radars => radars::list(&output, &session)?,

        Commands::Select { id, clear } => radars::select(&output, &session, id.as_deref(), clear)?,

        Commands::Parse => {
            let entry = session.entry(radar, file, &output)?;
            list::parse(&output, &entry, &session.geometries(&entry), &session.config.project.headers)?
        }

        Commands::List { hide } => {
            let entry = session.entry(radar, file, &output)?;
            list::list(
                &output,
                &entry,
                &session.geometries(&entry),
                &session.config.project.headers,
                &hide,
            )?
        }

        Commands::Layout { hide, size, seed, policy } => {
            let entry = session.entry(radar, file, &output)?;
            layout_cmd::run(
                &output,
                &session,
                &entry,
                LayoutArgs {
                    hidden: &hide,
                    container_width: size,
                    seed,
                    policy,
                },
            )?
        }

        Commands::Chart { width, height, hide, seed } => {
            let entry = session.entry(radar, file, &output)?;
            chart::run(
                &output,
                &session,
                &entry,
                ChartArgs {
                    width,
                    height,
                    hidden: &hide,
                    seed,
                },
            )?
        }

        Commands::Tui { seed } => {
            let entry = session.entry(radar, file, &output)?;
            tui::run(&output, session, entry, seed)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn hide_accepts_codes_and_names() {
        let cli = Cli::try_parse_from(["radar", "list", "--hide", "DB,Language"]).unwrap();
        match cli.command {
            Commands::List { hide } => assert_eq!(hide, vec![Category::DB, Category::Lang]),
            _ => panic!("Expected list command"),
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(Cli::try_parse_from(["radar", "list", "--hide", "Spreadsheet"]).is_err());
    }

    #[test]
    fn layout_options() {
        let cli = Cli::try_parse_from([
            "radar", "layout", "--seed", "7", "--policy", "uniform", "--size", "800",
        ])
        .unwrap();
        match cli.command {
            Commands::Layout { seed, policy, size, hide } => {
                assert_eq!(seed, Some(7));
                assert_eq!(policy, Some(RadiusPolicy::Uniform));
                assert_eq!(size, 800.0);
                assert!(hide.is_empty());
            }
            _ => panic!("Expected layout command"),
        }
    }

    #[test]
    fn layout_size_must_be_positive() {
        for size in ["--size=-1000", "--size=0", "--size=NaN", "--size=inf", "--size=wide"] {
            assert!(
                Cli::try_parse_from(["radar", "layout", size]).is_err(),
                "{} should be rejected",
                size
            );
        }
        assert!(Cli::try_parse_from(["radar", "layout", "--size=320.5"]).is_ok());
    }

    #[test]
    fn radar_and_file_conflict() {
        assert!(Cli::try_parse_from(["radar", "--radar", "da", "--file", "x.md", "parse"]).is_err());
    }

    #[test]
    fn select_requires_id_or_clear() {
        assert!(Cli::try_parse_from(["radar", "select"]).is_err());
        assert!(Cli::try_parse_from(["radar", "select", "--clear"]).is_ok());
        assert!(Cli::try_parse_from(["radar", "select", "da", "--clear"]).is_err());
    }
}
