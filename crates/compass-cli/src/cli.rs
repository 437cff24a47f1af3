//! CLI argument definitions for Compliance Compass.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use compass_core::ControlEvent;
use compass_report::ExportFormat;

#[derive(Parser)]
#[command(
    name = "compass",
    version,
    about = "Compliance Compass - browse and export compliance controls",
    long_about = "Browse compliance controls across standards.\n\n\
                  Filter by free-text search, standard and category, inspect\n\
                  cross-standard mappings, and export the filtered view."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Record document to load (default: $COMPASS_DATA, then ./app-data.json).
    #[arg(long = "data", value_name = "PATH", global = true)]
    pub data: Option<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the controls matching the filters.
    List(ListArgs),

    /// Browse interactively: each command updates the filters and re-renders.
    Browse(BrowseArgs),

    /// Export the controls matching the filters.
    Export(ExportArgs),

    /// Show control and mapping totals.
    Stats(StatsArgs),

    /// List the standards and categories available for filtering.
    Categories,

    /// Render the controls matching the filters as HTML cards.
    RenderHtml(RenderHtmlArgs),

    /// Convert per-standard CSV control sheets into a record document.
    Import(ImportArgs),

    /// Generate static JSON API endpoint files.
    Api(ApiArgs),
}

/// Filter values shared by the one-shot commands.
#[derive(Args, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive text matched against id, title and description.
    #[arg(long = "search", short = 's', value_name = "TEXT")]
    pub search: Option<String>,

    /// Exact standard (e.g. OWASP, ISO27001, NIST).
    #[arg(long = "standard", value_name = "STANDARD")]
    pub standard: Option<String>,

    /// Exact category.
    #[arg(long = "category", value_name = "CATEGORY")]
    pub category: Option<String>,
}

impl FilterArgs {
    /// The control events that reproduce these filters on a fresh session.
    pub fn events(&self) -> Vec<ControlEvent> {
        let mut events = Vec::new();
        if let Some(search) = &self.search {
            events.push(ControlEvent::SearchInput(search.clone()));
        }
        if let Some(standard) = &self.standard {
            events.push(ControlEvent::StandardSelected(standard.clone()));
        }
        if let Some(category) = &self.category {
            events.push(ControlEvent::CategorySelected(category.clone()));
        }
        events
    }
}

#[derive(Parser)]
pub struct ListArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output layout.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ListFormatArg,
}

#[derive(Parser)]
pub struct BrowseArgs {
    /// Directory exports are written to (default: current directory).
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Show full cards instead of the compact table.
    #[arg(long = "cards")]
    pub cards: bool,
}

#[derive(Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Export format.
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: ExportFormatArg,

    /// Directory the export file is written to (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the export to stdout instead of writing a file.
    #[arg(long = "stdout")]
    pub stdout: bool,
}

#[derive(Parser)]
pub struct StatsArgs {
    /// Skip the counter animation.
    #[arg(long = "no-animate")]
    pub no_animate: bool,
}

#[derive(Parser)]
pub struct RenderHtmlArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Write a standalone page to this path (default: fragment on stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Control sheet and its standard, as PATH=STANDARD (repeatable).
    #[arg(long = "source", value_name = "PATH=STANDARD", required = true)]
    pub sources: Vec<String>,

    /// Record document to write.
    #[arg(long = "output", short = 'o', value_name = "PATH", default_value = "app-data.json")]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct ApiArgs {
    /// Directory the endpoint files are written to.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "api")]
    pub output_dir: PathBuf,

    /// Public base URL recorded in the index usage block.
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ListFormatArg {
    Table,
    Cards,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Json,
    Csv,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(value: ExportFormatArg) -> Self {
        match value {
            ExportFormatArg::Json => ExportFormat::Json,
            ExportFormatArg::Csv => ExportFormat::Csv,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
