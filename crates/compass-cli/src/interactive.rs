//! Line-driven browse loop.
//!
//! Each input line is one filter control action. Filter changes are turned
//! into [`ControlEvent`]s and dispatched to the session, which re-renders the
//! results into the terminal surface.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, error, info};

use compass_core::{ControlEvent, Session};
use compass_report::{ExportFormat, export, write_artifact};

use crate::terminal::TerminalSurface;

/// Selector value meaning "all".
pub const ALL_SELECTOR: &str = "*";

pub const HELP_TEXT: &str = "\
Commands:
  search <text>           filter by text in id, title and description
  clear                   clear the search text
  standard <value|*>      filter by standard (* for all)
  category <value|*>      filter by category (* for all)
  export [json|csv] [dir] export the current results
  show                    render the current results again
  options                 list the available standards and categories
  stats                   show control and mapping totals
  help                    show this help
  quit                    leave the browser";

/// One parsed browse input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Clear,
    Standard(String),
    Category(String),
    Export {
        format: ExportFormat,
        dir: Option<PathBuf>,
    },
    Show,
    Options,
    Stats,
    Help,
    Quit,
    Unknown(String),
}

impl BrowseCommand {
    /// Parse one input line; blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let command = match word.to_ascii_lowercase().as_str() {
            "search" | "s" => Self::Search(rest.to_string()),
            "clear" => Self::Clear,
            "standard" => Self::Standard(selector_value(rest)),
            "category" => Self::Category(selector_value(rest)),
            "export" => parse_export(rest),
            "show" | "list" => Self::Show,
            "options" => Self::Options,
            "stats" => Self::Stats,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Unknown(word.to_string()),
        };
        Some(command)
    }

    /// The control event this command triggers, if it changes the filters.
    pub fn event(&self) -> Option<ControlEvent> {
        match self {
            Self::Search(text) => Some(ControlEvent::SearchInput(text.clone())),
            Self::Clear => Some(ControlEvent::ClearSearch),
            Self::Standard(value) => Some(ControlEvent::StandardSelected(value.clone())),
            Self::Category(value) => Some(ControlEvent::CategorySelected(value.clone())),
            _ => None,
        }
    }
}

fn selector_value(raw: &str) -> String {
    if raw == ALL_SELECTOR {
        String::new()
    } else {
        raw.to_string()
    }
}

fn parse_export(rest: &str) -> BrowseCommand {
    let mut format = ExportFormat::Json;
    let mut dir = None;
    for (index, part) in rest.split_whitespace().enumerate() {
        match part.to_ascii_lowercase().as_str() {
            "json" if index == 0 => format = ExportFormat::Json,
            "csv" if index == 0 => format = ExportFormat::Csv,
            _ => dir = Some(PathBuf::from(part)),
        }
    }
    BrowseCommand::Export { format, dir }
}

/// Settings for one browse run.
#[derive(Debug, Clone)]
pub struct BrowseOptions {
    /// Directory exports go to unless the command names one.
    pub export_dir: PathBuf,
    /// Date stamped into export file names.
    pub date: NaiveDate,
}

/// Read commands from `input` until `quit` or end of input.
///
/// A failed command is reported on the surface and the loop keeps reading;
/// only input and output failures end it. Returns the number of commands
/// handled.
pub fn run_browse_loop<R, W>(
    session: &mut Session,
    surface: &mut TerminalSurface<W>,
    input: R,
    options: &BrowseOptions,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut handled = 0;
    write_prompt(session, surface)?;
    for line in input.lines() {
        let line = line.context("read browse input")?;
        let Some(command) = BrowseCommand::parse(&line) else {
            write_prompt(session, surface)?;
            continue;
        };
        debug!(?command, "browse command");
        handled += 1;
        if command == BrowseCommand::Quit {
            break;
        }
        handle_command(session, surface, command, options)?;
        if let Some(err) = surface.take_error() {
            return Err(err).context("write browse output");
        }
        write_prompt(session, surface)?;
    }
    info!(commands = handled, "browse finished");
    Ok(handled)
}

fn handle_command<W: Write>(
    session: &mut Session,
    surface: &mut TerminalSurface<W>,
    command: BrowseCommand,
    options: &BrowseOptions,
) -> Result<()> {
    if let Some(event) = command.event() {
        session.dispatch(event, surface);
        return Ok(());
    }
    match command {
        BrowseCommand::Show => {
            session.render(surface);
        }
        BrowseCommand::Export { format, dir } => {
            let dir = dir.unwrap_or_else(|| options.export_dir.clone());
            let visible = session.visible();
            let written = export(&visible, format, options.date).and_then(|artifact| {
                let path = write_artifact(&dir, &artifact)?;
                Ok((artifact, path))
            });
            match written {
                Ok((artifact, path)) => writeln!(
                    surface.writer(),
                    "Exported {} controls to {}",
                    artifact.record_count,
                    path.display()
                )?,
                Err(err) => {
                    error!(error = %err, format = %format, "export failed");
                    writeln!(surface.writer(), "Export failed: {err}")?;
                }
            }
        }
        BrowseCommand::Options => {
            let text = format!(
                "Standards: {}\nCategories: {}",
                list_or_none(surface.standards()),
                list_or_none(surface.categories())
            );
            writeln!(surface.writer(), "{text}")?;
        }
        BrowseCommand::Stats => {
            let stats = session.stats();
            writeln!(
                surface.writer(),
                "Controls: {}\nMappings: {}",
                stats.controls,
                stats.mappings
            )?;
        }
        BrowseCommand::Help => writeln!(surface.writer(), "{HELP_TEXT}")?,
        BrowseCommand::Unknown(word) => {
            writeln!(
                surface.writer(),
                "Unknown command `{word}`; type `help` for the list."
            )?;
        }
        _ => {}
    }
    Ok(())
}

fn list_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}

fn write_prompt<W: Write>(session: &Session, surface: &mut TerminalSurface<W>) -> Result<()> {
    let search = &session.criteria().search;
    let clear_visible = surface.clear_visible();
    let out = surface.writer();
    if clear_visible {
        write!(out, "compass [{search} x]> ")?;
    } else {
        write!(out, "compass> ")?;
    }
    out.flush()?;
    Ok(())
}
