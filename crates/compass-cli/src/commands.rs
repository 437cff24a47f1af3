use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, Utc};
use tracing::{info, info_span, warn};

use compass_cli::interactive::{BrowseOptions, run_browse_loop};
use compass_cli::terminal::{CardStyle, TerminalSurface};
use compass_core::{DisplaySurface, NullSurface, Session};
use compass_report::{
    ApiOptions, ExportFormat, export, export_date, export_json, generate_api, render_page,
    render_view, write_artifact,
};
use compass_store::{
    ImportSource, LoadOutcome, RecordStore, import_sources, load_records, resolve_data_path,
    write_records,
};

use crate::cli::{
    ApiArgs, BrowseArgs, ExportArgs, FilterArgs, ImportArgs, ListArgs, ListFormatArg,
    RenderHtmlArgs, StatsArgs,
};
use crate::summary::{print_categories, print_stats};

pub fn run_list(data: Option<&Path>, args: &ListArgs) -> Result<()> {
    let session = open_session(data, &args.filters);
    match args.format {
        ListFormatArg::Json => {
            let artifact = export_json(&session.visible(), today())?;
            println!("{}", artifact.content);
        }
        ListFormatArg::Table | ListFormatArg::Cards => {
            let style = if matches!(args.format, ListFormatArg::Cards) {
                CardStyle::Full
            } else {
                CardStyle::Compact
            };
            let mut surface = TerminalSurface::new(io::stdout().lock(), style);
            session.render(&mut surface);
            if let Some(err) = surface.take_error() {
                return Err(err).context("write results");
            }
        }
    }
    Ok(())
}

pub fn run_browse(data: Option<&Path>, args: &BrowseArgs) -> Result<()> {
    let mut session = open_session(data, &FilterArgs::default());
    let style = if args.cards {
        CardStyle::Full
    } else {
        CardStyle::Compact
    };
    let mut surface = TerminalSurface::new(io::stdout().lock(), style);
    surface.set_standard_options(&session.store().standards());
    surface.set_category_options(&session.store().categories());
    session.render(&mut surface);
    let options = BrowseOptions {
        export_dir: args.export_dir.clone().unwrap_or_else(|| PathBuf::from(".")),
        date: today(),
    };
    run_browse_loop(&mut session, &mut surface, io::stdin().lock(), &options)?;
    Ok(())
}

pub fn run_export(data: Option<&Path>, args: &ExportArgs) -> Result<()> {
    let session = open_session(data, &args.filters);
    let visible = session.visible();
    let format: ExportFormat = args.format.into();
    let artifact =
        export(&visible, format, today()).with_context(|| format!("export {format}"))?;
    if args.stdout {
        println!("{}", artifact.content);
        return Ok(());
    }
    let dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let path = write_artifact(&dir, &artifact)?;
    println!(
        "Exported {} controls to {}",
        artifact.record_count,
        path.display()
    );
    Ok(())
}

pub fn run_stats(data: Option<&Path>, args: &StatsArgs) -> Result<()> {
    let session = open_session(data, &FilterArgs::default());
    let stats = session.stats();
    if !args.no_animate && io::stderr().is_terminal() {
        let mut surface = TerminalSurface::new(io::sink(), CardStyle::Compact);
        session.animate_stats(&mut surface, std::thread::sleep);
        surface.finish_counters();
    }
    print_stats(stats, session.store());
    Ok(())
}

pub fn run_categories(data: Option<&Path>) -> Result<()> {
    let session = open_session(data, &FilterArgs::default());
    print_categories(session.store());
    Ok(())
}

pub fn run_render_html(data: Option<&Path>, args: &RenderHtmlArgs) -> Result<()> {
    let session = open_session(data, &args.filters);
    let view = session.view();
    match &args.output {
        Some(path) => {
            let page = render_page(&view, session.stats());
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
            std::fs::write(path, page).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), result_count = view.result_count, "page written");
            println!("Wrote {} cards to {}", view.result_count, path.display());
        }
        None => println!("{}", render_view(&view)),
    }
    Ok(())
}

pub fn run_import(args: &ImportArgs) -> Result<()> {
    let sources = args
        .sources
        .iter()
        .map(String::as_str)
        .map(parse_source)
        .collect::<Result<Vec<_>>>()?;
    let span = info_span!("import", sources = sources.len());
    let _guard = span.enter();
    let start = Instant::now();
    let records = import_sources(&sources).context("import control sheets")?;
    write_records(&args.output, &records)
        .with_context(|| format!("write {}", args.output.display()))?;
    info!(
        records = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "import complete"
    );
    println!(
        "Imported {} controls to {}",
        records.len(),
        args.output.display()
    );
    Ok(())
}

pub fn run_api(data: Option<&Path>, args: &ApiArgs) -> Result<()> {
    let path = resolve_data_path(data);
    let store = match load_records(&path) {
        LoadOutcome::Failed(err) => {
            return Err(err).with_context(|| format!("load {}", path.display()));
        }
        outcome => RecordStore::from_outcome(outcome),
    };
    let options = ApiOptions::new(Utc::now()).with_base_url(args.base_url.clone());
    let summary = generate_api(&store, &args.output_dir, &options)
        .with_context(|| format!("generate api in {}", args.output_dir.display()))?;
    println!(
        "Wrote {} files for {} controls ({} standards, {} categories) to {}",
        summary.files.len(),
        summary.controls,
        summary.standards,
        summary.categories,
        args.output_dir.display()
    );
    Ok(())
}

/// Load the record document and replay the filter flags as control events.
fn open_session(data: Option<&Path>, filters: &FilterArgs) -> Session {
    let path = resolve_data_path(data);
    let mut surface = NullSurface;
    let outcome = load_records(&path);
    if outcome.is_failed() {
        warn!(path = %path.display(), "continuing with an empty record store");
    }
    let mut session = Session::initialize(outcome, &mut surface);
    for event in filters.events() {
        session.dispatch(event, &mut surface);
    }
    session
}

fn parse_source(raw: &str) -> Result<ImportSource> {
    let (path, standard) = raw
        .rsplit_once('=')
        .filter(|(path, standard)| !path.is_empty() && !standard.trim().is_empty())
        .ok_or_else(|| anyhow!("invalid source `{raw}`: expected PATH=STANDARD"))?;
    Ok(ImportSource::new(path, standard.trim()))
}

fn today() -> NaiveDate {
    export_date(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_import_sources() {
        let source = parse_source("data/owasp.csv=OWASP").unwrap();
        assert_eq!(source.path, PathBuf::from("data/owasp.csv"));
        assert_eq!(source.standard, "OWASP");
        assert!(parse_source("data/owasp.csv").is_err());
        assert!(parse_source("=OWASP").is_err());
        assert!(parse_source("data/owasp.csv=").is_err());
    }
}
