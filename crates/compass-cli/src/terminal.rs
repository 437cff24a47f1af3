//! Terminal display surface.
//!
//! Results are printed as `comfy-table` tables; the startup counters are
//! drawn with `indicatif` on stderr.

use std::io::{self, Write};

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use compass_core::view::{NO_RESULTS_HINT, NO_RESULTS_MESSAGE, RECOMMENDATION_SUMMARY};
use compass_core::{Card, Counter, DisplaySurface, ResultsBody, View};

/// How result cards are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardStyle {
    /// One table row per card.
    #[default]
    Compact,
    /// One two-column table per card with every section.
    Full,
}

pub struct TerminalSurface<W: Write> {
    out: W,
    style: CardStyle,
    standards: Vec<String>,
    categories: Vec<String>,
    clear_visible: bool,
    counters: Option<CounterBars>,
    error: Option<io::Error>,
}

struct CounterBars {
    _multi: MultiProgress,
    controls: ProgressBar,
    mappings: ProgressBar,
}

impl CounterBars {
    fn new() -> Self {
        let multi = MultiProgress::new();
        let style = ProgressStyle::with_template("{prefix:>10.cyan.bold} {msg:.bold}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let controls = multi.add(
            ProgressBar::no_length()
                .with_style(style.clone())
                .with_prefix(Counter::Controls.label()),
        );
        let mappings = multi.add(
            ProgressBar::no_length()
                .with_style(style)
                .with_prefix(Counter::Mappings.label()),
        );
        Self {
            _multi: multi,
            controls,
            mappings,
        }
    }

    fn bar(&self, counter: Counter) -> &ProgressBar {
        match counter {
            Counter::Controls => &self.controls,
            Counter::Mappings => &self.mappings,
        }
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, style: CardStyle) -> Self {
        Self {
            out,
            style,
            standards: Vec::new(),
            categories: Vec::new(),
            clear_visible: false,
            counters: None,
            error: None,
        }
    }

    pub fn standards(&self) -> &[String] {
        &self.standards
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn clear_visible(&self) -> bool {
        self.clear_visible
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// Stop the counter bars, leaving their final values on screen.
    pub fn finish_counters(&mut self) {
        if let Some(bars) = self.counters.take() {
            bars.controls.finish();
            bars.mappings.finish();
        }
    }

    /// First write error since the last call, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn emit(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{text}") {
            self.error = Some(err);
        }
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn set_result_count(&mut self, count: usize) {
        let noun = if count == 1 { "control" } else { "controls" };
        self.emit(&format!("{count} {noun} found"));
    }

    fn replace_results(&mut self, view: &View) {
        let text = match (&view.body, self.style) {
            (ResultsBody::NoResults, _) => format!("{NO_RESULTS_MESSAGE}\n{NO_RESULTS_HINT}"),
            (ResultsBody::Cards(cards), CardStyle::Compact) => compact_table(cards).to_string(),
            (ResultsBody::Cards(cards), CardStyle::Full) => cards
                .iter()
                .map(|card| card_table(card).to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        };
        self.emit(&text);
    }

    fn set_category_options(&mut self, categories: &[String]) {
        self.categories = categories.to_vec();
    }

    fn set_standard_options(&mut self, standards: &[String]) {
        self.standards = standards.to_vec();
    }

    fn set_counter(&mut self, counter: Counter, value: u64) {
        let bars = self.counters.get_or_insert_with(CounterBars::new);
        bars.bar(counter).set_message(value.to_string());
    }

    fn set_clear_visible(&mut self, visible: bool) {
        self.clear_visible = visible;
    }
}

/// One row per card: id, standard, title and mapping lines.
pub fn compact_table(cards: &[Card]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Standard"),
        header_cell("Title"),
        header_cell("Mappings"),
    ]);
    apply_table_style(&mut table);
    for card in cards {
        let standard = card
            .badges
            .first()
            .map(|badge| badge.label.as_str())
            .unwrap_or("-");
        let mappings = if card.has_mappings() {
            Cell::new(
                card.mapping_rows
                    .iter()
                    .map(|row| format!("{}: {}", row.label, row.value))
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            id_cell(&card.id),
            Cell::new(standard),
            Cell::new(&card.title),
            mappings,
        ]);
    }
    table
}

/// Every section of one card as label/value rows.
pub fn card_table(card: &Card) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table.set_header(vec![id_cell(&card.id), Cell::new(badge_line(card))]);
    table.add_row(vec![label_cell("Title"), Cell::new(&card.title)]);
    table.add_row(vec![label_cell("Description"), Cell::new(&card.description)]);
    for row in &card.mapping_rows {
        table.add_row(vec![label_cell(&row.label), Cell::new(&row.value)]);
    }
    if let Some(recommendation) = &card.recommendation {
        table.add_row(vec![
            label_cell(RECOMMENDATION_SUMMARY),
            Cell::new(recommendation),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
        ]);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn id_cell(id: &str) -> Cell {
    Cell::new(id).fg(Color::Blue).add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::DarkGrey)
}

fn badge_line(card: &Card) -> String {
    card.badges
        .iter()
        .map(|badge| format!("[{}]", badge.label))
        .collect::<Vec<_>>()
        .join(" ")
}
