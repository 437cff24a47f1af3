//! HTML projection of a [`View`].

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use compass_core::view::{
    MAPPINGS_HEADING, NO_RESULTS_HINT, NO_RESULTS_MESSAGE, RECOMMENDATION_SUMMARY,
};
use compass_core::{Card, StartupStats, View};

const PAGE_TITLE: &str = "Compliance Compass";

type HtmlResult = std::io::Result<()>;

/// Render the results region: the cards, or the no-results placeholder.
pub fn render_view(view: &View) -> String {
    render_with(|html| write_results(html, view))
}

/// Render a standalone page with counters, result count and cards.
pub fn render_page(view: &View, stats: StartupStats) -> String {
    render_with(|html| write_page(html, view, stats))
}

fn render_with<F>(write: F) -> String
where
    F: FnOnce(&mut Writer<Vec<u8>>) -> HtmlResult,
{
    let mut html = Writer::new_with_indent(Vec::new(), b' ', 2);
    // The sink is a Vec<u8>, whose io::Write impl never returns an error.
    let _ = write(&mut html);
    String::from_utf8_lossy(&html.into_inner()).into_owned()
}

fn write_page<W: Write>(html: &mut Writer<W>, view: &View, stats: StartupStats) -> HtmlResult {
    html.write_event(Event::DocType(BytesText::new("html")))?;
    html.write_event(Event::Start(BytesStart::new("html")))?;
    html.write_event(Event::Start(BytesStart::new("head")))?;
    let mut meta = BytesStart::new("meta");
    meta.push_attribute(("charset", "utf-8"));
    html.write_event(Event::Empty(meta))?;
    write_text_element(html, "title", None, PAGE_TITLE)?;
    html.write_event(Event::End(BytesEnd::new("head")))?;
    html.write_event(Event::Start(BytesStart::new("body")))?;

    start_with_class(html, "section", "stats")?;
    write_stat(html, "controlCount", stats.controls, "Controls")?;
    write_stat(html, "mappingCount", stats.mappings, "Cross-Standard Mappings")?;
    end(html, "section")?;

    let mut count = BytesStart::new("p");
    count.push_attribute(("class", "result-summary"));
    html.write_event(Event::Start(count))?;
    write_text_element(html, "span", Some("resultCount"), &view.result_count.to_string())?;
    html.write_event(Event::Text(BytesText::new(" controls")))?;
    end(html, "p")?;

    let mut results = BytesStart::new("div");
    results.push_attribute(("id", "resultsContainer"));
    html.write_event(Event::Start(results))?;
    write_results(html, view)?;
    end(html, "div")?;

    end(html, "body")?;
    end(html, "html")
}

fn write_stat<W: Write>(html: &mut Writer<W>, id: &str, value: usize, label: &str) -> HtmlResult {
    start_with_class(html, "div", "stat")?;
    write_text_element(html, "span", Some(id), &value.to_string())?;
    write_classed_text(html, "span", "stat-label", label)?;
    end(html, "div")
}

fn write_results<W: Write>(html: &mut Writer<W>, view: &View) -> HtmlResult {
    if view.is_empty() {
        start_with_class(html, "div", "loading")?;
        html.write_event(Event::Text(BytesText::new(NO_RESULTS_MESSAGE)))?;
        html.write_event(Event::Empty(BytesStart::new("br")))?;
        html.write_event(Event::Text(BytesText::new(NO_RESULTS_HINT)))?;
        return end(html, "div");
    }
    for card in view.cards() {
        write_card(html, card)?;
    }
    Ok(())
}

fn write_card<W: Write>(html: &mut Writer<W>, card: &Card) -> HtmlResult {
    start_with_class(html, "div", "control-card")?;

    start_with_class(html, "div", "control-header")?;
    write_classed_text(html, "div", "control-id", &card.id)?;
    start_with_class(html, "div", "control-badges")?;
    for badge in &card.badges {
        write_classed_text(html, "span", &format!("badge {}", badge.class), &badge.label)?;
    }
    end(html, "div")?;
    end(html, "div")?;

    write_classed_text(html, "h3", "control-title", &card.title)?;
    write_classed_text(html, "p", "control-description", &card.description)?;

    if card.has_mappings() {
        start_with_class(html, "div", "control-mappings")?;
        write_text_element(html, "strong", None, MAPPINGS_HEADING)?;
        for row in &card.mapping_rows {
            start_with_class(html, "div", "mapping-row")?;
            write_classed_text(html, "div", "mapping-label", &row.label)?;
            write_classed_text(html, "div", "mapping-value", &row.value)?;
            end(html, "div")?;
        }
        end(html, "div")?;
    }

    if let Some(recommendation) = &card.recommendation {
        start_with_class(html, "details", "control-recommendation")?;
        write_text_element(html, "summary", None, RECOMMENDATION_SUMMARY)?;
        write_text_element(html, "p", None, recommendation)?;
        end(html, "details")?;
    }

    end(html, "div")
}

fn start_with_class<W: Write>(html: &mut Writer<W>, name: &str, class: &str) -> HtmlResult {
    let mut start = BytesStart::new(name);
    start.push_attribute(("class", class));
    html.write_event(Event::Start(start))
}

fn end<W: Write>(html: &mut Writer<W>, name: &str) -> HtmlResult {
    html.write_event(Event::End(BytesEnd::new(name)))
}

fn write_classed_text<W: Write>(
    html: &mut Writer<W>,
    name: &str,
    class: &str,
    text: &str,
) -> HtmlResult {
    start_with_class(html, name, class)?;
    html.write_event(Event::Text(BytesText::new(text)))?;
    end(html, name)
}

fn write_text_element<W: Write>(
    html: &mut Writer<W>,
    name: &str,
    id: Option<&str>,
    text: &str,
) -> HtmlResult {
    let mut start = BytesStart::new(name);
    if let Some(id) = id {
        start.push_attribute(("id", id));
    }
    html.write_event(Event::Start(start))?;
    html.write_event(Event::Text(BytesText::new(text)))?;
    end(html, name)
}
