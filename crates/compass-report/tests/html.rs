//! Integration tests for the HTML card projection.

use compass_core::{StartupStats, View};
use compass_model::ComplianceRecord;
use compass_report::{render_page, render_view};

fn card_record() -> ComplianceRecord {
    ComplianceRecord::new("OPSC-C5", "Validate <all> inputs", "OWASP", "Input Validation")
        .with_description("Reject data that fails \"allow-list\" checks & log it.")
        .with_mapping("iso27001", ["A.14.2.5", "A.14.1.2"])
        .with_mapping("nist", Vec::<String>::new())
        .with_recommendation("Centralize validation.")
}

#[test]
fn renders_card_regions() {
    let record = card_record();
    let html = render_view(&View::project(&[&record]));

    assert!(html.contains(r#"<div class="control-card">"#));
    assert!(html.contains(r#"<div class="control-id">OPSC-C5</div>"#));
    assert!(html.contains(r#"<span class="badge badge-owasp">OWASP</span>"#));
    assert!(html.contains(r#"<span class="badge badge-iso27001">ISO27001</span>"#));
    assert!(!html.contains("badge-nist"));
    assert!(html.contains(r#"<div class="mapping-label">ISO27001</div>"#));
    assert!(html.contains(r#"<div class="mapping-value">A.14.2.5, A.14.1.2</div>"#));
    assert!(html.contains("<summary>Implementation Recommendations</summary>"));
    assert!(html.contains("<p>Centralize validation.</p>"));
}

#[test]
fn escapes_record_text() {
    let record = card_record();
    let html = render_view(&View::project(&[&record]));

    assert!(html.contains("Validate &lt;all&gt; inputs"));
    assert!(html.contains("&amp; log it."));
    assert!(!html.contains("<all>"));
}

#[test]
fn omits_optional_sections() {
    let record = ComplianceRecord::new("PO.1.1", "Requirements", "NIST", "Governance");
    let html = render_view(&View::project(&[&record]));

    assert!(!html.contains("control-mappings"));
    assert!(!html.contains("<details"));
    assert!(html.contains(r#"<span class="badge badge-nist">NIST</span>"#));
}

#[test]
fn empty_view_renders_placeholder_only() {
    let html = render_view(&View::project(&[]));

    assert!(html.contains(r#"<div class="loading">"#));
    assert!(html.contains("No controls found matching your criteria."));
    assert!(html.contains("Try adjusting your filters."));
    assert!(!html.contains("control-card"));
}

#[test]
fn page_carries_counters_and_result_count() {
    let record = card_record();
    let view = View::project(&[&record]);
    let html = render_page(
        &view,
        StartupStats {
            controls: 12,
            mappings: 40,
        },
    );

    assert!(html.trim_start().starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<span id="controlCount">12</span>"#));
    assert!(html.contains(r#"<span id="mappingCount">40</span>"#));
    assert!(html.contains(r#"<span id="resultCount">1</span>"#));
    assert!(html.contains(r#"<div id="resultsContainer">"#));
}

#[test]
fn empty_page_is_complete_and_embeds_placeholder() {
    let html = render_page(&View::project(&[]), StartupStats::default());

    assert!(html.contains(r#"<span id="resultCount">0</span>"#));
    assert!(html.contains(r#"<div class="loading">"#));
    assert!(html.trim_end().ends_with("</html>"));
}
