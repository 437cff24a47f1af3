//! Session tests: control events drive criteria and full re-renders.

use std::path::Path;

use compass_core::{ControlEvent, Counter, NullSurface, RecordingSurface, ResultsBody, Session};
use compass_model::ComplianceRecord;
use compass_store::{LoadOutcome, RecordStore, load_records};

fn sample_records() -> Vec<ComplianceRecord> {
    vec![
        ComplianceRecord::new("OPSC-C1", "Access Control policy", "OWASP", "Access Control")
            .with_mapping("iso27001", ["A.9.1.1"])
            .with_mapping("nist", ["PO.1.1", "PO.1.2"])
            .with_recommendation("Document who may grant access."),
        ComplianceRecord::new("A.12.4.1", "Event logging", "ISO27001", "Logging"),
        ComplianceRecord::new("PO.5.1", "Secure environments", "NIST", "Access Control")
            .with_mapping("owasp", ["OPSC-C1"]),
    ]
}

fn loaded_session(surface: &mut RecordingSurface) -> Session {
    Session::initialize(LoadOutcome::Loaded(sample_records()), surface)
}

#[test]
fn initialize_populates_selectors_and_renders_everything() {
    let mut surface = RecordingSurface::new();
    let session = loaded_session(&mut surface);

    assert_eq!(surface.result_count, Some(3));
    assert_eq!(
        surface.categories,
        vec!["Access Control".to_string(), "Logging".to_string()]
    );
    assert_eq!(
        surface.standards,
        vec!["ISO27001".to_string(), "NIST".to_string(), "OWASP".to_string()]
    );
    // Empty render before the load, full render after it.
    assert_eq!(surface.render_count, 2);
    assert_eq!(session.stats().controls, 3);
    assert_eq!(session.stats().mappings, 4);
}

#[test]
fn failed_load_renders_the_empty_state() {
    let mut surface = RecordingSurface::new();
    let outcome = load_records(Path::new("/nonexistent/compliance-compass/app-data.json"));
    let session = Session::initialize(outcome, &mut surface);

    assert!(session.store().is_empty());
    assert_eq!(surface.result_count, Some(0));
    assert_eq!(surface.view.as_ref().map(|v| &v.body), Some(&ResultsBody::NoResults));
    assert!(surface.categories.is_empty());
}

#[test]
fn search_event_toggles_clear_affordance() {
    let mut surface = RecordingSurface::new();
    let mut session = loaded_session(&mut surface);

    let count = session.dispatch(ControlEvent::SearchInput("logging".into()), &mut surface);
    assert_eq!(count, 1);
    assert!(surface.clear_visible);
    assert_eq!(session.criteria().search, "logging");

    let count = session.dispatch(ControlEvent::ClearSearch, &mut surface);
    assert_eq!(count, 3);
    assert!(!surface.clear_visible);
    assert!(session.criteria().search.is_empty());
}

#[test]
fn emptying_the_search_box_hides_clear() {
    let mut surface = RecordingSurface::new();
    let mut session = loaded_session(&mut surface);

    session.dispatch(ControlEvent::SearchInput("a".into()), &mut surface);
    session.dispatch(ControlEvent::SearchInput(String::new()), &mut surface);
    assert!(!surface.clear_visible);
}

#[test]
fn selectors_combine_with_search() {
    let mut surface = RecordingSurface::new();
    let mut session = loaded_session(&mut surface);

    session.dispatch(
        ControlEvent::CategorySelected("Access Control".into()),
        &mut surface,
    );
    assert_eq!(surface.result_count, Some(2));

    session.dispatch(ControlEvent::StandardSelected("NIST".into()), &mut surface);
    let view = surface.view.clone().expect("rendered view");
    let ids: Vec<&str> = view.cards().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["PO.5.1"]);

    session.dispatch(ControlEvent::StandardSelected(String::new()), &mut surface);
    assert_eq!(surface.result_count, Some(2));
}

#[test]
fn zero_results_render_the_placeholder() {
    let mut surface = RecordingSurface::new();
    let mut session = loaded_session(&mut surface);

    let count = session.dispatch(
        ControlEvent::SearchInput("no such control".into()),
        &mut surface,
    );

    assert_eq!(count, 0);
    assert_eq!(surface.result_count, Some(0));
    let view = surface.view.as_ref().expect("rendered view");
    assert!(view.is_empty());
}

#[test]
fn every_event_replaces_results() {
    let mut surface = RecordingSurface::new();
    let mut session = loaded_session(&mut surface);
    let before = surface.render_count;

    session.dispatch(ControlEvent::CategorySelected("Logging".into()), &mut surface);
    session.dispatch(ControlEvent::CategorySelected("Logging".into()), &mut surface);

    assert_eq!(surface.render_count, before + 2);
    assert_eq!(surface.result_count, Some(1));
}

#[test]
fn attach_keeps_criteria_set_before_load() {
    let mut surface = RecordingSurface::new();
    let mut session = Session::start(&mut surface);
    session.dispatch(ControlEvent::StandardSelected("OWASP".into()), &mut surface);
    assert_eq!(surface.result_count, Some(0));

    let stats = session.attach(LoadOutcome::Loaded(sample_records()), &mut surface);

    assert_eq!(stats.controls, 3);
    assert_eq!(surface.result_count, Some(1));
}

#[test]
fn counters_animate_to_store_totals() {
    let mut surface = RecordingSurface::new();
    let session = loaded_session(&mut surface);
    let mut ticks = 0;

    session.animate_stats(&mut surface, |_| ticks += 1);

    assert_eq!(surface.counter(Counter::Controls), Some(3));
    assert_eq!(surface.counter(Counter::Mappings), Some(4));
    assert!(ticks >= 50);
}

#[test]
fn sessions_work_without_display_regions() {
    let mut surface = NullSurface;
    let mut session = Session::new(RecordStore::new(sample_records()));
    assert_eq!(
        session.dispatch(ControlEvent::SearchInput("po.5".into()), &mut surface),
        1
    );
    assert_eq!(session.visible()[0].id, "PO.5.1");
}
