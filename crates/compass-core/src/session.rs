//! Session state: the record store, the single filter criteria instance and
//! the control events that mutate it.

use std::time::Duration;

use tracing::{debug, info};

use compass_model::{ComplianceRecord, FilterCriteria};
use compass_store::{LoadOutcome, RecordStore};

use crate::animate::{ANIMATION_TICK, CounterAnimation};
use crate::filter;
use crate::surface::{Counter, DisplaySurface};
use crate::view::View;

/// A change on one of the filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    /// New value of the search box.
    SearchInput(String),
    /// The search box "clear" affordance was activated.
    ClearSearch,
    /// New standard selection; empty selects all.
    StandardSelected(String),
    /// New category selection; empty selects all.
    CategorySelected(String),
}

/// Counter targets shown once the records are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartupStats {
    pub controls: usize,
    pub mappings: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    store: RecordStore,
    criteria: FilterCriteria,
}

impl Session {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            criteria: FilterCriteria::default(),
        }
    }

    /// Start with an empty store and render the empty state.
    pub fn start<S: DisplaySurface>(surface: &mut S) -> Self {
        let session = Self::default();
        session.populate_selectors(surface);
        session.render(surface);
        session
    }

    /// Start, then consume the startup load.
    pub fn initialize<S: DisplaySurface>(outcome: LoadOutcome, surface: &mut S) -> Self {
        let mut session = Self::start(surface);
        session.attach(outcome, surface);
        session
    }

    /// Replace the store with the result of the startup load and re-render.
    ///
    /// The active criteria are kept. A failed load leaves the store empty.
    pub fn attach<S: DisplaySurface>(
        &mut self,
        outcome: LoadOutcome,
        surface: &mut S,
    ) -> StartupStats {
        self.store = RecordStore::from_outcome(outcome);
        self.populate_selectors(surface);
        let stats = self.stats();
        info!(
            controls = stats.controls,
            mappings = stats.mappings,
            "records attached"
        );
        self.render(surface);
        stats
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn stats(&self) -> StartupStats {
        StartupStats {
            controls: self.store.size(),
            mappings: self.store.mapping_count(),
        }
    }

    /// The currently visible subset, in store order.
    pub fn visible(&self) -> Vec<&ComplianceRecord> {
        filter::apply(self.store.records(), &self.criteria)
    }

    pub fn view(&self) -> View {
        View::project(&self.visible())
    }

    /// Replace the results region with the current view; returns the count.
    pub fn render<S: DisplaySurface>(&self, surface: &mut S) -> usize {
        let view = self.view();
        surface.set_result_count(view.result_count);
        surface.replace_results(&view);
        view.result_count
    }

    /// Apply one control event and re-render.
    pub fn dispatch<S: DisplaySurface>(&mut self, event: ControlEvent, surface: &mut S) -> usize {
        match event {
            ControlEvent::SearchInput(text) => {
                surface.set_clear_visible(!text.is_empty());
                self.criteria.search = text;
            }
            ControlEvent::ClearSearch => {
                self.criteria.search.clear();
                surface.set_clear_visible(false);
            }
            ControlEvent::StandardSelected(value) => self.criteria.standard = value,
            ControlEvent::CategorySelected(value) => self.criteria.category = value,
        }
        let count = self.render(surface);
        debug!(
            search = %self.criteria.search,
            standard = %self.criteria.standard,
            category = %self.criteria.category,
            result_count = count,
            "criteria changed"
        );
        count
    }

    /// Run the startup counter animation, calling `sleep` between frames.
    pub fn animate_stats<S, F>(&self, surface: &mut S, mut sleep: F)
    where
        S: DisplaySurface,
        F: FnMut(Duration),
    {
        let stats = self.stats();
        let mut controls = CounterAnimation::new(stats.controls as u64);
        let mut mappings = CounterAnimation::new(stats.mappings as u64);
        loop {
            let mut advanced = false;
            if let Some(value) = controls.next() {
                surface.set_counter(Counter::Controls, value);
                advanced = true;
            }
            if let Some(value) = mappings.next() {
                surface.set_counter(Counter::Mappings, value);
                advanced = true;
            }
            if !advanced {
                break;
            }
            sleep(ANIMATION_TICK);
        }
    }

    fn populate_selectors<S: DisplaySurface>(&self, surface: &mut S) {
        surface.set_standard_options(&self.store.standards());
        surface.set_category_options(&self.store.categories());
    }
}
