//! Display surface the session renders into.
//!
//! Regions are opaque sinks. Every method has a no-op default, so a surface
//! without a given region simply ignores the update.

use std::collections::BTreeMap;

use crate::view::View;

/// Startup statistic counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Counter {
    /// Total number of controls in the store.
    Controls,
    /// Total number of cross-standard mapping references.
    Mappings,
}

impl Counter {
    pub fn label(self) -> &'static str {
        match self {
            Counter::Controls => "Controls",
            Counter::Mappings => "Mappings",
        }
    }
}

pub trait DisplaySurface {
    fn set_result_count(&mut self, _count: usize) {}

    /// Replace the whole results region with `view`.
    fn replace_results(&mut self, _view: &View) {}

    fn set_category_options(&mut self, _categories: &[String]) {}

    fn set_standard_options(&mut self, _standards: &[String]) {}

    fn set_counter(&mut self, _counter: Counter, _value: u64) {}

    /// Show or hide the search box "clear" affordance.
    fn set_clear_visible(&mut self, _visible: bool) {}
}

/// Surface with no regions at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl DisplaySurface for NullSurface {}

/// Surface that keeps the last value written to each region.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub result_count: Option<usize>,
    pub view: Option<View>,
    pub render_count: usize,
    pub categories: Vec<String>,
    pub standards: Vec<String>,
    pub counters: BTreeMap<Counter, Vec<u64>>,
    pub clear_visible: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value shown by `counter`.
    pub fn counter(&self, counter: Counter) -> Option<u64> {
        self.counters
            .get(&counter)
            .and_then(|frames| frames.last().copied())
    }
}

impl DisplaySurface for RecordingSurface {
    fn set_result_count(&mut self, count: usize) {
        self.result_count = Some(count);
    }

    fn replace_results(&mut self, view: &View) {
        self.view = Some(view.clone());
        self.render_count += 1;
    }

    fn set_category_options(&mut self, categories: &[String]) {
        self.categories = categories.to_vec();
    }

    fn set_standard_options(&mut self, standards: &[String]) {
        self.standards = standards.to_vec();
    }

    fn set_counter(&mut self, counter: Counter, value: u64) {
        self.counters.entry(counter).or_default().push(value);
    }

    fn set_clear_visible(&mut self, visible: bool) {
        self.clear_visible = visible;
    }
}
