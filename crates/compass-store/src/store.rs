//! The immutable record store and its derived aggregates.

use std::collections::BTreeSet;

use tracing::{error, warn};

use compass_model::ComplianceRecord;

use crate::loader::LoadOutcome;

/// Full list of records, loaded once and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<ComplianceRecord>,
}

/// Records sharing a grouping key, in original order.
#[derive(Debug, Clone)]
pub struct RecordGroup<'a> {
    pub key: String,
    pub records: Vec<&'a ComplianceRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<ComplianceRecord>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the store from the startup load, degrading to empty on failure.
    pub fn from_outcome(outcome: LoadOutcome) -> Self {
        match outcome {
            LoadOutcome::Loaded(records) => Self::new(records),
            LoadOutcome::Empty => {
                warn!("record document contained no records");
                Self::empty()
            }
            LoadOutcome::Failed(err) => {
                error!(error = %err, "error loading data");
                Self::empty()
            }
        }
    }

    pub fn records(&self) -> &[ComplianceRecord] {
        &self.records
    }

    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct categories, sorted ascending.
    pub fn categories(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.category.as_str()))
    }

    /// Distinct standards, sorted ascending.
    pub fn standards(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.standard.as_str()))
    }

    /// Total cross-standard references over every record and mapping key.
    pub fn mapping_count(&self) -> usize {
        self.records.iter().map(ComplianceRecord::mapping_count).sum()
    }

    /// Group records by `key`, groups ordered by first appearance.
    pub fn group_by<F>(&self, key: F) -> Vec<RecordGroup<'_>>
    where
        F: Fn(&ComplianceRecord) -> String,
    {
        let mut groups: Vec<RecordGroup<'_>> = Vec::new();
        for record in &self.records {
            let group_key = key(record);
            match groups.iter_mut().find(|group| group.key == group_key) {
                Some(group) => group.records.push(record),
                None => groups.push(RecordGroup {
                    key: group_key,
                    records: vec![record],
                }),
            }
        }
        groups
    }

    /// Groups keyed by lowercased standard.
    pub fn group_by_standard(&self) -> Vec<RecordGroup<'_>> {
        self.group_by(|record| record.standard.to_lowercase())
    }

    /// Groups keyed by category name.
    pub fn group_by_category(&self) -> Vec<RecordGroup<'_>> {
        self.group_by(|record| record.category.clone())
    }
}

impl From<Vec<ComplianceRecord>> for RecordStore {
    fn from(records: Vec<ComplianceRecord>) -> Self {
        Self::new(records)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
