//! One-shot loading of the record document.
//!
//! Loading never panics and never propagates past the initializer: the
//! result is an explicit [`LoadOutcome`] that the session consumes, and a
//! failed or empty load degrades to an empty store.

use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use compass_model::{ComplianceRecord, parse_records};

use crate::error::StoreError;

/// Result of the startup load.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The document parsed and contained at least one record.
    Loaded(Vec<ComplianceRecord>),
    /// The document parsed but held no records.
    Empty,
    /// The document could not be read or parsed.
    Failed(StoreError),
}

impl LoadOutcome {
    pub fn from_result(result: Result<Vec<ComplianceRecord>, StoreError>) -> Self {
        match result {
            Ok(records) if records.is_empty() => Self::Empty,
            Ok(records) => Self::Loaded(records),
            Err(error) => Self::Failed(error),
        }
    }

    pub fn record_count(&self) -> usize {
        match self {
            Self::Loaded(records) => records.len(),
            Self::Empty | Self::Failed(_) => 0,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Load the record document at `path`.
pub fn load_records(path: &Path) -> LoadOutcome {
    debug!(path = %path.display(), "loading record document");
    let outcome = LoadOutcome::from_result(read_document(path));
    if let LoadOutcome::Loaded(records) = &outcome {
        info!(path = %path.display(), record_count = records.len(), "record document loaded");
    }
    outcome
}

/// Load a record document from any reader; `origin` names it in errors.
pub fn load_records_from_reader<R: Read>(mut reader: R, origin: &Path) -> LoadOutcome {
    let mut bytes = Vec::new();
    let result = reader
        .read_to_end(&mut bytes)
        .map_err(|e| StoreError::io(origin, e))
        .and_then(|_| parse_document(&bytes, origin));
    LoadOutcome::from_result(result)
}

fn read_document(path: &Path) -> Result<Vec<ComplianceRecord>, StoreError> {
    let bytes = std::fs::read(path).map_err(|e| StoreError::io(path, e))?;
    parse_document(&bytes, path)
}

fn parse_document(bytes: &[u8], origin: &Path) -> Result<Vec<ComplianceRecord>, StoreError> {
    parse_records(bytes).map_err(|source| StoreError::Parse {
        path: origin.to_path_buf(),
        source,
    })
}
