//! Export of the current filtered subset.
//!
//! Exports never read the store: callers hand in the visible subset, so the
//! artifact always mirrors what the results region shows.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use compass_model::ComplianceRecord;

use crate::error::ExportError;

pub const EXPORT_FILE_PREFIX: &str = "compliance-compass-export";

const CSV_FIXED_COLUMNS: [&str; 6] = [
    "id",
    "standard",
    "category",
    "title",
    "description",
    "recommendation",
];
const CSV_REFERENCE_DELIMITER: &str = "; ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A downloadable export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub format: ExportFormat,
    pub content: String,
    pub record_count: usize,
}

impl ExportArtifact {
    pub fn media_type(&self) -> &'static str {
        self.format.media_type()
    }
}

/// Calendar date stamped into export names: the UTC date of `now`.
pub fn export_date(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

/// `compliance-compass-export-<YYYY-MM-DD>.<ext>`
pub fn export_file_name(date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "{EXPORT_FILE_PREFIX}-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

pub fn export(
    subset: &[&ComplianceRecord],
    format: ExportFormat,
    date: NaiveDate,
) -> Result<ExportArtifact, ExportError> {
    match format {
        ExportFormat::Json => export_json(subset, date),
        ExportFormat::Csv => export_csv(subset, date),
    }
}

/// Pretty-printed JSON array of the subset.
pub fn export_json(
    subset: &[&ComplianceRecord],
    date: NaiveDate,
) -> Result<ExportArtifact, ExportError> {
    let content = serde_json::to_string_pretty(subset)?;
    Ok(ExportArtifact {
        file_name: export_file_name(date, ExportFormat::Json),
        format: ExportFormat::Json,
        content,
        record_count: subset.len(),
    })
}

/// One row per record and one column per mapping key seen in the subset.
pub fn export_csv(
    subset: &[&ComplianceRecord],
    date: NaiveDate,
) -> Result<ExportArtifact, ExportError> {
    let mapping_keys: BTreeSet<&str> = subset
        .iter()
        .flat_map(|record| record.mappings.keys().map(String::as_str))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    let header: Vec<&str> = CSV_FIXED_COLUMNS
        .iter()
        .copied()
        .chain(mapping_keys.iter().copied())
        .collect();
    writer.write_record(&header).map_err(csv_error)?;

    for record in subset {
        let mut row = vec![
            record.id.clone(),
            record.standard.clone(),
            record.category.clone(),
            record.title.clone(),
            record.description.clone(),
            record.recommendation.clone().unwrap_or_default(),
        ];
        for key in &mapping_keys {
            let cell = record
                .mappings
                .get(*key)
                .map(|references| references.join(CSV_REFERENCE_DELIMITER))
                .unwrap_or_default();
            row.push(cell);
        }
        writer.write_record(&row).map_err(csv_error)?;
    }

    let bytes = writer.into_inner().map_err(|e| ExportError::Csv {
        message: e.to_string(),
    })?;
    let content = String::from_utf8(bytes).map_err(|e| ExportError::Csv {
        message: e.to_string(),
    })?;
    Ok(ExportArtifact {
        file_name: export_file_name(date, ExportFormat::Csv),
        format: ExportFormat::Csv,
        content,
        record_count: subset.len(),
    })
}

/// Write the artifact into `dir` under its own file name.
pub fn write_artifact(dir: &Path, artifact: &ExportArtifact) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(&artifact.file_name);
    std::fs::write(&path, &artifact.content).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    info!(
        path = %path.display(),
        record_count = artifact.record_count,
        format = %artifact.format,
        "export written"
    );
    Ok(path)
}

fn csv_error(error: csv::Error) -> ExportError {
    ExportError::Csv {
        message: error.to_string(),
    }
}
