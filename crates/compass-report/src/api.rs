//! Static JSON API generation.
//!
//! Writes one file per endpoint so the record document can be served from a
//! static host:
//!
//! - `all.json`: every control
//! - `standards/<standard>.json`: controls of one standard
//! - `categories/<category-slug>.json`: controls of one category
//! - `controls/<id-slug>.json`: a single control
//! - `mappings/<id-slug>.json`: the mappings of a single control
//! - `index.json`: the endpoint listing

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use compass_model::{ComplianceRecord, Mappings};
use compass_store::RecordStore;

use crate::error::ApiError;
use crate::slug::slugify;

pub const API_VERSION: &str = "1.0.0";

const API_ROOT: &str = "/api";

#[derive(Debug, Clone)]
pub struct ApiOptions {
    /// Timestamp stamped into every `meta.generated`.
    pub generated: DateTime<Utc>,
    /// Public base URL; adds a `usage` block to the index when set.
    pub base_url: Option<String>,
}

impl ApiOptions {
    pub fn new(generated: DateTime<Utc>) -> Self {
        Self {
            generated,
            base_url: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }
}

/// What `generate_api` wrote.
#[derive(Debug, Clone, Default)]
pub struct ApiSummary {
    pub controls: usize,
    pub standards: usize,
    pub categories: usize,
    pub files: BTreeSet<PathBuf>,
}

#[derive(Serialize)]
struct Meta<'a> {
    version: &'static str,
    generated: &'a str,
    total: usize,
    endpoint: &'a str,
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    meta: Meta<'a>,
    data: T,
}

#[derive(Serialize)]
struct MappingEntry<'a> {
    id: &'a str,
    standard: &'a str,
    title: &'a str,
    mappings: &'a Mappings,
}

struct ApiWriter<'a> {
    out_dir: &'a Path,
    generated: String,
    files: BTreeSet<PathBuf>,
}

impl ApiWriter<'_> {
    fn write_list(
        &mut self,
        relative: &str,
        records: &[&ComplianceRecord],
    ) -> Result<(), ApiError> {
        self.write_envelope(relative, records.len(), records)
    }

    fn write_envelope<T: Serialize>(
        &mut self,
        relative: &str,
        total: usize,
        data: T,
    ) -> Result<(), ApiError> {
        let endpoint = format!("{API_ROOT}/{relative}");
        let envelope = Envelope {
            meta: Meta {
                version: API_VERSION,
                generated: &self.generated,
                total,
                endpoint: &endpoint,
            },
            data,
        };
        let value = serde_json::to_value(&envelope).map_err(|source| ApiError::Json {
            endpoint: endpoint.clone(),
            source,
        })?;
        self.save(relative, &value)
    }

    fn save(&mut self, relative: &str, value: &serde_json::Value) -> Result<(), ApiError> {
        let path = self.out_dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ApiError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(value).map_err(|source| ApiError::Json {
            endpoint: relative.to_string(),
            source,
        })?;
        std::fs::write(&path, json).map_err(|source| ApiError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "created endpoint file");
        self.files.insert(path);
        Ok(())
    }
}

/// Write every endpoint file for `store` under `out_dir`.
pub fn generate_api(
    store: &RecordStore,
    out_dir: &Path,
    options: &ApiOptions,
) -> Result<ApiSummary, ApiError> {
    let mut writer = ApiWriter {
        out_dir,
        generated: options
            .generated
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        files: BTreeSet::new(),
    };

    let all: Vec<&ComplianceRecord> = store.records().iter().collect();
    writer.write_list("all.json", &all)?;

    let standards = store.group_by_standard();
    for group in &standards {
        writer.write_list(&format!("standards/{}.json", group.key), &group.records)?;
    }

    let categories = store.group_by(|record| slugify(&record.category));
    for group in &categories {
        writer.write_list(&format!("categories/{}.json", group.key), &group.records)?;
    }

    for record in store.records() {
        let slug = slugify(&record.id);
        writer.write_envelope(&format!("controls/{slug}.json"), 1, record)?;
        let entry = MappingEntry {
            id: &record.id,
            standard: &record.standard,
            title: &record.title,
            mappings: &record.mappings,
        };
        writer.write_envelope(&format!("mappings/{slug}.json"), 1, entry)?;
    }

    let index = build_index(
        &writer.generated,
        standards.iter().map(|group| group.key.as_str()),
        categories.iter().map(|group| group.key.as_str()),
        options.base_url.as_deref(),
    );
    writer.save("index.json", &index)?;

    let summary = ApiSummary {
        controls: store.size(),
        standards: standards.len(),
        categories: categories.len(),
        files: writer.files,
    };
    info!(
        controls = summary.controls,
        standards = summary.standards,
        categories = summary.categories,
        files = summary.files.len(),
        "api generation complete"
    );
    Ok(summary)
}

fn build_index<'a>(
    generated: &str,
    standards: impl Iterator<Item = &'a str>,
    category_slugs: impl Iterator<Item = &'a str>,
    base_url: Option<&str>,
) -> serde_json::Value {
    let standards: BTreeMap<&str, String> = standards
        .map(|key| (key, format!("{API_ROOT}/standards/{key}.json")))
        .collect();
    let categories: Vec<String> = category_slugs
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|slug| format!("{API_ROOT}/categories/{slug}.json"))
        .collect();

    let mut index = json!({
        "meta": {
            "version": API_VERSION,
            "generated": generated,
        },
        "endpoints": {
            "all_controls": format!("{API_ROOT}/all.json"),
            "standards": &standards,
            "categories": categories,
            "individual_controls": format!("{API_ROOT}/controls/{{control-id}}.json"),
            "mappings": format!("{API_ROOT}/mappings/{{control-id}}.json"),
        },
    });
    if let Some(base_url) = base_url {
        let base_url = base_url.trim_end_matches('/');
        let mut usage = json!({ "base_url": base_url });
        if let Some(path) = standards.values().next() {
            usage["example"] = json!(format!("{base_url}{path}"));
        }
        index["usage"] = usage;
    }
    index
}
