//! Compliance control records as supplied by the record document.
//!
//! Field access is best-effort: text fields default to empty and `mappings`
//! tolerates an absent or `null` map as well as `null` entries. Mapping keys
//! keep their document order, `recommendation` keeps its raw text, and fields
//! the record does not model are carried along in `extra`, so a loaded
//! record serializes back to the same document.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Related-standard key (e.g. `iso27001`) to ordered control references,
/// in document order.
pub type Mappings = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceRecord {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub standard: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_mappings")]
    pub mappings: Mappings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    /// Document fields outside the modeled ones.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ComplianceRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        standard: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            standard: standard.into(),
            category: category.into(),
            title: title.into(),
            description: String::new(),
            mappings: Mappings::new(),
            recommendation: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_mapping<I, S>(mut self, key: impl Into<String>, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mappings
            .insert(key.into(), references.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    /// Recommendation text worth showing; blank counts as none.
    pub fn recommendation_text(&self) -> Option<&str> {
        self.recommendation
            .as_deref()
            .filter(|text| !text.is_empty())
    }

    /// Number of cross-standard references across every mapping key.
    pub fn mapping_count(&self) -> usize {
        self.mappings.values().map(Vec::len).sum()
    }

    /// Mappings that carry at least one reference, in key order.
    pub fn active_mappings(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.mappings
            .iter()
            .filter(|(_, references)| !references.is_empty())
            .map(|(key, references)| (key.as_str(), references.as_slice()))
    }
}

/// Parse a record document (a JSON array of records).
pub fn parse_records(bytes: &[u8]) -> Result<Vec<ComplianceRecord>> {
    Ok(serde_json::from_slice(bytes)?)
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_mappings<'de, D>(deserializer: D) -> std::result::Result<Mappings, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<IndexMap<String, Option<Vec<String>>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, references)| (key, references.unwrap_or_default()))
        .collect())
}
