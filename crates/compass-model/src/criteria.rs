use serde::{Deserialize, Serialize};

/// Active filter values. An empty field matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against id, title and description.
    pub search: String,
    /// Exact standard tag.
    pub standard: String,
    /// Exact category tag.
    pub category: String,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_standard(mut self, standard: impl Into<String>) -> Self {
        self.standard = standard.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// True when no filter is active.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.standard.is_empty() && self.category.is_empty()
    }
}
