//! Projection of a filtered subset into result cards.

use compass_model::ComplianceRecord;

pub const NO_RESULTS_MESSAGE: &str = "No controls found matching your criteria.";
pub const NO_RESULTS_HINT: &str = "Try adjusting your filters.";
pub const MAPPINGS_HEADING: &str = "Cross-Standard Mappings:";
pub const RECOMMENDATION_SUMMARY: &str = "Implementation Recommendations";
pub const MAPPING_DELIMITER: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    /// Style class, `badge-<tag>`.
    pub class: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    pub label: String,
    pub value: String,
}

/// Display representation of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    /// Standard badge first, then one badge per non-empty mapping key.
    pub badges: Vec<Badge>,
    pub title: String,
    pub description: String,
    pub mapping_rows: Vec<MappingRow>,
    /// Body of the collapsible recommendation section.
    pub recommendation: Option<String>,
}

impl Card {
    pub fn from_record(record: &ComplianceRecord) -> Self {
        let mut badges = vec![Badge {
            class: format!("badge-{}", record.standard.to_lowercase()),
            label: record.standard.clone(),
        }];
        let mut mapping_rows = Vec::new();
        for (key, references) in record.active_mappings() {
            badges.push(Badge {
                class: format!("badge-{key}"),
                label: mapping_label(key),
            });
            mapping_rows.push(MappingRow {
                label: mapping_label(key),
                value: references.join(MAPPING_DELIMITER),
            });
        }
        Self {
            id: record.id.clone(),
            badges,
            title: record.title.clone(),
            description: record.description.clone(),
            mapping_rows,
            recommendation: record.recommendation_text().map(str::to_string),
        }
    }

    pub fn has_mappings(&self) -> bool {
        !self.mapping_rows.is_empty()
    }
}

/// Display label for a mapping key.
pub fn mapping_label(key: &str) -> String {
    key.to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsBody {
    Cards(Vec<Card>),
    /// Placeholder shown instead of cards when nothing matched.
    NoResults,
}

/// Everything the results region shows for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub result_count: usize,
    pub body: ResultsBody,
}

impl View {
    pub fn project(subset: &[&ComplianceRecord]) -> Self {
        let body = if subset.is_empty() {
            ResultsBody::NoResults
        } else {
            ResultsBody::Cards(subset.iter().map(|record| Card::from_record(record)).collect())
        };
        Self {
            result_count: subset.len(),
            body,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.body, ResultsBody::NoResults)
    }

    pub fn cards(&self) -> &[Card] {
        match &self.body {
            ResultsBody::Cards(cards) => cards,
            ResultsBody::NoResults => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_skips_empty_mappings() {
        let record = ComplianceRecord::new("OPSC-C1", "Least privilege", "OWASP", "Access")
            .with_mapping("iso27001", ["A.9.1.2", "A.9.2.3"])
            .with_mapping("nist", Vec::<String>::new());
        let card = Card::from_record(&record);

        let classes: Vec<&str> = card.badges.iter().map(|b| b.class.as_str()).collect();
        assert_eq!(classes, vec!["badge-owasp", "badge-iso27001"]);
        assert_eq!(
            card.mapping_rows,
            vec![MappingRow {
                label: "ISO27001".to_string(),
                value: "A.9.1.2, A.9.2.3".to_string(),
            }]
        );
        assert!(card.recommendation.is_none());
    }

    #[test]
    fn badges_follow_mapping_document_order() {
        let record = ComplianceRecord::new("OPSC-C1", "Least privilege", "OWASP", "Access")
            .with_mapping("owasp", ["OPSC-C1"])
            .with_mapping("iso27001", ["A.9.1.1"])
            .with_mapping("nist", Vec::<String>::new())
            .with_recommendation("");
        let card = Card::from_record(&record);

        let labels: Vec<&str> = card.badges.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["OWASP", "OWASP", "ISO27001"]);
        let rows: Vec<&str> = card.mapping_rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(rows, vec!["OWASP", "ISO27001"]);
        assert!(card.recommendation.is_none());
    }

    #[test]
    fn empty_subset_projects_placeholder() {
        let view = View::project(&[]);
        assert_eq!(view.result_count, 0);
        assert!(view.is_empty());
        assert!(view.cards().is_empty());
    }
}
