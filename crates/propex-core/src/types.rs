//! Wire-level domain types shared by the scraper, server and CLI.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw scraped field name -> user-chosen normalized name, for one domain.
///
/// Ordered so serialized mappings and listings are deterministic. An
/// empty-string value marks a field the user has not mapped yet; `None`
/// never appears on the wire.
pub type FieldMap = BTreeMap<String, String>;

/// Which view of a site a field was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSource {
    /// A listing-collection (search results) page.
    List,
    /// A single-property detail page.
    Detail,
    /// Neither recognized view.
    Other,
}

/// Classification of a fetched page, decided from its URL alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    List,
    Detail,
    Other,
}

/// A single piece of data pulled off a page. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedField {
    pub field_name: String,
    /// `Some("Not Found")` when the container matched but its text was
    /// empty; a rule whose selector matched nothing emits no field at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_value: Option<String>,
    pub source: FieldSource,
}

/// The result envelope for one scrape of one URL.
///
/// `error` is a soft diagnostic (no fields found, domain not supported);
/// hard transport faults are surfaced by the caller's status code, never
/// smuggled in here alongside a populated field list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOutcome {
    pub fields: Vec<ScrapedField>,
    pub source_type: PageKind,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeOutcome {
    /// An outcome with no fields and a diagnostic explaining why.
    #[must_use]
    pub fn degraded(domain: String, error: impl Into<String>) -> Self {
        Self {
            fields: Vec::new(),
            source_type: PageKind::Other,
            domain,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_serializes_with_wire_names() {
        let field = ScrapedField {
            field_name: "price_list".to_string(),
            field_value: Some("$500,000".to_string()),
            source: FieldSource::List,
        };
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "fieldName": "price_list",
                "fieldValue": "$500,000",
                "source": "list",
            })
        );
    }

    #[test]
    fn absent_field_value_is_omitted() {
        let field = ScrapedField {
            field_name: "address_list".to_string(),
            field_value: None,
            source: FieldSource::List,
        };
        let json = serde_json::to_value(&field).unwrap();
        assert!(json.get("fieldValue").is_none());
    }

    #[test]
    fn outcome_serializes_source_type_lowercase() {
        let outcome = ScrapeOutcome {
            fields: Vec::new(),
            source_type: PageKind::Detail,
            domain: "realestate.com.au".to_string(),
            error: None,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["sourceType"], "detail");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn degraded_outcome_carries_diagnostic_only() {
        let outcome = ScrapeOutcome::degraded("example.com".to_string(), "no handler");
        assert!(outcome.fields.is_empty());
        assert_eq!(outcome.error.as_deref(), Some("no handler"));
        assert_eq!(outcome.source_type, PageKind::Other);
    }
}
