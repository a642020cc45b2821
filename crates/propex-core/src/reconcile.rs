//! Reconciliation of stored field mappings with freshly scraped fields,
//! and combination of list + detail scrapes into one record.

use std::collections::HashSet;

use crate::types::{FieldMap, FieldSource, ScrapeOutcome, ScrapedField};

/// Build the working mapping for a new set of scraped fields.
///
/// Every scraped field name gets an entry: the existing normalized name
/// when the stored mapping has one, otherwise the empty-string sentinel
/// marking it unmapped. Stored entries for fields that did not appear in
/// this scrape are not carried over.
#[must_use]
pub fn merge_field_map(existing: Option<&FieldMap>, fields: &[ScrapedField]) -> FieldMap {
    let mut merged = FieldMap::new();
    for field in fields {
        let normalized = existing
            .and_then(|map| map.get(&field.field_name))
            .cloned()
            .unwrap_or_default();
        merged.insert(field.field_name.clone(), normalized);
    }
    merged
}

/// Combine a list-page scrape with a follow-up detail scrape of one of its
/// entries into a single record.
///
/// Keeps the list-sourced fields of `prior` and the detail-sourced fields
/// of `detail`, drops `Other`-sourced fields from both, and dedupes by
/// `(field_name, source)`. The detail result's domain and page kind are
/// authoritative for the combined record.
#[must_use]
pub fn combine_results(prior: &ScrapeOutcome, detail: &ScrapeOutcome) -> ScrapeOutcome {
    let mut seen: HashSet<(&str, FieldSource)> = HashSet::new();
    let mut fields: Vec<ScrapedField> = Vec::new();

    let kept = prior
        .fields
        .iter()
        .filter(|f| f.source == FieldSource::List)
        .chain(
            detail
                .fields
                .iter()
                .filter(|f| f.source == FieldSource::Detail),
        );
    for field in kept {
        if seen.insert((field.field_name.as_str(), field.source)) {
            fields.push(field.clone());
        }
    }

    // A detail-side "no fields found" note would be misleading once list
    // fields are present, so the diagnostic only survives an empty combine.
    let error = if fields.is_empty() {
        detail.error.clone()
    } else {
        None
    };

    ScrapeOutcome {
        fields,
        source_type: detail.source_type,
        domain: detail.domain.clone(),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PageKind;

    fn field(name: &str, value: &str, source: FieldSource) -> ScrapedField {
        ScrapedField {
            field_name: name.to_string(),
            field_value: Some(value.to_string()),
            source,
        }
    }

    fn outcome(fields: Vec<ScrapedField>, kind: PageKind, domain: &str) -> ScrapeOutcome {
        ScrapeOutcome {
            fields,
            source_type: kind,
            domain: domain.to_string(),
            error: None,
        }
    }

    #[test]
    fn merge_carries_existing_names_and_marks_new_fields_unmapped() {
        let mut existing = FieldMap::new();
        existing.insert("price_list".to_string(), "askingPrice".to_string());

        let fields = vec![
            field("price_list", "$500,000", FieldSource::List),
            field("address_list", "12 Main St", FieldSource::List),
        ];

        let merged = merge_field_map(Some(&existing), &fields);
        assert_eq!(merged.get("price_list").map(String::as_str), Some("askingPrice"));
        assert_eq!(merged.get("address_list").map(String::as_str), Some(""));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_without_stored_mapping_leaves_everything_unmapped() {
        let fields = vec![field("beds_list", "2 beds", FieldSource::List)];
        let merged = merge_field_map(None, &fields);
        assert_eq!(merged.get("beds_list").map(String::as_str), Some(""));
    }

    #[test]
    fn merge_drops_stored_entries_absent_from_the_new_scrape() {
        let mut existing = FieldMap::new();
        existing.insert("stale_field".to_string(), "old".to_string());
        existing.insert("price_list".to_string(), "askingPrice".to_string());

        let fields = vec![field("price_list", "$1", FieldSource::List)];
        let merged = merge_field_map(Some(&existing), &fields);
        assert!(!merged.contains_key("stale_field"));
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn combine_keeps_list_from_prior_and_detail_from_detail() {
        let prior = outcome(
            vec![
                field("address_list", "12 Main St", FieldSource::List),
                field("noise", "x", FieldSource::Other),
            ],
            PageKind::List,
            "realestate.com.au",
        );
        let detail = outcome(
            vec![
                field("price_detail", "$500,000", FieldSource::Detail),
                field("leftover_list", "y", FieldSource::List),
            ],
            PageKind::Detail,
            "realestate.com.au",
        );

        let combined = combine_results(&prior, &detail);
        let names: Vec<&str> = combined
            .fields
            .iter()
            .map(|f| f.field_name.as_str())
            .collect();
        assert_eq!(names, vec!["address_list", "price_detail"]);
        assert!(combined
            .fields
            .iter()
            .all(|f| f.source != FieldSource::Other));
        assert_eq!(combined.source_type, PageKind::Detail);
        assert_eq!(combined.domain, "realestate.com.au");
    }

    #[test]
    fn combine_dedupes_by_name_and_source() {
        let prior = outcome(
            vec![
                field("address_list", "first", FieldSource::List),
                field("address_list", "second", FieldSource::List),
            ],
            PageKind::List,
            "realestate.com.au",
        );
        let detail = outcome(vec![], PageKind::Detail, "realestate.com.au");

        let combined = combine_results(&prior, &detail);
        assert_eq!(combined.fields.len(), 1);
        assert_eq!(combined.fields[0].field_value.as_deref(), Some("first"));
    }

    #[test]
    fn combine_clears_detail_diagnostic_when_fields_survive() {
        let prior = outcome(
            vec![field("address_list", "12 Main St", FieldSource::List)],
            PageKind::List,
            "realestate.com.au",
        );
        let mut detail = outcome(vec![], PageKind::Detail, "realestate.com.au");
        detail.error = Some("No fields found, check selectors.".to_string());

        let combined = combine_results(&prior, &detail);
        assert_eq!(combined.fields.len(), 1);
        assert!(combined.error.is_none());
    }

    #[test]
    fn combine_of_two_empty_results_keeps_the_detail_diagnostic() {
        let prior = outcome(vec![], PageKind::List, "realestate.com.au");
        let mut detail = outcome(vec![], PageKind::Detail, "realestate.com.au");
        detail.error = Some("No fields found, check selectors.".to_string());

        let combined = combine_results(&prior, &detail);
        assert!(combined.fields.is_empty());
        assert!(combined.error.is_some());
    }
}
