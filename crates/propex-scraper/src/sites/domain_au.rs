//! Handler for domain.com.au.
//!
//! Classification is live; extraction selectors are not pinned down yet,
//! so the handler emits the expected field names with a placeholder value.
//! That keeps the mapping table configurable for this domain ahead of real
//! extraction and keeps the pipeline from ever crashing on it.
//!
//! TODO: replace the placeholder rules with verified selectors for the
//! current domain.com.au markup.

use propex_core::{FieldSource, PageKind, ScrapedField};
use regex::Regex;

use crate::registry::SiteHandler;

const NOT_IMPLEMENTED: &str = "not implemented";

const LIST_FIELDS: &[&str] = &["price_list_domain", "address_list_domain"];
const DETAIL_FIELDS: &[&str] = &[
    "price_detail_domain",
    "address_detail_domain",
    "description_detail_domain",
];

pub(crate) struct DomainComAu;

impl SiteHandler for DomainComAu {
    fn domain_key(&self) -> &'static str {
        "domain.com.au"
    }

    fn classify(&self, url: &str) -> PageKind {
        if url.contains("/sale/") || url.contains("/rent/") {
            PageKind::List
        } else if has_listing_id(url) {
            PageKind::Detail
        } else {
            PageKind::Other
        }
    }

    fn extract(&self, _html: &str, kind: PageKind) -> Vec<ScrapedField> {
        match kind {
            PageKind::List => placeholder_fields(LIST_FIELDS, FieldSource::List),
            PageKind::Detail => placeholder_fields(DETAIL_FIELDS, FieldSource::Detail),
            PageKind::Other => Vec::new(),
        }
    }
}

/// Detail URLs are not distinguishable by path shape alone; they carry the
/// numeric listing ID, an 8+ digit run.
fn has_listing_id(url: &str) -> bool {
    let re = Regex::new(r"\d{8,}").expect("valid regex");
    re.is_match(url)
}

fn placeholder_fields(names: &[&str], source: FieldSource) -> Vec<ScrapedField> {
    names
        .iter()
        .map(|name| ScrapedField {
            field_name: (*name).to_string(),
            field_value: Some(NOT_IMPLEMENTED.to_string()),
            source,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sale_and_rent_urls_classify_as_list() {
        let handler = DomainComAu;
        assert_eq!(
            handler.classify("https://www.domain.com.au/sale/sydney-nsw-2000/"),
            PageKind::List
        );
        assert_eq!(
            handler.classify("https://www.domain.com.au/rent/melbourne-vic-3000/"),
            PageKind::List
        );
    }

    #[test]
    fn urls_with_long_numeric_id_classify_as_detail() {
        let handler = DomainComAu;
        assert_eq!(
            handler.classify("https://www.domain.com.au/12-main-st-sydney-nsw-2000-2019384756"),
            PageKind::Detail
        );
    }

    #[test]
    fn short_numeric_runs_do_not_trigger_detail() {
        let handler = DomainComAu;
        assert_eq!(
            handler.classify("https://www.domain.com.au/news/2024-market"),
            PageKind::Other
        );
    }

    #[test]
    fn list_path_wins_over_listing_id_heuristic() {
        // Priority order is fixed: the path rule is checked first.
        let handler = DomainComAu;
        assert_eq!(
            handler.classify("https://www.domain.com.au/sale/sydney/?id=2019384756"),
            PageKind::List
        );
    }

    #[test]
    fn placeholder_extraction_tags_fields_not_implemented() {
        let handler = DomainComAu;
        let fields = handler.extract("<html></html>", PageKind::Detail);
        assert_eq!(fields.len(), 3);
        assert!(fields
            .iter()
            .all(|f| f.field_value.as_deref() == Some("not implemented")));
        assert!(fields.iter().all(|f| f.source == FieldSource::Detail));
    }

    #[test]
    fn other_pages_extract_nothing() {
        let fields = DomainComAu.extract("<html></html>", PageKind::Other);
        assert!(fields.is_empty());
    }
}
