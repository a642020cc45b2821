//! Handler for realestate.com.au listing pages.
//!
//! Selectors target the site's `data-testid` attributes, which survive
//! styling churn better than class names but will still drift; keep them
//! alongside the fixtures in the tests below when updating.

use propex_core::{FieldSource, PageKind, ScrapedField};
use scraper::Html;

use super::{element_text, first_text, first_text_within, or_not_found, parse_selector};
use crate::registry::SiteHandler;

const LIST_CARD: &str = r#"article[data-testid^="listing-card"]"#;
const LIST_ADDRESS: &str = r#"a[data-testid="listing-card-link"]"#;
const LIST_PRICE: &str = r#"span[data-testid="listing-card-price"]"#;
const LIST_FEATURE: &str = r#"span[data-testid="property-features-text-container"]"#;

const DETAIL_PRICE: &str = r#"span[data-testid="listing-details__summary-title"]"#;
const DETAIL_ADDRESS: &str = r#"h1[data-testid="listing-details__button-copy-wrapper-address"]"#;
const DETAIL_DESCRIPTION: &str = r#"div[data-testid="listing-details__description"]"#;
const DETAIL_FEATURES: &str =
    r#"div[data-testid="listing-details-property-features-wrapper"] span.rui-sc-7k6r01-2"#;

/// Feature-chip vocabulary: substring of the chip text -> emitted field
/// name. Chips matching nothing here are dropped silently.
const LIST_FEATURE_KINDS: &[(&str, &str)] = &[
    ("bed", "beds_list"),
    ("bath", "baths_list"),
    ("car", "cars_list"),
];

pub(crate) struct RealestateComAu;

impl SiteHandler for RealestateComAu {
    fn domain_key(&self) -> &'static str {
        "realestate.com.au"
    }

    fn classify(&self, url: &str) -> PageKind {
        if url.contains("/buy/") || url.contains("/rent/") || url.contains("/sold/") {
            PageKind::List
        } else if url.contains("/property-") {
            PageKind::Detail
        } else {
            PageKind::Other
        }
    }

    fn extract(&self, html: &str, kind: PageKind) -> Vec<ScrapedField> {
        let doc = Html::parse_document(html);
        match kind {
            PageKind::List => extract_list(&doc),
            PageKind::Detail => extract_detail(&doc),
            PageKind::Other => Vec::new(),
        }
    }
}

/// List extraction models one representative property: only the first
/// matching card is read, by design.
fn extract_list(doc: &Html) -> Vec<ScrapedField> {
    let mut fields = Vec::new();

    let Some(card_selector) = parse_selector(LIST_CARD) else {
        return fields;
    };
    let Some(card) = doc.select(&card_selector).next() else {
        return fields;
    };

    fields.push(ScrapedField {
        field_name: "address_list".to_string(),
        field_value: or_not_found(first_text_within(card, LIST_ADDRESS)),
        source: FieldSource::List,
    });
    fields.push(ScrapedField {
        field_name: "price_list".to_string(),
        field_value: or_not_found(first_text_within(card, LIST_PRICE)),
        source: FieldSource::List,
    });

    if let Some(feature_selector) = parse_selector(LIST_FEATURE) {
        for chip in card.select(&feature_selector) {
            let text = element_text(chip).to_lowercase();
            for (needle, field_name) in LIST_FEATURE_KINDS {
                if text.contains(needle) {
                    fields.push(ScrapedField {
                        field_name: (*field_name).to_string(),
                        field_value: Some(text.clone()),
                        source: FieldSource::List,
                    });
                }
            }
        }
    }

    fields
}

fn extract_detail(doc: &Html) -> Vec<ScrapedField> {
    let mut fields = vec![
        ScrapedField {
            field_name: "price_detail".to_string(),
            field_value: or_not_found(first_text(doc, DETAIL_PRICE)),
            source: FieldSource::Detail,
        },
        ScrapedField {
            field_name: "address_detail".to_string(),
            field_value: or_not_found(first_text(doc, DETAIL_ADDRESS)),
            source: FieldSource::Detail,
        },
        ScrapedField {
            field_name: "description_detail".to_string(),
            field_value: or_not_found(first_text(doc, DETAIL_DESCRIPTION)),
            source: FieldSource::Detail,
        },
    ];

    // The feature set is open-ended, so the field name is derived from the
    // first token of the feature label. Derived-name collisions resolve
    // last-write-wins within this pass.
    if let Some(feature_selector) = parse_selector(DETAIL_FEATURES) {
        for element in doc.select(&feature_selector) {
            let text = element_text(element);
            if text.is_empty() {
                continue;
            }
            let token = text
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_lowercase();
            let field_name = format!("feature_{token}_detail");
            if let Some(existing) = fields.iter_mut().find(|f| f.field_name == field_name) {
                existing.field_value = Some(text);
            } else {
                fields.push(ScrapedField {
                    field_name,
                    field_value: Some(text),
                    source: FieldSource::Detail,
                });
            }
        }
    }

    fields
}
