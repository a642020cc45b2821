//! Site handlers, one module per publisher.

mod domain_au;
mod realestate_au;
mod valuer_general;

pub(crate) use domain_au::DomainComAu;
pub(crate) use realestate_au::RealestateComAu;
pub(crate) use valuer_general::ValuerGeneralNsw;

use scraper::{ElementRef, Html, Selector};

/// Sentinel for a matched container whose text was empty, keeping it
/// distinguishable from "selector did not match" (which emits no field).
pub(crate) const NOT_FOUND: &str = "Not Found";

/// Parse a selector, logging and skipping the rule when the syntax is bad.
/// A malformed rule degrades one field, never the whole extraction.
pub(crate) fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(err) => {
            tracing::warn!(css, error = ?err, "skipping malformed selector rule");
            None
        }
    }
}

/// Collapsed, trimmed text content of an element.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of the first document node matching `css`, empty when nothing matched.
pub(crate) fn first_text(doc: &Html, css: &str) -> String {
    parse_selector(css)
        .and_then(|selector| doc.select(&selector).next())
        .map(element_text)
        .unwrap_or_default()
}

/// Text of the first node matching `css` inside `scope`, empty when nothing matched.
pub(crate) fn first_text_within(scope: ElementRef<'_>, css: &str) -> String {
    parse_selector(css)
        .and_then(|selector| scope.select(&selector).next())
        .map(element_text)
        .unwrap_or_default()
}

/// Apply the matched-but-empty sentinel to extracted text.
pub(crate) fn or_not_found(text: String) -> Option<String> {
    if text.is_empty() {
        Some(NOT_FOUND.to_string())
    } else {
        Some(text)
    }
}
