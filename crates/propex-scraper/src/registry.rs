//! Static registry mapping canonical domains to scraping strategies.

use propex_core::{PageKind, ScrapedField};

use crate::sites::{DomainComAu, RealestateComAu, ValuerGeneralNsw};

/// A per-domain scraping strategy: URL classification plus field extraction.
///
/// Implementations must be pure over their inputs and must never panic; a
/// rule whose selector fails to parse or match simply contributes no field.
pub trait SiteHandler: Send + Sync {
    /// Registered key, matched by containment against the canonical domain
    /// so regional subdomains (`rent.realestate.com.au`) still dispatch.
    fn domain_key(&self) -> &'static str;

    /// Classify a page from its URL alone; never inspects page content.
    fn classify(&self, url: &str) -> PageKind;

    /// Extract fields from rendered HTML, scoped by the page kind.
    fn extract(&self, html: &str, kind: PageKind) -> Vec<ScrapedField>;

    /// Diagnostic attached when extraction produced zero fields.
    fn empty_note(&self) -> String {
        "No fields found, check selectors.".to_string()
    }
}

static HANDLERS: &[&(dyn SiteHandler)] = &[&RealestateComAu, &DomainComAu, &ValuerGeneralNsw];

/// Look up the handler registered for a canonical domain key.
#[must_use]
pub fn lookup_handler(domain: &str) -> Option<&'static dyn SiteHandler> {
    HANDLERS
        .iter()
        .copied()
        .find(|handler| domain.contains(handler.domain_key()))
}
