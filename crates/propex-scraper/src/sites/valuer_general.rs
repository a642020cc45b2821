//! Handler stub for valuergeneral.nsw.gov.au.
//!
//! Property-sales search there sits behind a multi-step interactive form
//! with CAPTCHA, which a fetch-then-parse pipeline cannot drive. The
//! handler stays registered so users get a specific diagnostic instead of
//! a generic "domain not supported".

use propex_core::{PageKind, ScrapedField};

use crate::registry::SiteHandler;

pub(crate) struct ValuerGeneralNsw;

impl SiteHandler for ValuerGeneralNsw {
    fn domain_key(&self) -> &'static str {
        "valuergeneral.nsw.gov.au"
    }

    fn classify(&self, _url: &str) -> PageKind {
        PageKind::Other
    }

    fn extract(&self, _html: &str, _kind: PageKind) -> Vec<ScrapedField> {
        Vec::new()
    }

    fn empty_note(&self) -> String {
        "Scraping Valuer General requires an interactive session and CAPTCHA handling, \
         which is not implemented."
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_extracts_and_never_panics() {
        let handler = ValuerGeneralNsw;
        assert_eq!(
            handler.classify("https://valuergeneral.nsw.gov.au/property_sales_information"),
            PageKind::Other
        );
        assert!(handler.extract("<html></html>", PageKind::Other).is_empty());
        assert!(handler.empty_note().contains("interactive session"));
    }
}
