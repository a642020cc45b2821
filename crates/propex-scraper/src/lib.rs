//! Per-domain page classification and field extraction.
//!
//! Each supported listing site has a registered [`SiteHandler`] strategy:
//! a pure URL classifier (list page vs detail page) plus a selector-driven
//! field extractor over rendered HTML. The [`scrape`] orchestrator composes
//! fetch, domain resolution, handler dispatch, classification and
//! extraction into one call and folds every fault into a uniform result
//! envelope. Adding a site means adding a handler module and a registry
//! entry, never editing a central branch.

mod pipeline;
mod registry;
mod sites;

pub use pipeline::{scrape, try_scrape, ScrapeFailure};
pub use registry::{lookup_handler, SiteHandler};
