//! Extraction orchestrator: resolve -> fetch -> dispatch -> classify -> extract.

use propex_core::{resolve_domain, CoreError, ScrapeOutcome};
use propex_fetch::{RenderClient, RenderError};
use thiserror::Error;

use crate::registry::lookup_handler;

/// Hard faults from a scrape attempt: the input was unusable or the page
/// never arrived. Everything past a successful fetch is a soft outcome
/// reported inside the envelope.
#[derive(Debug, Error)]
pub enum ScrapeFailure {
    #[error("{source}")]
    InvalidUrl {
        #[source]
        source: CoreError,
    },

    #[error("Scraping failed: {source}")]
    Render {
        domain: String,
        #[source]
        source: RenderError,
    },
}

impl ScrapeFailure {
    /// Degrade into the uniform result envelope, for callers that want a
    /// well-formed outcome on every path.
    #[must_use]
    pub fn into_outcome(self) -> ScrapeOutcome {
        let message = self.to_string();
        let domain = match self {
            ScrapeFailure::InvalidUrl { .. } => String::new(),
            ScrapeFailure::Render { domain, .. } => domain,
        };
        ScrapeOutcome::degraded(domain, message)
    }
}

/// Scrape one URL, separating hard faults from soft outcomes.
///
/// Soft outcomes — unsupported domain, zero extracted fields, a
/// handler-specific note — come back as `Ok` with the diagnostic in the
/// envelope's `error` field. Hard faults (unparsable URL, render failure)
/// come back as `Err` so transport callers can signal them distinctly.
///
/// # Errors
///
/// Returns [`ScrapeFailure::InvalidUrl`] for URLs with no canonical domain
/// and [`ScrapeFailure::Render`] when the rendering service could not
/// deliver the page.
pub async fn try_scrape(renderer: &RenderClient, url: &str) -> Result<ScrapeOutcome, ScrapeFailure> {
    let domain = resolve_domain(url).map_err(|source| {
        tracing::warn!(url, error = %source, "rejecting unparsable scrape URL");
        ScrapeFailure::InvalidUrl { source }
    })?;

    tracing::debug!(url, domain, "fetching rendered page");
    let html = renderer.content(url).await.map_err(|source| {
        tracing::warn!(url, domain, error = %source, "render fetch failed");
        ScrapeFailure::Render {
            domain: domain.clone(),
            source,
        }
    })?;

    let Some(handler) = lookup_handler(&domain) else {
        tracing::debug!(domain, "no handler registered");
        return Ok(ScrapeOutcome::degraded(
            domain.clone(),
            format!("Domain not supported: {domain}"),
        ));
    };

    let kind = handler.classify(url);
    let fields = handler.extract(&html, kind);
    tracing::info!(
        url,
        domain,
        kind = ?kind,
        field_count = fields.len(),
        "scrape finished"
    );

    let error = if fields.is_empty() {
        Some(handler.empty_note())
    } else {
        None
    };

    Ok(ScrapeOutcome {
        fields,
        source_type: kind,
        domain,
        error,
    })
}

/// Scrape one URL into a result envelope, folding hard faults in as
/// diagnostics. Never fails; callers that need to distinguish transport
/// faults should use [`try_scrape`].
pub async fn scrape(renderer: &RenderClient, url: &str) -> ScrapeOutcome {
    match try_scrape(renderer, url).await {
        Ok(outcome) => outcome,
        Err(failure) => failure.into_outcome(),
    }
}
