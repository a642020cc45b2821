use axum::{
    extract::{Query, State},
    Extension, Json,
};
use propex_core::ScrapeOutcome;
use propex_scraper::ScrapeFailure;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ScrapeQuery {
    pub url: Option<String>,
}

/// `GET /api/v1/scrape?url=…`
///
/// Status taxonomy: a missing or unparsable `url` is the caller's fault
/// (400); a render/navigation failure is an upstream fault (502); every
/// recognized extraction outcome — fields found, domain not supported, no
/// fields found — is a 200 whose envelope carries any soft diagnostic.
pub(super) async fn scrape(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ScrapeQuery>,
) -> Result<Json<ApiResponse<ScrapeOutcome>>, ApiError> {
    let Some(url) = query.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) else {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "missing url query parameter",
        ));
    };

    match propex_scraper::try_scrape(&state.renderer, url).await {
        Ok(outcome) => Ok(Json(ApiResponse {
            data: outcome,
            meta: ResponseMeta::new(req_id.0),
        })),
        Err(failure @ ScrapeFailure::InvalidUrl { .. }) => {
            Err(ApiError::new(req_id.0, "bad_request", failure.to_string()))
        }
        Err(failure @ ScrapeFailure::Render { .. }) => {
            tracing::error!(url, error = %failure, "scrape failed at the render boundary");
            Err(ApiError::new(
                req_id.0,
                "upstream_error",
                failure.to_string(),
            ))
        }
    }
}
