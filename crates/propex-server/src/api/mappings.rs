use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use propex_core::FieldMap;
use propex_db::DomainMappingRow;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MappingItem {
    domain: String,
    field_map: FieldMap,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DomainMappingRow> for MappingItem {
    fn from(row: DomainMappingRow) -> Self {
        Self {
            domain: row.domain,
            field_map: row.field_map.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Typed as `FieldMap` so non-string mapping values are rejected at
/// deserialization instead of being stored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SaveMappingBody {
    field_map: FieldMap,
}

/// Mapping records are keyed by the same canonical form the domain
/// resolver produces; normalize path input so `WWW.Example.com` and
/// `example.com` address one record.
fn canonical_domain(raw: &str) -> Option<String> {
    let domain = raw.trim().to_ascii_lowercase();
    let domain = domain.strip_prefix("www.").unwrap_or(&domain).to_string();
    if domain.is_empty() {
        None
    } else {
        Some(domain)
    }
}

pub(super) async fn list_mappings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<MappingItem>>>, ApiError> {
    let rows = propex_db::list_mappings(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(MappingItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_mapping(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(domain): Path<String>,
) -> Result<Json<ApiResponse<MappingItem>>, ApiError> {
    let Some(domain) = canonical_domain(&domain) else {
        return Err(ApiError::new(req_id.0, "bad_request", "empty domain"));
    };

    let row = propex_db::get_mapping(&state.pool, &domain)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    match row {
        Some(row) => Ok(Json(ApiResponse {
            data: MappingItem::from(row),
            meta: ResponseMeta::new(req_id.0),
        })),
        None => Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("no mapping stored for domain: {domain}"),
        )),
    }
}

pub(super) async fn save_mapping(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(domain): Path<String>,
    Json(body): Json<SaveMappingBody>,
) -> Result<Json<ApiResponse<MappingItem>>, ApiError> {
    let Some(domain) = canonical_domain(&domain) else {
        return Err(ApiError::new(req_id.0, "bad_request", "empty domain"));
    };

    let row = propex_db::upsert_mapping(&state.pool, &domain, &body.field_map)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(domain = %row.domain, entries = row.field_map.0.len(), "mapping saved");

    Ok(Json(ApiResponse {
        data: MappingItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}
