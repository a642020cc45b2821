//! Database operations for the `domain_mappings` table.

use chrono::{DateTime, Utc};
use propex_core::FieldMap;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `domain_mappings` table.
///
/// `field_map` round-trips as a JSONB object of strings; the typed
/// `FieldMap` at this boundary is what rejects any other stored shape.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DomainMappingRow {
    pub domain: String,
    pub field_map: Json<FieldMap>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Returns the mapping for a canonical domain, or `None` if none is stored.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_mapping(pool: &PgPool, domain: &str) -> Result<Option<DomainMappingRow>, DbError> {
    let row = sqlx::query_as::<_, DomainMappingRow>(
        "SELECT domain, field_map, created_at, updated_at \
         FROM domain_mappings \
         WHERE domain = $1",
    )
    .bind(domain)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns all stored mappings, ordered by domain.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_mappings(pool: &PgPool) -> Result<Vec<DomainMappingRow>, DbError> {
    let rows = sqlx::query_as::<_, DomainMappingRow>(
        "SELECT domain, field_map, created_at, updated_at \
         FROM domain_mappings \
         ORDER BY domain",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Create-or-update the mapping for a canonical domain.
///
/// `domain` is the record identity: repeated saves rewrite `field_map` in
/// place and advance `updated_at`, never duplicate the row. Concurrent
/// upserts for the same domain converge last-write-wins inside a single
/// statement, so a get-then-write race cannot lose the row or fail with a
/// conflict.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the statement fails.
pub async fn upsert_mapping(
    pool: &PgPool,
    domain: &str,
    field_map: &FieldMap,
) -> Result<DomainMappingRow, DbError> {
    let row = sqlx::query_as::<_, DomainMappingRow>(
        "INSERT INTO domain_mappings (domain, field_map) \
         VALUES ($1, $2) \
         ON CONFLICT (domain) DO UPDATE SET \
             field_map = EXCLUDED.field_map, \
             updated_at = NOW() \
         RETURNING domain, field_map, created_at, updated_at",
    )
    .bind(domain)
    .bind(Json(field_map))
    .fetch_one(pool)
    .await?;

    Ok(row)
}
