//! Zone Repository
//!
//! Zone CRUD plus the postal-code directory. A postal code belongs to at
//! most one zone; the UNIQUE constraint on `zone_postal_code.code` is the
//! authoritative enforcement, surfaced here as [`RepoError::Duplicate`].

use super::{RepoError, RepoResult, is_unique_violation};
use shared::models::{Zone, ZoneCreate, ZoneUpdate};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Zone>> {
    let zones = sqlx::query_as::<_, Zone>(
        "SELECT id, name, pickup_fee_cents FROM zone ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(zones)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Zone>> {
    let zone = sqlx::query_as::<_, Zone>(
        "SELECT id, name, pickup_fee_cents FROM zone WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(zone)
}

/// Resolve the zone claiming a postal code (exact match)
pub async fn resolve(pool: &SqlitePool, postal_code: &str) -> RepoResult<Option<Zone>> {
    let zone = sqlx::query_as::<_, Zone>(
        "SELECT z.id, z.name, z.pickup_fee_cents FROM zone z \
         JOIN zone_postal_code pc ON pc.zone_id = z.id WHERE pc.code = ?",
    )
    .bind(postal_code)
    .fetch_optional(pool)
    .await?;
    Ok(zone)
}

pub async fn postal_codes(pool: &SqlitePool, zone_id: i64) -> RepoResult<Vec<String>> {
    let codes: Vec<String> = sqlx::query_scalar(
        "SELECT code FROM zone_postal_code WHERE zone_id = ? ORDER BY code",
    )
    .bind(zone_id)
    .fetch_all(pool)
    .await?;
    Ok(codes)
}

pub async fn create(pool: &SqlitePool, data: ZoneCreate) -> RepoResult<Zone> {
    let mut tx = pool.begin().await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO zone (name, pickup_fee_cents) VALUES (?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(data.pickup_fee_cents)
    .fetch_one(&mut *tx)
    .await?;

    for code in &data.postal_codes {
        sqlx::query("INSERT INTO zone_postal_code (zone_id, code) VALUES (?, ?)")
            .bind(id)
            .bind(code)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    RepoError::Duplicate(format!("Postal code {code} belongs to another zone"))
                } else {
                    e.into()
                }
            })?;
    }

    tx.commit().await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create zone".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ZoneUpdate) -> RepoResult<Zone> {
    let rows = sqlx::query(
        "UPDATE zone SET name = COALESCE(?1, name), \
         pickup_fee_cents = COALESCE(?2, pickup_fee_cents) WHERE id = ?3",
    )
    .bind(data.name)
    .bind(data.pickup_fee_cents)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Zone {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Zone {id} not found")))
}

/// Delete a zone; refused while slots still reference it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM time_slot WHERE zone_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Err(RepoError::Validation(
            "Cannot delete zone with existing slots".into(),
        ));
    }
    sqlx::query("DELETE FROM zone_postal_code WHERE zone_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    let rows = sqlx::query("DELETE FROM zone WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Claim a postal code for a zone
///
/// Fails with `Duplicate` when the code is already claimed (by this or any
/// other zone); both zones are left unchanged.
pub async fn add_postal_code(pool: &SqlitePool, zone_id: i64, code: &str) -> RepoResult<()> {
    if find_by_id(pool, zone_id).await?.is_none() {
        return Err(RepoError::NotFound(format!("Zone {zone_id} not found")));
    }
    sqlx::query("INSERT INTO zone_postal_code (zone_id, code) VALUES (?, ?)")
        .bind(zone_id)
        .bind(code)
        .execute(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepoError::Duplicate(format!("Postal code {code} belongs to another zone"))
            } else {
                e.into()
            }
        })?;
    Ok(())
}

pub async fn remove_postal_code(pool: &SqlitePool, zone_id: i64, code: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM zone_postal_code WHERE zone_id = ? AND code = ?")
        .bind(zone_id)
        .bind(code)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
