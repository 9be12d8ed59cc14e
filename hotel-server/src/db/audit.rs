//! Audit log operations

use sqlx::PgPool;

use crate::error::BoxError;

/// Write an audit log entry
pub async fn log(
    pool: &PgPool,
    account_id: i64,
    action: &str,
    detail: Option<&serde_json::Value>,
    ip_address: Option<&str>,
    now: i64,
) -> Result<(), BoxError> {
    sqlx::query(
        "INSERT INTO audit_logs (account_id, action, detail, ip_address, created_at) VALUES ($1, $2, $3, $4, $5)"
    )
    .bind(account_id)
    .bind(action)
    .bind(detail)
    .bind(ip_address)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Audit log entry
#[derive(sqlx::FromRow, serde::Serialize)]
pub struct AuditEntry {
    pub id: i64,
    pub account_id: i64,
    pub action: String,
    pub detail: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub created_at: i64,
}

/// Query audit log entries, newest first, optionally for one account
pub async fn query(
    pool: &PgPool,
    account_id: Option<i64>,
    limit: i64,
    offset: i64,
) -> Result<Vec<AuditEntry>, BoxError> {
    let rows: Vec<AuditEntry> = sqlx::query_as(
        "SELECT id, account_id, action, detail, ip_address, created_at FROM audit_logs
         WHERE ($1::BIGINT IS NULL OR account_id = $1)
         ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
    )
    .bind(account_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn count(pool: &PgPool, account_id: Option<i64>) -> Result<i64, BoxError> {
    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM audit_logs WHERE ($1::BIGINT IS NULL OR account_id = $1)")
            .bind(account_id)
            .fetch_one(pool)
            .await?;
    Ok(total)
}
