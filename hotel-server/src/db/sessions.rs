//! Server-side sessions backing issued tokens
//!
//! One active session per account: creating a session revokes the others.

use shared::util::now_millis;
use sqlx::{PgExecutor, PgPool};

/// Session joined with the account it belongs to
#[derive(Debug, sqlx::FromRow)]
pub struct ActiveSession {
    pub account_id: i64,
    pub user_id: String,
    pub role: String,
    pub status: String,
}

/// Create a new session, revoking any existing sessions for this account.
/// Returns `(session_id, expires_at)`.
///
/// Runs in one transaction holding the account row lock, so two concurrent
/// logins for one account still leave a single active session.
pub async fn create(pool: &PgPool, account_id: i64, ttl_ms: i64) -> Result<(String, i64), sqlx::Error> {
    let session_id = uuid::Uuid::new_v4().to_string();
    let now = now_millis();
    let expires_at = now + ttl_ms;

    let mut tx = pool.begin().await?;

    sqlx::query("SELECT id FROM accounts WHERE id = $1 FOR UPDATE")
        .bind(account_id)
        .execute(&mut *tx)
        .await?;

    revoke_all(&mut *tx, account_id).await?;

    sqlx::query("INSERT INTO sessions (id, account_id, expires_at, created_at) VALUES ($1, $2, $3, $4)")
        .bind(&session_id)
        .bind(account_id)
        .bind(expires_at)
        .bind(now)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok((session_id, expires_at))
}

/// Look up a non-revoked, unexpired session
pub async fn find_active(
    pool: &PgPool,
    session_id: &str,
    now: i64,
) -> Result<Option<ActiveSession>, sqlx::Error> {
    sqlx::query_as(
        "SELECT a.id AS account_id, a.user_id, a.role, a.status
         FROM sessions s JOIN accounts a ON a.id = s.account_id
         WHERE s.id = $1 AND NOT s.revoked AND s.expires_at > $2",
    )
    .bind(session_id)
    .bind(now)
    .fetch_optional(pool)
    .await
}

pub async fn revoke(pool: &PgPool, session_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE sessions SET revoked = TRUE WHERE id = $1")
        .bind(session_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Revoke all sessions for an account
pub async fn revoke_all<'e>(executor: impl PgExecutor<'e>, account_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE sessions SET revoked = TRUE WHERE account_id = $1 AND NOT revoked")
        .bind(account_id)
        .execute(executor)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::accounts::{self, NewAccount};
    use shared::models::Role;

    async fn active_count(pool: &PgPool, account_id: i64) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE account_id = $1 AND NOT revoked")
            .bind(account_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test]
    #[ignore = "needs a PostgreSQL DATABASE_URL"]
    async fn test_concurrent_logins_leave_one_session(pool: PgPool) {
        let new = NewAccount {
            user_id: "guest01",
            hashed_password: "x",
            name: "Guest",
            email: "guest@example.com",
            phone: "",
            address: "",
            role: Role::User,
        };
        let account = accounts::create(&pool, &new, now_millis()).await.unwrap();

        let (a, b) = tokio::join!(
            create(&pool, account.id, 60_000),
            create(&pool, account.id, 60_000)
        );
        assert_ne!(a.unwrap().0, b.unwrap().0);
        assert_eq!(active_count(&pool, account.id).await, 1);

        create(&pool, account.id, 60_000).await.unwrap();
        assert_eq!(active_count(&pool, account.id).await, 1);
    }
}
