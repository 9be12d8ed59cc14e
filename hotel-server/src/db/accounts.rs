use shared::models::{Account, AccountStatus, Role};
use sqlx::PgPool;

#[derive(Debug, sqlx::FromRow)]
pub struct AccountRow {
    pub id: i64,
    pub user_id: String,
    pub hashed_password: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: String,
    pub status: String,
    pub created_at: i64,
}

impl AccountRow {
    /// Unknown role strings never grant admin
    pub fn role(&self) -> Role {
        Role::from_db(&self.role).unwrap_or(Role::User)
    }

    /// Unknown status strings never allow login
    pub fn status(&self) -> AccountStatus {
        AccountStatus::from_db(&self.status).unwrap_or(AccountStatus::Disabled)
    }

    pub fn into_account(self) -> Account {
        let role = self.role();
        let status = self.status();
        Account {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            role,
            status,
            created_at: self.created_at,
        }
    }
}

pub struct NewAccount<'a> {
    pub user_id: &'a str,
    pub hashed_password: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub role: Role,
}

pub async fn create(pool: &PgPool, account: &NewAccount<'_>, now: i64) -> Result<AccountRow, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO accounts (user_id, hashed_password, name, email, phone, address, role, status, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, 'active', $8)
         RETURNING *",
    )
    .bind(account.user_id)
    .bind(account.hashed_password)
    .bind(account.name)
    .bind(account.email)
    .bind(account.phone)
    .bind(account.address)
    .bind(account.role.as_db())
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn user_id_exists(pool: &PgPool, user_id: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM accounts WHERE user_id = $1)")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn find_by_user_id(pool: &PgPool, user_id: &str) -> Result<Option<AccountRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM accounts WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<AccountRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM accounts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_profile(
    pool: &PgPool,
    id: i64,
    name: &str,
    email: &str,
    phone: &str,
    address: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE accounts SET name = $1, email = $2, phone = $3, address = $4 WHERE id = $5")
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_password(pool: &PgPool, id: i64, hashed_password: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE accounts SET hashed_password = $1 WHERE id = $2")
        .bind(hashed_password)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_status(pool: &PgPool, id: i64, status: AccountStatus) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE accounts SET status = $1 WHERE id = $2")
        .bind(status.as_db())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<AccountRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM accounts ORDER BY id LIMIT $1 OFFSET $2")
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
        .fetch_one(pool)
        .await
}
