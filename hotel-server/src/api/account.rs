//! Signed-in account: profile, password, resignation, booking history

use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Account, AccountStatus};
use shared::{BookingHistory, partition};
use validator::Validate;

use crate::auth::{ClientIp, CurrentAccount};
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;
use crate::util::{hash_password, validate, verify_password};

use super::auth::{check_password_len, join_address};
use super::extract::JsonBody;
use super::{ApiResult, record_audit};

async fn load_row(state: &AppState, account_id: i64) -> ServiceResult<db::accounts::AccountRow> {
    db::accounts::find_by_id(&state.pool, account_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound).into())
}

/// GET /api/account
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
) -> ApiResult<Account> {
    let row = load_row(&state, account.account_id).await?;
    Ok(Json(row.into_account()))
}

/// PUT /api/account
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub address_detail: Option<String>,
}

impl ProfileUpdate {
    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            ..self
        }
    }
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    JsonBody(req): JsonBody<ProfileUpdate>,
) -> ApiResult<Account> {
    let req = req.trimmed();
    validate(&req)?;
    let address = join_address(&req.address, req.address_detail.as_deref());
    db::accounts::update_profile(
        &state.pool,
        account.account_id,
        &req.name,
        &req.email,
        &req.phone,
        &address,
    )
    .await?;

    let row = load_row(&state, account.account_id).await?;
    Ok(Json(row.into_account()))
}

/// POST /api/account/password
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    ClientIp(ip): ClientIp,
    JsonBody(req): JsonBody<ChangePasswordRequest>,
) -> ApiResult<serde_json::Value> {
    check_password_len(&req.new_password)?;

    let row = load_row(&state, account.account_id).await?;
    if !verify_password(&req.current_password, &row.hashed_password) {
        return Err(AppError::invalid_credentials().into());
    }

    let hashed = hash_password(&req.new_password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;
    db::accounts::update_password(&state.pool, account.account_id, &hashed).await?;

    record_audit(&state, account.account_id, "password_change", None, Some(&ip)).await;
    Ok(Json(serde_json::json!({ "message": "Password updated" })))
}

/// POST /api/account/resign
#[derive(Debug, Deserialize)]
pub struct ResignRequest {
    pub password: String,
}

/// Disable the account and end every session it holds
pub async fn resign(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    ClientIp(ip): ClientIp,
    JsonBody(req): JsonBody<ResignRequest>,
) -> ApiResult<serde_json::Value> {
    let row = load_row(&state, account.account_id).await?;
    if !verify_password(&req.password, &row.hashed_password) {
        return Err(AppError::invalid_credentials().into());
    }

    db::accounts::update_status(&state.pool, account.account_id, AccountStatus::Disabled).await?;
    db::sessions::revoke_all(&state.pool, account.account_id).await?;

    tracing::info!(user_id = %account.user_id, "Account resigned");
    record_audit(&state, account.account_id, "resign", None, Some(&ip)).await;
    Ok(Json(serde_json::json!({ "message": "Account closed" })))
}

/// GET /api/account/bookings
pub async fn booking_history(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
) -> ApiResult<BookingHistory> {
    let bookings = db::bookings::find_by_account(&state.pool, account.account_id).await?;
    Ok(Json(partition(bookings, shared::util::today())))
}
