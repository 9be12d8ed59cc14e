//! Account entry points: signup, duplicate id check, login, logout

use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Account, LoginResponse, Role, UserIdAvailability};
use validator::Validate;

use crate::auth::session_auth::create_token;
use crate::auth::{ClientIp, CurrentAccount};
use crate::db;
use crate::util::{hash_password, validate, verify_password};

use super::extract::{JsonBody, PathParam};
use super::{ApiResult, record_audit};
use crate::state::AppState;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Street address plus an optional detail line, joined by one space
pub(crate) fn join_address(address: &str, detail: Option<&str>) -> String {
    let address = address.trim();
    match detail.map(str::trim).filter(|d| !d.is_empty()) {
        Some(detail) if !address.is_empty() => format!("{address} {detail}"),
        Some(detail) => detail.to_string(),
        None => address.to_string(),
    }
}

pub(crate) fn check_password_len(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort)
            .with_detail("min_length", MIN_PASSWORD_LEN));
    }
    Ok(())
}

/// POST /api/auth/signup
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 4, max = 20))]
    pub user_id: String,
    pub password: String,
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

impl SignupRequest {
    /// Length rules apply to the values that get stored
    fn trimmed(self) -> Self {
        Self {
            user_id: self.user_id.trim().to_string(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            ..self
        }
    }
}

pub async fn signup(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    JsonBody(req): JsonBody<SignupRequest>,
) -> ApiResult<Account> {
    let req = req.trimmed();
    validate(&req)?;
    check_password_len(&req.password)?;

    let user_id = req.user_id.as_str();
    if db::accounts::user_id_exists(&state.pool, user_id).await? {
        return Err(AppError::new(ErrorCode::UserIdTaken).into());
    }

    let hashed = hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;
    let address = join_address(&req.address, req.address_detail.as_deref());

    let new = db::accounts::NewAccount {
        user_id,
        hashed_password: &hashed,
        name: &req.name,
        email: &req.email,
        phone: &req.phone,
        address: &address,
        role: Role::User,
    };
    let row = match db::accounts::create(&state.pool, &new, shared::util::now_millis()).await {
        Ok(row) => row,
        // Lost a race with a concurrent signup for the same id
        Err(e) if db::is_unique_violation(&e) => {
            return Err(AppError::new(ErrorCode::UserIdTaken).into());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %row.user_id, "Account created");
    record_audit(&state, row.id, "signup", None, Some(&ip)).await;

    Ok(Json(row.into_account()))
}

/// GET /api/auth/check-id/{user_id}
pub async fn check_id(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<String>,
) -> ApiResult<UserIdAvailability> {
    let user_id = user_id.trim().to_string();
    if user_id.is_empty() {
        return Err(AppError::new(ErrorCode::RequiredField)
            .with_detail("field", "user_id")
            .into());
    }
    let taken = db::accounts::user_id_exists(&state.pool, &user_id).await?;
    Ok(Json(UserIdAvailability {
        user_id,
        available: !taken,
    }))
}

/// POST /api/auth/login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let row = db::accounts::find_by_user_id(&state.pool, req.user_id.trim())
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &row.hashed_password) {
        tracing::warn!(
            target: "security",
            event = "login_failed",
            user_id = %row.user_id,
            ip = %ip,
            "Wrong password"
        );
        return Err(AppError::invalid_credentials().into());
    }

    if !row.status().can_login() {
        return Err(AppError::new(ErrorCode::AccountDisabled).into());
    }

    let ttl_ms = state.session_ttl_hours * 60 * 60 * 1000;
    let (session_id, expires_at) = db::sessions::create(&state.pool, row.id, ttl_ms).await?;

    let token = create_token(
        row.id,
        &row.user_id,
        row.role(),
        &session_id,
        expires_at,
        &state.jwt_secret,
    )
    .map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    record_audit(&state, row.id, "login", None, Some(&ip)).await;

    Ok(Json(LoginResponse {
        token,
        expires_at,
        account: row.into_account(),
    }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    ClientIp(ip): ClientIp,
) -> ApiResult<serde_json::Value> {
    db::sessions::revoke(&state.pool, &account.session_id).await?;
    record_audit(&state, account.account_id, "logout", None, Some(&ip)).await;
    Ok(Json(serde_json::json!({ "message": "Logged out" })))
}
