//! Session token authentication
//!
//! Tokens are HS256 JWTs whose `jti` names a row in `sessions`. A token is
//! only honoured while that session is unrevoked and unexpired and the
//! account is still active, so logout and resign take effect immediately.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{AccountStatus, Role};
use thiserror::Error;

use crate::db;
use crate::state::AppState;

/// JWT claims for a login session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account ID
    pub sub: String,
    /// Login user id
    pub uid: String,
    pub role: Role,
    /// Session ID
    pub jti: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated account, inserted into request extensions
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub account_id: i64,
    pub user_id: String,
    pub role: Role,
    pub session_id: String,
}

impl CurrentAccount {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("missing Authorization header")]
    MissingHeader,
    #[error("invalid Authorization format")]
    BadScheme,
    #[error("token expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("session revoked or expired")]
    Revoked,
    #[error("account disabled")]
    AccountDisabled,
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::MissingHeader => AppError::not_authenticated(),
            SessionError::BadScheme | SessionError::Invalid(_) => {
                AppError::new(ErrorCode::TokenInvalid)
            }
            SessionError::Expired => AppError::new(ErrorCode::TokenExpired),
            SessionError::Revoked => AppError::new(ErrorCode::SessionExpired),
            SessionError::AccountDisabled => AppError::new(ErrorCode::AccountDisabled),
            SessionError::Db(err) => {
                tracing::error!("DB error during session lookup: {err}");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

/// Create a session token
pub fn create_token(
    account_id: i64,
    user_id: &str,
    role: Role,
    session_id: &str,
    expires_at_ms: i64,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = SessionClaims {
        sub: account_id.to_string(),
        uid: user_id.to_string(),
        role,
        jti: session_id.to_string(),
        exp: (expires_at_ms / 1000) as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify signature and expiry
pub fn decode_token(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        _ => SessionError::Invalid(e.to_string()),
    })
}

fn bearer_token(request: &Request) -> Result<String, SessionError> {
    request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(SessionError::MissingHeader)?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
        .ok_or(SessionError::BadScheme)
}

async fn authenticate(state: &AppState, token: &str) -> Result<CurrentAccount, SessionError> {
    let claims = decode_token(token, &state.jwt_secret)?;

    let session = db::sessions::find_active(&state.pool, &claims.jti, shared::util::now_millis())
        .await?
        .ok_or(SessionError::Revoked)?;

    let status = AccountStatus::from_db(&session.status).unwrap_or(AccountStatus::Disabled);
    if !status.can_login() {
        return Err(SessionError::AccountDisabled);
    }

    Ok(CurrentAccount {
        account_id: session.account_id,
        user_id: session.user_id,
        role: Role::from_db(&session.role).unwrap_or(Role::User),
        session_id: claims.jti,
    })
}

/// Middleware that verifies the session token and injects [`CurrentAccount`]
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let uri = request.uri().clone();
    let token = bearer_token(&request);
    let result = match token {
        Ok(token) => authenticate(&state, &token).await,
        Err(e) => Err(e),
    };
    let account = result.map_err(|e| {
        tracing::debug!(uri = %uri, "Authentication failed: {e}");
        AppError::from(e)
    })?;

    request.extensions_mut().insert(account);
    Ok(next.run(request).await)
}

/// Require admin role. Must run after [`session_auth_middleware`].
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let account = request
        .extensions()
        .get::<CurrentAccount>()
        .ok_or_else(AppError::not_authenticated)?;
    if !account.is_admin() {
        tracing::warn!(
            target: "security",
            event = "admin_required",
            user_id = %account.user_id,
            path = %request.uri().path(),
            "Admin role required"
        );
        return Err(AppError::new(ErrorCode::AdminRequired));
    }
    Ok(next.run(request).await)
}
