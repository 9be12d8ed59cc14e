//! Application state

use sqlx::PgPool;

use crate::auth::rate_limit::RateLimiter;
use crate::config::Config;
use crate::error::BoxError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// HS256 secret for session tokens
    pub jwt_secret: String,
    /// Session lifetime in hours
    pub session_ttl_hours: i64,
    /// Rate limiter for login/signup routes
    pub rate_limiter: RateLimiter,
    pub hotel_page_size: u32,
    pub inquiry_page_size: u32,
}

impl AppState {
    /// Connect, run migrations, and build the state
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self::with_pool(pool, config))
    }

    pub fn with_pool(pool: PgPool, config: &Config) -> Self {
        Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            session_ttl_hours: config.session_ttl_hours,
            rate_limiter: RateLimiter::new(),
            hotel_page_size: config.hotel_page_size.max(1),
            inquiry_page_size: config.inquiry_page_size.max(1),
        }
    }
}
