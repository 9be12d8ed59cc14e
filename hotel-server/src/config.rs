//! Server configuration

use crate::error::BoxError;

/// Server configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 secret for session tokens
    pub jwt_secret: String,
    /// Session lifetime in hours
    pub session_ttl_hours: i64,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Hotels per list page
    pub hotel_page_size: u32,
    /// Inquiries per list page
    pub inquiry_page_size: u32,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: Self::parse_or("HTTP_PORT", 8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            session_ttl_hours: Self::parse_or("SESSION_TTL_HOURS", 24),
            request_timeout_secs: Self::parse_or("REQUEST_TIMEOUT_SECS", 30),
            hotel_page_size: Self::parse_or("HOTEL_PAGE_SIZE", 10),
            inquiry_page_size: Self::parse_or("INQUIRY_PAGE_SIZE", 5),
            environment,
        })
    }
}
