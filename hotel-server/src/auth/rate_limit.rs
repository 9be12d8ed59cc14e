//! Application-layer rate limiting for login and signup routes

use axum::{
    extract::{ConnectInfo, FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use http::request::Parts;
use shared::error::{AppError, ErrorCode};
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::state::AppState;

struct IpEntry {
    count: u32,
    window_start: Instant,
}

#[derive(Clone, Default)]
pub struct RateLimiter {
    /// route name -> (IP -> entry)
    inner: Arc<Mutex<HashMap<&'static str, HashMap<String, IpEntry>>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the request is allowed, `false` if rate-limited.
    async fn check(
        &self,
        route: &'static str,
        ip: &str,
        max_requests: u32,
        window_secs: u64,
    ) -> bool {
        let mut map = self.inner.lock().await;
        let route_map = map.entry(route).or_default();
        let now = Instant::now();

        let entry = route_map.entry(ip.to_owned()).or_insert_with(|| IpEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start).as_secs() >= window_secs {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;
        entry.count <= max_requests
    }

    /// Remove entries older than 5 minutes
    pub async fn cleanup(&self) {
        let mut map = self.inner.lock().await;
        let cutoff = std::time::Duration::from_secs(300);
        let now = Instant::now();

        for route_map in map.values_mut() {
            route_map.retain(|_, entry| now.duration_since(entry.window_start) < cutoff);
        }

        map.retain(|_, route_map| !route_map.is_empty());
    }

    #[cfg(test)]
    async fn tracked_ips(&self) -> usize {
        self.inner.lock().await.values().map(HashMap::len).sum()
    }
}

/// Client IP: X-Forwarded-For first (reverse proxy), then the peer address.
fn client_ip(headers: &http::HeaderMap, extensions: &http::Extensions) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
        && let Some(first) = val.split(',').next()
    {
        let ip = first.trim();
        if !ip.is_empty() {
            return ip.to_owned();
        }
    }

    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

pub fn extract_ip(request: &Request) -> String {
    client_ip(request.headers(), request.extensions())
}

/// Extractor for the caller's IP, recorded in audit entries
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientIp(client_ip(&parts.headers, &parts.extensions)))
    }
}

/// Login: 5 requests/minute per IP
pub async fn login_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = extract_ip(&request);
    if !state.rate_limiter.check("login", &ip, 5, 60).await {
        tracing::warn!(ip = %ip, "Login rate limit exceeded");
        return Err(AppError::new(ErrorCode::TooManyRequests));
    }
    Ok(next.run(request).await)
}

/// Signup: 3 requests/minute per IP
pub async fn signup_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = extract_ip(&request);
    if !state.rate_limiter.check("signup", &ip, 3, 60).await {
        tracing::warn!(ip = %ip, "Signup rate limit exceeded");
        return Err(AppError::new(ErrorCode::TooManyRequests));
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[tokio::test]
    async fn test_limit_per_route_and_ip() {
        let limiter = RateLimiter::new();
        for _ in 0..3 {
            assert!(limiter.check("signup", "10.0.0.1", 3, 60).await);
        }
        assert!(!limiter.check("signup", "10.0.0.1", 3, 60).await);
        // other IPs and routes have their own budget
        assert!(limiter.check("signup", "10.0.0.2", 3, 60).await);
        assert!(limiter.check("login", "10.0.0.1", 3, 60).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_resets() {
        let limiter = RateLimiter::new();
        assert!(limiter.check("login", "ip", 1, 60).await);
        assert!(!limiter.check("login", "ip", 1, 60).await);
        tokio::time::advance(std::time::Duration::from_secs(61)).await;
        assert!(limiter.check("login", "ip", 1, 60).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_drops_stale_entries() {
        let limiter = RateLimiter::new();
        limiter.check("login", "a", 5, 60).await;
        limiter.check("signup", "b", 5, 60).await;
        assert_eq!(limiter.tracked_ips().await, 2);

        tokio::time::advance(std::time::Duration::from_secs(301)).await;
        limiter.cleanup().await;
        assert_eq!(limiter.tracked_ips().await, 0);
    }

    #[test]
    fn test_extract_ip_prefers_forwarded_header() {
        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(extract_ip(&request), "203.0.113.7");

        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(extract_ip(&request), "unknown");
    }

    #[tokio::test]
    async fn test_client_ip_extractor_uses_peer_address() {
        let mut request = Request::builder().body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 10], 40123))));
        let (mut parts, _) = request.into_parts();
        let ClientIp(ip) = ClientIp::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ip, "192.0.2.10");
    }
}
