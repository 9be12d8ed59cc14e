//! Authentication middleware: session tokens, admin gate, rate limiting

pub mod rate_limit;
pub mod session_auth;

pub use rate_limit::ClientIp;
pub use session_auth::{CurrentAccount, require_admin, session_auth_middleware};
