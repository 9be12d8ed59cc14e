//! Data models
//!
//! Shared between hotel-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`;
//! models carrying status enums are mapped from row structs in the server.

pub mod account;
pub mod booking;
pub mod hotel;
pub mod inquiry;
pub mod review;
pub mod room;

// Re-exports
pub use account::*;
pub use booking::*;
pub use hotel::*;
pub use inquiry::*;
pub use review::*;
pub use room::*;
