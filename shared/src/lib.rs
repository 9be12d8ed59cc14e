//! Shared types for the hotel reservation service
//!
//! Domain models, the unified error system, booking availability and
//! history logic, and pagination used by hotel-server and its clients.

pub mod booking;
pub mod error;
pub mod models;
pub mod paging;
pub mod request;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use booking::{BookingHistory, InvalidRangeError, StayRange, is_available, partition};
pub use paging::{Page, PageWindow, window_for};
