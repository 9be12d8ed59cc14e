//! Room Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::hotel::HotelStatus;

/// Room entity. Immutable once created by an admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Room {
    pub id: i64,
    pub hotel_id: i64,
    pub name: String,
    /// Nightly price
    pub price: Decimal,
    /// Maximum party size
    pub capacity: i32,
    pub description: String,
    pub image_url: Option<String>,
}

/// Data for the reservation page of a single room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomReservationPage {
    pub room: Room,
    pub hotel_name: String,
    /// Closed hotels show the page but refuse bookings
    pub hotel_status: HotelStatus,
    /// Nightly price with thousands separators
    pub price_display: String,
    /// Default check-in
    pub today: NaiveDate,
    /// Default check-out
    pub tomorrow: NaiveDate,
}
