//! Booking Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Booking status. Bookings are never deleted, only cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Active,
    Cancelled,
}

impl BookingStatus {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }

    /// Only active bookings hold a room
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A reservation of one room for `[checkin, checkout)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub room_id: i64,
    /// Reserving account's user id
    pub user_id: String,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    pub status: BookingStatus,
    /// Total price for the stay
    pub price: Decimal,
    pub party_size: i32,
    pub created_at: i64,
}

/// Booking joined with the names needed for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDetail {
    pub booking: Booking,
    pub room_name: String,
    pub hotel_name: String,
}

/// Display projection of a booking in the account history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub booking_id: i64,
    pub room_id: i64,
    pub room_name: String,
    pub hotel_name: String,
    pub user_id: String,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    pub status: BookingStatus,
    pub price: Decimal,
    pub party_size: i32,
}

impl From<BookingDetail> for BookingSummary {
    fn from(detail: BookingDetail) -> Self {
        let BookingDetail {
            booking,
            room_name,
            hotel_name,
        } = detail;
        Self {
            booking_id: booking.id,
            room_id: booking.room_id,
            room_name,
            hotel_name,
            user_id: booking.user_id,
            checkin: booking.checkin,
            checkout: booking.checkout,
            status: booking.status,
            price: booking.price,
            party_size: booking.party_size,
        }
    }
}
