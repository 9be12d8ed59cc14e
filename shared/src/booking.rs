//! Booking availability and history
//!
//! Pure functions over bookings supplied by the persistence layer:
//!
//! - [`is_available`]: does a requested stay collide with an active booking?
//! - [`partition`]: split an account's bookings into upcoming and past stays.
//!
//! Stays are half-open `[checkin, checkout)` ranges, so a guest checking out
//! on the 5th never collides with one checking in on the 5th.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{AppError, ErrorCode};
use crate::models::{Booking, BookingDetail, BookingSummary};

/// Date format accepted from request parameters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rejected stay range. Never corrected silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRangeError {
    #[error("check-in date is missing")]
    MissingCheckin,

    #[error("check-out date is missing")]
    MissingCheckout,

    #[error("invalid date: {0}")]
    Unparseable(String),

    #[error("check-in {checkin} must be before check-out {checkout}")]
    NotOrdered {
        checkin: NaiveDate,
        checkout: NaiveDate,
    },
}

impl From<InvalidRangeError> for AppError {
    fn from(err: InvalidRangeError) -> Self {
        AppError::with_message(ErrorCode::InvalidDateRange, err.to_string())
    }
}

/// A validated `[checkin, checkout)` range with `checkin < checkout`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRange {
    checkin: NaiveDate,
    checkout: NaiveDate,
}

impl StayRange {
    pub fn new(checkin: NaiveDate, checkout: NaiveDate) -> Result<Self, InvalidRangeError> {
        if checkin >= checkout {
            return Err(InvalidRangeError::NotOrdered { checkin, checkout });
        }
        Ok(Self { checkin, checkout })
    }

    /// Build from optional dates, as bound from a request body
    pub fn from_options(
        checkin: Option<NaiveDate>,
        checkout: Option<NaiveDate>,
    ) -> Result<Self, InvalidRangeError> {
        let checkin = checkin.ok_or(InvalidRangeError::MissingCheckin)?;
        let checkout = checkout.ok_or(InvalidRangeError::MissingCheckout)?;
        Self::new(checkin, checkout)
    }

    /// Parse `YYYY-MM-DD` strings. Blank strings count as missing.
    pub fn parse(checkin: Option<&str>, checkout: Option<&str>) -> Result<Self, InvalidRangeError> {
        Self::from_options(parse_date(checkin)?, parse_date(checkout)?)
    }

    pub fn checkin(&self) -> NaiveDate {
        self.checkin
    }

    pub fn checkout(&self) -> NaiveDate {
        self.checkout
    }

    /// Number of nights, always >= 1
    pub fn nights(&self) -> i64 {
        (self.checkout - self.checkin).num_days()
    }

    /// Total price for the stay at the given nightly rate
    pub fn price_for(&self, nightly: Decimal) -> Decimal {
        nightly * Decimal::from(self.nights())
    }

    /// `[a1,a2)` and `[b1,b2)` overlap iff `a1 < b2 && b1 < a2`
    pub fn overlaps(&self, checkin: NaiveDate, checkout: NaiveDate) -> bool {
        self.checkin < checkout && checkin < self.checkout
    }

    /// Does this stay collide with `booking` on `room_id`?
    ///
    /// Cancelled bookings and bookings of other rooms never collide.
    pub fn conflicts_with(&self, room_id: i64, booking: &Booking) -> bool {
        booking.room_id == room_id
            && booking.status.is_active()
            && self.overlaps(booking.checkin, booking.checkout)
    }
}

fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>, InvalidRangeError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(|_| InvalidRangeError::Unparseable(s.to_string())),
    }
}

/// Is `room_id` free for `[checkin, checkout)` given its existing bookings?
///
/// `existing` may contain cancelled bookings or bookings of other rooms; both
/// are ignored. An empty slice means available.
pub fn is_available(
    room_id: i64,
    checkin: NaiveDate,
    checkout: NaiveDate,
    existing: &[Booking],
) -> Result<bool, InvalidRangeError> {
    let stay = StayRange::new(checkin, checkout)?;
    Ok(!existing.iter().any(|b| stay.conflicts_with(room_id, b)))
}

/// An account's bookings split around a reference date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingHistory {
    /// Check-in strictly after today
    pub upcoming: Vec<BookingSummary>,
    /// Check-in today or earlier, including stays in progress
    pub past: Vec<BookingSummary>,
}

impl BookingHistory {
    pub fn len(&self) -> usize {
        self.upcoming.len() + self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.past.is_empty()
    }
}

/// Stable, lossless split of `bookings` into upcoming and past stays.
///
/// Classification compares the check-in date with `today`, so a stay that
/// started today lands in `past`.
pub fn partition<I>(bookings: I, today: NaiveDate) -> BookingHistory
where
    I: IntoIterator<Item = BookingDetail>,
{
    let mut history = BookingHistory::default();
    for detail in bookings {
        if detail.booking.checkin > today {
            history.upcoming.push(detail.into());
        } else {
            history.past.push(detail.into());
        }
    }
    history
}
