//! Unified error codes for the hotel reservation service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Account errors
//! - 4xxx: Booking errors
//! - 5xxx: Hotel / room errors
//! - 6xxx: Inquiry errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can switch on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (user id / password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Session was revoked or has expired
    SessionExpired = 1005,
    /// Account is disabled (resigned)
    AccountDisabled = 1007,
    /// Too many login/signup attempts
    TooManyRequests = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Account ====================
    /// Account not found
    AccountNotFound = 3001,
    /// User id is already registered
    UserIdTaken = 3002,
    /// Password too short
    PasswordTooShort = 3003,

    // ==================== 4xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Check-in/check-out range is missing or not ordered
    InvalidDateRange = 4002,
    /// Room already booked for part of the requested range
    RoomUnavailable = 4003,
    /// Booking has already been cancelled
    BookingAlreadyCancelled = 4004,
    /// Party size exceeds room capacity
    PartySizeExceeded = 4005,
    /// Concurrent booking detected, client may retry
    BookingConflict = 4006,

    // ==================== 5xxx: Hotel ====================
    /// Hotel not found
    HotelNotFound = 5001,
    /// Room not found
    RoomNotFound = 5002,
    /// Hotel is not accepting bookings
    HotelClosed = 5003,
    /// Review score out of range
    InvalidReviewScore = 5004,

    // ==================== 6xxx: Inquiry ====================
    /// Inquiry not found
    InquiryNotFound = 6001,
    /// Inquiry belongs to another account
    InquiryNotOwned = 6002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Operation timed out
    TimeoutError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid user id or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::SessionExpired => "Session has expired",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::TooManyRequests => "Too many requests, try again later",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Account
            ErrorCode::AccountNotFound => "Account not found",
            ErrorCode::UserIdTaken => "User id is already in use",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",

            // Booking
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::InvalidDateRange => "Check-in must be before check-out",
            ErrorCode::RoomUnavailable => "Room is already booked for the selected dates",
            ErrorCode::BookingAlreadyCancelled => "Booking has already been cancelled",
            ErrorCode::PartySizeExceeded => "Party size exceeds room capacity",
            ErrorCode::BookingConflict => "Another booking was made at the same time, please retry",

            // Hotel
            ErrorCode::HotelNotFound => "Hotel not found",
            ErrorCode::RoomNotFound => "Room not found",
            ErrorCode::HotelClosed => "Hotel is not accepting bookings",
            ErrorCode::InvalidReviewScore => "Review score must be between 1 and 5",

            // Inquiry
            ErrorCode::InquiryNotFound => "Inquiry not found",
            ErrorCode::InquiryNotOwned => "Inquiry belongs to another account",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::SessionExpired),
            1007 => Ok(ErrorCode::AccountDisabled),
            1008 => Ok(ErrorCode::TooManyRequests),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            // Account
            3001 => Ok(ErrorCode::AccountNotFound),
            3002 => Ok(ErrorCode::UserIdTaken),
            3003 => Ok(ErrorCode::PasswordTooShort),

            // Booking
            4001 => Ok(ErrorCode::BookingNotFound),
            4002 => Ok(ErrorCode::InvalidDateRange),
            4003 => Ok(ErrorCode::RoomUnavailable),
            4004 => Ok(ErrorCode::BookingAlreadyCancelled),
            4005 => Ok(ErrorCode::PartySizeExceeded),
            4006 => Ok(ErrorCode::BookingConflict),

            // Hotel
            5001 => Ok(ErrorCode::HotelNotFound),
            5002 => Ok(ErrorCode::RoomNotFound),
            5003 => Ok(ErrorCode::HotelClosed),
            5004 => Ok(ErrorCode::InvalidReviewScore),

            // Inquiry
            6001 => Ok(ErrorCode::InquiryNotFound),
            6002 => Ok(ErrorCode::InquiryNotOwned),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9004 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::AdminRequired.code(), 2003);
        assert_eq!(ErrorCode::UserIdTaken.code(), 3002);
        assert_eq!(ErrorCode::InvalidDateRange.code(), 4002);
        assert_eq!(ErrorCode::RoomUnavailable.code(), 4003);
        assert_eq!(ErrorCode::RoomNotFound.code(), 5002);
        assert_eq!(ErrorCode::InquiryNotFound.code(), 6001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_round_trips_every_variant() {
        let all = [
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::InvalidRequest,
            ErrorCode::InvalidFormat,
            ErrorCode::RequiredField,
            ErrorCode::ValueOutOfRange,
            ErrorCode::NotAuthenticated,
            ErrorCode::InvalidCredentials,
            ErrorCode::TokenExpired,
            ErrorCode::TokenInvalid,
            ErrorCode::SessionExpired,
            ErrorCode::AccountDisabled,
            ErrorCode::TooManyRequests,
            ErrorCode::PermissionDenied,
            ErrorCode::AdminRequired,
            ErrorCode::AccountNotFound,
            ErrorCode::UserIdTaken,
            ErrorCode::PasswordTooShort,
            ErrorCode::BookingNotFound,
            ErrorCode::InvalidDateRange,
            ErrorCode::RoomUnavailable,
            ErrorCode::BookingAlreadyCancelled,
            ErrorCode::PartySizeExceeded,
            ErrorCode::BookingConflict,
            ErrorCode::HotelNotFound,
            ErrorCode::RoomNotFound,
            ErrorCode::HotelClosed,
            ErrorCode::InvalidReviewScore,
            ErrorCode::InquiryNotFound,
            ErrorCode::InquiryNotOwned,
            ErrorCode::InternalError,
            ErrorCode::TimeoutError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_unknown_value_rejected() {
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
        assert_eq!(ErrorCode::try_from(9002), Err(InvalidErrorCode(9002)));
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::RoomUnavailable).unwrap();
        assert_eq!(json, "4003");
        let code: ErrorCode = serde_json::from_str("5001").unwrap();
        assert_eq!(code, ErrorCode::HotelNotFound);
        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::BookingNotFound.to_string(), "4001");
    }
}
