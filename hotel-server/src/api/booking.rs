//! Availability check, booking and cancellation

use axum::extract::State;
use axum::{Extension, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::Booking;
use shared::{StayRange, is_available};

use crate::auth::{ClientIp, CurrentAccount};
use crate::db;
use crate::db::bookings::NewBooking;
use crate::state::AppState;

use super::extract::{JsonBody, PathParam};
use super::{ApiResult, record_audit};

/// POST /api/bookings/date-check
///
/// Dates are `YYYY-MM-DD`; blank or missing dates are rejected.
#[derive(Debug, Deserialize)]
pub struct DateCheckRequest {
    pub room_id: i64,
    pub checkin: Option<String>,
    pub checkout: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DateCheckResponse {
    pub room_id: i64,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    pub nights: i64,
    pub available: bool,
}

pub async fn date_check(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<DateCheckRequest>,
) -> ApiResult<DateCheckResponse> {
    let stay = StayRange::parse(req.checkin.as_deref(), req.checkout.as_deref())?;
    let found = db::rooms::find_with_hotel(&state.pool, req.room_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RoomNotFound))?;
    if !found.hotel_status().is_open() {
        return Err(AppError::new(ErrorCode::HotelClosed)
            .with_detail("hotel_id", found.room.hotel_id)
            .into());
    }

    let existing = db::bookings::find_active_by_room(&state.pool, req.room_id).await?;
    let available = is_available(req.room_id, stay.checkin(), stay.checkout(), &existing)?;

    Ok(Json(DateCheckResponse {
        room_id: req.room_id,
        checkin: stay.checkin(),
        checkout: stay.checkout(),
        nights: stay.nights(),
        available,
    }))
}

/// POST /api/bookings
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub room_id: i64,
    pub checkin: Option<String>,
    pub checkout: Option<String>,
    pub party_size: i32,
}

pub async fn create_booking(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    ClientIp(ip): ClientIp,
    JsonBody(req): JsonBody<CreateBookingRequest>,
) -> ApiResult<Booking> {
    let stay = StayRange::parse(req.checkin.as_deref(), req.checkout.as_deref())?;
    if req.party_size < 1 {
        return Err(AppError::new(ErrorCode::ValueOutOfRange)
            .with_detail("field", "party_size")
            .into());
    }

    let new = NewBooking {
        room_id: req.room_id,
        account_id: account.account_id,
        user_id: &account.user_id,
        stay,
        party_size: req.party_size,
    };
    let booking = db::bookings::create_checked(&state.pool, &new, shared::util::now_millis()).await?;

    tracing::info!(
        booking_id = booking.id,
        room_id = booking.room_id,
        user_id = %account.user_id,
        "Booking created"
    );
    record_audit(
        &state,
        account.account_id,
        "booking_create",
        Some(serde_json::json!({ "booking_id": booking.id, "room_id": booking.room_id })),
        Some(&ip),
    )
    .await;

    Ok(Json(booking))
}

/// Only the booker or an admin may cancel
fn can_cancel(account: &CurrentAccount, owner_id: i64) -> bool {
    account.account_id == owner_id || account.is_admin()
}

/// POST /api/bookings/{id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    ClientIp(ip): ClientIp,
    PathParam(id): PathParam<i64>,
) -> ApiResult<Booking> {
    let found = db::bookings::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;

    if !can_cancel(&account, found.account_id) {
        tracing::warn!(
            target: "security",
            event = "cancel_denied",
            booking_id = id,
            user_id = %account.user_id,
            "Cancel attempt on another account's booking"
        );
        return Err(AppError::permission_denied("Not your booking").into());
    }

    if !db::bookings::cancel(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::BookingAlreadyCancelled).into());
    }

    record_audit(
        &state,
        account.account_id,
        "booking_cancel",
        Some(serde_json::json!({ "booking_id": id })),
        Some(&ip),
    )
    .await;

    let mut booking = found.booking.into_booking();
    booking.status = shared::models::BookingStatus::Cancelled;
    Ok(Json(booking))
}
