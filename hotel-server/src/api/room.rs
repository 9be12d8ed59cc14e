//! Room reservation page

use axum::Json;
use axum::extract::State;
use chrono::Days;
use shared::error::{AppError, ErrorCode};
use shared::models::RoomReservationPage;
use shared::util::{format_price, today};

use crate::db;
use crate::state::AppState;

use super::extract::PathParam;
use super::ApiResult;

/// GET /api/rooms/{id}
///
/// Room with its hotel name, a display price and default stay dates
/// (today and tomorrow).
pub async fn reservation_page(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<RoomReservationPage> {
    let found = db::rooms::find_with_hotel(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RoomNotFound))?;

    let today = today();
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);

    Ok(Json(RoomReservationPage {
        hotel_status: found.hotel_status(),
        price_display: format_price(found.room.price),
        room: found.room,
        hotel_name: found.hotel_name,
        today,
        tomorrow,
    }))
}
