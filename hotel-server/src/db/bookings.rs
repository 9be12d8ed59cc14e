//! Booking storage
//!
//! Inserts go through [`create_checked`], which re-runs the availability
//! check inside a SERIALIZABLE transaction holding row locks on the room and
//! its active bookings. No database constraint prevents overlaps on its own.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{Booking, BookingDetail, BookingStatus, HotelStatus};
use shared::{StayRange, is_available};
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{ServiceError, ServiceResult};

const BOOKING_COLUMNS: &str =
    "b.id, b.room_id, b.user_id, b.checkin, b.checkout, b.status, b.price, b.party_size, b.created_at";

#[derive(Debug, sqlx::FromRow)]
pub struct BookingRow {
    pub id: i64,
    pub room_id: i64,
    pub user_id: String,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    pub status: String,
    pub price: Decimal,
    pub party_size: i32,
    pub created_at: i64,
}

impl BookingRow {
    pub fn into_booking(self) -> Booking {
        // An unrecognised status still holds the room
        let status = BookingStatus::from_db(&self.status).unwrap_or_else(|| {
            tracing::warn!(booking_id = self.id, status = %self.status, "Unknown booking status");
            BookingStatus::Active
        });
        Booking {
            id: self.id,
            room_id: self.room_id,
            user_id: self.user_id,
            checkin: self.checkin,
            checkout: self.checkout,
            status,
            price: self.price,
            party_size: self.party_size,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BookingDetailRow {
    #[sqlx(flatten)]
    booking: BookingRow,
    room_name: String,
    hotel_name: String,
}

/// Booking with its owning account, for ownership checks
#[derive(Debug, sqlx::FromRow)]
pub struct OwnedBookingRow {
    #[sqlx(flatten)]
    pub booking: BookingRow,
    pub account_id: i64,
}

/// All active bookings for a room
pub async fn find_active_by_room(pool: &PgPool, room_id: i64) -> Result<Vec<Booking>, sqlx::Error> {
    let rows: Vec<BookingRow> = sqlx::query_as(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings b WHERE b.room_id = $1 AND b.status = 'active'"
    ))
    .bind(room_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(BookingRow::into_booking).collect())
}

/// All bookings of an account with room and hotel names, newest first
pub async fn find_by_account(pool: &PgPool, account_id: i64) -> Result<Vec<BookingDetail>, sqlx::Error> {
    let rows: Vec<BookingDetailRow> = sqlx::query_as(&format!(
        "SELECT {BOOKING_COLUMNS}, r.name AS room_name, h.name AS hotel_name
         FROM bookings b
         JOIN rooms r ON r.id = b.room_id
         JOIN hotels h ON h.id = r.hotel_id
         WHERE b.account_id = $1
         ORDER BY b.created_at DESC, b.id DESC"
    ))
    .bind(account_id)
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|row| BookingDetail {
            booking: row.booking.into_booking(),
            room_name: row.room_name,
            hotel_name: row.hotel_name,
        })
        .collect())
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<OwnedBookingRow>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {BOOKING_COLUMNS}, b.account_id FROM bookings b WHERE b.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Cancel an active booking. Returns `false` if it was not active.
pub async fn cancel(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE bookings SET status = 'cancelled' WHERE id = $1 AND status = 'active'")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub struct NewBooking<'a> {
    pub room_id: i64,
    pub account_id: i64,
    pub user_id: &'a str,
    pub stay: StayRange,
    pub party_size: i32,
}

/// Check availability and insert in one SERIALIZABLE transaction.
///
/// The room row and its active bookings are locked with `FOR UPDATE` before
/// the check. A lost serialization race surfaces as `BookingConflict`.
pub async fn create_checked(pool: &PgPool, new: &NewBooking<'_>, now: i64) -> ServiceResult<Booking> {
    let mut tx = pool.begin().await?;

    let result = async {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;
        let booking = insert_if_available(&mut tx, new, now).await?;
        Ok::<_, ServiceError>(booking)
    }
    .await;

    let booking = match result {
        Ok(booking) => booking,
        Err(e) => {
            // Dropping `tx` rolls back
            return Err(map_conflict(e));
        }
    };

    tx.commit().await.map_err(|e| map_conflict(e.into()))?;
    Ok(booking)
}

/// A room takes the party only while its hotel is open and the party fits
fn check_bookable(hotel_status: HotelStatus, capacity: i32, party_size: i32) -> Result<(), AppError> {
    if !hotel_status.is_open() {
        return Err(AppError::new(ErrorCode::HotelClosed));
    }
    if party_size > capacity {
        return Err(AppError::new(ErrorCode::PartySizeExceeded).with_detail("capacity", capacity));
    }
    Ok(())
}

async fn insert_if_available(
    tx: &mut Transaction<'_, Postgres>,
    new: &NewBooking<'_>,
    now: i64,
) -> ServiceResult<Booking> {
    // The hotel row is share-locked so a concurrent close waits for this booking
    let room: Option<(Decimal, i32, i64, String)> = sqlx::query_as(
        "SELECT r.price, r.capacity, h.id, h.status
         FROM rooms r JOIN hotels h ON h.id = r.hotel_id
         WHERE r.id = $1
         FOR UPDATE OF r FOR SHARE OF h",
    )
    .bind(new.room_id)
    .fetch_optional(&mut **tx)
    .await?;
    let (nightly, capacity, hotel_id, status) =
        room.ok_or_else(|| AppError::new(ErrorCode::RoomNotFound))?;

    check_bookable(super::hotels::parse_status(hotel_id, &status), capacity, new.party_size)
        .map_err(|e| e.with_detail("hotel_id", hotel_id))?;

    let existing: Vec<BookingRow> = sqlx::query_as(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings b
         WHERE b.room_id = $1 AND b.status = 'active' FOR UPDATE"
    ))
    .bind(new.room_id)
    .fetch_all(&mut **tx)
    .await?;
    let existing: Vec<Booking> = existing.into_iter().map(BookingRow::into_booking).collect();

    let stay = new.stay;
    if !is_available(new.room_id, stay.checkin(), stay.checkout(), &existing)? {
        return Err(AppError::room_unavailable(new.room_id).into());
    }

    let row: BookingRow = sqlx::query_as(
        "INSERT INTO bookings (room_id, account_id, user_id, checkin, checkout, status, price, party_size, created_at)
         VALUES ($1, $2, $3, $4, $5, 'active', $6, $7, $8)
         RETURNING id, room_id, user_id, checkin, checkout, status, price, party_size, created_at",
    )
    .bind(new.room_id)
    .bind(new.account_id)
    .bind(new.user_id)
    .bind(stay.checkin())
    .bind(stay.checkout())
    .bind(stay.price_for(nightly))
    .bind(new.party_size)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(row.into_booking())
}

fn map_conflict(e: ServiceError) -> ServiceError {
    match e {
        ServiceError::Db(err) => match err.downcast::<sqlx::Error>() {
            Ok(sqlx_err) if super::is_serialization_failure(&sqlx_err) => {
                tracing::info!("Booking transaction lost a serialization race");
                AppError::new(ErrorCode::BookingConflict).into()
            }
            Ok(sqlx_err) => ServiceError::Db(sqlx_err),
            Err(other) => ServiceError::Db(other),
        },
        app => app,
    }
}
