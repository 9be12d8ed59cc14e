use rust_decimal::Decimal;
use shared::models::{HotelStatus, Room};
use sqlx::PgPool;

/// Room plus the name and status of its hotel
#[derive(Debug, sqlx::FromRow)]
pub struct RoomWithHotel {
    #[sqlx(flatten)]
    pub room: Room,
    pub hotel_name: String,
    hotel_status: String,
}

impl RoomWithHotel {
    pub fn hotel_status(&self) -> HotelStatus {
        super::hotels::parse_status(self.room.hotel_id, &self.hotel_status)
    }
}

pub struct NewRoom<'a> {
    pub hotel_id: i64,
    pub name: &'a str,
    pub price: Decimal,
    pub capacity: i32,
    pub description: &'a str,
    pub image_url: Option<&'a str>,
}

pub async fn create(pool: &PgPool, room: &NewRoom<'_>) -> Result<Room, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO rooms (hotel_id, name, price, capacity, description, image_url)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(room.hotel_id)
    .bind(room.name)
    .bind(room.price)
    .bind(room.capacity)
    .bind(room.description)
    .bind(room.image_url)
    .fetch_one(pool)
    .await
}

pub async fn find_with_hotel(pool: &PgPool, id: i64) -> Result<Option<RoomWithHotel>, sqlx::Error> {
    sqlx::query_as(
        "SELECT r.*, h.name AS hotel_name, h.status AS hotel_status
         FROM rooms r JOIN hotels h ON h.id = r.hotel_id
         WHERE r.id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_by_hotel(pool: &PgPool, hotel_id: i64) -> Result<Vec<Room>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM rooms WHERE hotel_id = $1 ORDER BY price, id")
        .bind(hotel_id)
        .fetch_all(pool)
        .await
}
