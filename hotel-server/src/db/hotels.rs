use shared::models::{Hotel, HotelSearchField, HotelStatus, HotelSummary};
use shared::util::star_string;
use sqlx::PgPool;

use super::like_pattern;

const HOTEL_COLUMNS: &str =
    "h.id, h.name, h.phone, h.address, h.description, h.image_url, h.status, h.created_at";

/// Unknown status strings never accept bookings
pub(super) fn parse_status(hotel_id: i64, raw: &str) -> HotelStatus {
    HotelStatus::from_db(raw).unwrap_or_else(|| {
        tracing::warn!(hotel_id, status = raw, "Unknown hotel status, treating as closed");
        HotelStatus::Closed
    })
}

#[derive(Debug, sqlx::FromRow)]
pub struct HotelRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub description: String,
    pub image_url: Option<String>,
    pub status: String,
    pub created_at: i64,
}

impl HotelRow {
    pub fn into_hotel(self) -> Hotel {
        let status = parse_status(self.id, &self.status);
        Hotel {
            id: self.id,
            name: self.name,
            phone: self.phone,
            address: self.address,
            description: self.description,
            image_url: self.image_url,
            status,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct HotelSummaryRow {
    id: i64,
    name: String,
    phone: String,
    address: String,
    description: String,
    image_url: Option<String>,
    status: String,
    avg_score: f64,
    review_count: i64,
}

impl HotelSummaryRow {
    fn into_summary(self) -> HotelSummary {
        let status = parse_status(self.id, &self.status);
        HotelSummary {
            id: self.id,
            name: self.name,
            phone: self.phone,
            address: self.address,
            description: self.description,
            image_url: self.image_url,
            status,
            stars: star_string(self.avg_score),
            avg_score: self.avg_score,
            review_count: self.review_count,
        }
    }
}

pub struct NewHotel<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub description: &'a str,
    pub image_url: Option<&'a str>,
    pub status: HotelStatus,
}

pub async fn create(pool: &PgPool, hotel: &NewHotel<'_>, now: i64) -> Result<Hotel, sqlx::Error> {
    let row: HotelRow = sqlx::query_as(
        "INSERT INTO hotels (name, phone, address, description, image_url, status, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id, name, phone, address, description, image_url, status, created_at",
    )
    .bind(hotel.name)
    .bind(hotel.phone)
    .bind(hotel.address)
    .bind(hotel.description)
    .bind(hotel.image_url)
    .bind(hotel.status.as_db())
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row.into_hotel())
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Hotel>, sqlx::Error> {
    let row: Option<HotelRow> =
        sqlx::query_as(&format!("SELECT {HOTEL_COLUMNS} FROM hotels h WHERE h.id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(HotelRow::into_hotel))
}

/// Returns false when the hotel does not exist
pub async fn update_status(pool: &PgPool, id: i64, status: HotelStatus) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE hotels SET status = $1 WHERE id = $2")
        .bind(status.as_db())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() == 1)
}

fn search_column(field: HotelSearchField) -> &'static str {
    match field {
        HotelSearchField::Name => "h.name",
        HotelSearchField::Address => "h.address",
    }
}

/// Hotels matching `keyword` (substring, case-insensitive) with review aggregates
pub async fn search(
    pool: &PgPool,
    field: HotelSearchField,
    keyword: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<HotelSummary>, sqlx::Error> {
    let sql = format!(
        "SELECT h.id, h.name, h.phone, h.address, h.description, h.image_url, h.status,
                COALESCE(AVG(r.score), 0)::FLOAT8 AS avg_score,
                COUNT(r.id) AS review_count
         FROM hotels h LEFT JOIN reviews r ON r.hotel_id = h.id
         WHERE ($1::TEXT IS NULL OR {col} ILIKE $1 ESCAPE '\\')
         GROUP BY h.id
         ORDER BY h.id
         LIMIT $2 OFFSET $3",
        col = search_column(field)
    );
    let rows: Vec<HotelSummaryRow> = sqlx::query_as(&sql)
        .bind(keyword.map(like_pattern))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(HotelSummaryRow::into_summary).collect())
}

pub async fn count(
    pool: &PgPool,
    field: HotelSearchField,
    keyword: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let sql = format!(
        "SELECT COUNT(*) FROM hotels h WHERE ($1::TEXT IS NULL OR {col} ILIKE $1 ESCAPE '\\')",
        col = search_column(field)
    );
    sqlx::query_scalar(&sql)
        .bind(keyword.map(like_pattern))
        .fetch_one(pool)
        .await
}

/// `(average score, review count)` for one hotel
pub async fn score(pool: &PgPool, hotel_id: i64) -> Result<(f64, i64), sqlx::Error> {
    sqlx::query_as(
        "SELECT COALESCE(AVG(score), 0)::FLOAT8, COUNT(*) FROM reviews WHERE hotel_id = $1",
    )
    .bind(hotel_id)
    .fetch_one(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_row(status: &str, avg_score: f64) -> HotelSummaryRow {
        HotelSummaryRow {
            id: 4,
            name: "Harbor View".into(),
            phone: String::new(),
            address: "Busan".into(),
            description: String::new(),
            image_url: None,
            status: status.into(),
            avg_score,
            review_count: 3,
        }
    }

    #[test]
    fn test_summary_carries_status_and_stars() {
        let summary = summary_row("open", 3.4).into_summary();
        assert_eq!(summary.status, HotelStatus::Open);
        assert_eq!(summary.stars, star_string(3.4));

        let summary = summary_row("closed", 0.0).into_summary();
        assert_eq!(summary.status, HotelStatus::Closed);
    }

    #[test]
    fn test_unknown_status_is_closed() {
        assert_eq!(parse_status(1, "renovating"), HotelStatus::Closed);
        assert_eq!(summary_row("", 0.0).into_summary().status, HotelStatus::Closed);
    }
}
