use shared::models::Review;
use sqlx::PgPool;

pub async fn create(
    pool: &PgPool,
    hotel_id: i64,
    account_id: i64,
    user_id: &str,
    score: i16,
    content: &str,
    now: i64,
) -> Result<Review, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO reviews (hotel_id, account_id, user_id, score, content, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, hotel_id, user_id, score, content, created_at",
    )
    .bind(hotel_id)
    .bind(account_id)
    .bind(user_id)
    .bind(score)
    .bind(content)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Reviews of a hotel, newest first
pub async fn list_by_hotel(pool: &PgPool, hotel_id: i64, limit: i64) -> Result<Vec<Review>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, hotel_id, user_id, score, content, created_at FROM reviews
         WHERE hotel_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2",
    )
    .bind(hotel_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}
