//! Review Model

use serde::{Deserialize, Serialize};

pub const MIN_REVIEW_SCORE: i16 = 1;
pub const MAX_REVIEW_SCORE: i16 = 5;

/// Hotel review left by an account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Review {
    pub id: i64,
    pub hotel_id: i64,
    pub user_id: String,
    pub score: i16,
    pub content: String,
    pub created_at: i64,
}
