//! Inquiry Model
//!
//! Customer support board. Anyone may read, only the writer or an admin may
//! edit or delete.

use serde::{Deserialize, Serialize};

/// Inquiry entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Inquiry {
    pub id: i64,
    pub account_id: i64,
    /// Writer's user id, denormalized for listing and search
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Inquiry search category (`cat` query parameter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquirySearch {
    Username,
    Title,
}

impl InquirySearch {
    /// `username` or `title`; any other value (including empty) means no search
    pub fn from_param(cat: &str) -> Option<Self> {
        match cat.trim() {
            "username" => Some(Self::Username),
            "title" => Some(Self::Title),
            _ => None,
        }
    }
}
