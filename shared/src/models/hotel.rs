//! Hotel Model

use serde::{Deserialize, Serialize};

use super::review::Review;
use super::room::Room;

/// Whether a hotel currently takes reservations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HotelStatus {
    #[default]
    Open,
    Closed,
}

impl HotelStatus {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Hotel entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub description: String,
    pub image_url: Option<String>,
    pub status: HotelStatus,
    pub created_at: i64,
}

/// Hotel list entry with its review aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelSummary {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub description: String,
    pub image_url: Option<String>,
    pub status: HotelStatus,
    /// Average review score, 0 when the hotel has no reviews
    pub avg_score: f64,
    pub review_count: i64,
    /// e.g. `★★★☆☆`
    #[serde(default)]
    pub stars: String,
}

/// Hotel list search field (`num` query parameter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HotelSearchField {
    #[default]
    Name,
    Address,
}

impl HotelSearchField {
    /// `0` searches names, `1` searches addresses; anything else falls back to names
    pub fn from_num(num: Option<u8>) -> Self {
        match num {
            Some(1) => Self::Address,
            _ => Self::Name,
        }
    }
}

/// Hotel detail page: hotel, its rooms and reviews
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelDetail {
    pub hotel: Hotel,
    /// Copied from `hotel` so clients can grey out the booking buttons
    pub status: HotelStatus,
    pub avg_score: f64,
    pub stars: String,
    pub rooms: Vec<Room>,
    pub reviews: Vec<Review>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_field_from_num() {
        assert_eq!(HotelSearchField::from_num(None), HotelSearchField::Name);
        assert_eq!(HotelSearchField::from_num(Some(0)), HotelSearchField::Name);
        assert_eq!(HotelSearchField::from_num(Some(1)), HotelSearchField::Address);
        assert_eq!(HotelSearchField::from_num(Some(9)), HotelSearchField::Name);
    }

    #[test]
    fn test_status_db_mapping() {
        assert_eq!(HotelStatus::from_db("open"), Some(HotelStatus::Open));
        assert_eq!(HotelStatus::from_db("closed"), Some(HotelStatus::Closed));
        assert_eq!(HotelStatus::from_db("OPEN"), None);
        assert_eq!(HotelStatus::from_db(""), None);
        for status in [HotelStatus::Open, HotelStatus::Closed] {
            assert_eq!(HotelStatus::from_db(status.as_db()), Some(status));
        }
        assert!(HotelStatus::Open.is_open());
        assert!(!HotelStatus::Closed.is_open());
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&HotelStatus::Closed).unwrap();
        assert_eq!(json, "\"CLOSED\"");
    }
}
