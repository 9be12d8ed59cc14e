//! Account Model

use serde::{Deserialize, Serialize};

/// Account role, checked once per request by the admin gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Account lifecycle status. Resigning moves an account to `Disabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Disabled,
}

impl AccountStatus {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Disabled => "disabled",
        }
    }

    /// Can this account log in?
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Account profile (without password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: Role,
    pub status: AccountStatus,
    pub created_at: i64,
}

/// Issued on successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: i64,
    pub account: Account,
}

/// Result of the duplicate user id check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdAvailability {
    pub user_id: String,
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_db_round_trip() {
        for role in [Role::Admin, Role::User] {
            assert_eq!(Role::from_db(role.as_db()), Some(role));
        }
        assert_eq!(Role::from_db("ROLE_ADMIN"), None);
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
    }

    #[test]
    fn test_only_active_accounts_can_login() {
        assert!(AccountStatus::Active.can_login());
        assert!(!AccountStatus::Disabled.can_login());
        assert_eq!(AccountStatus::from_db("disabled"), Some(AccountStatus::Disabled));
        assert_eq!(AccountStatus::from_db("deleted"), None);
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        let status: AccountStatus = serde_json::from_str("\"ACTIVE\"").unwrap();
        assert_eq!(status, AccountStatus::Active);
    }
}
