//! Database access layer
//!
//! Plain async functions per table, each taking `&PgPool` (or a transaction).

pub mod accounts;
pub mod audit;
pub mod bookings;
pub mod hotels;
pub mod inquiries;
pub mod reviews;
pub mod rooms;
pub mod sessions;

/// Did this error come from a UNIQUE constraint?
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

/// SQLSTATE 40001: a SERIALIZABLE transaction lost a race and may be retried
pub fn is_serialization_failure(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "40001")
}

/// `%keyword%` for `ILIKE $n ESCAPE '\'`, with wildcards inside the keyword taken literally
pub fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Seoul"), "%Seoul%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\x"), "%c:\\\\x%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn test_non_database_errors_are_not_classified() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_serialization_failure(&sqlx::Error::PoolTimedOut));
    }
}
