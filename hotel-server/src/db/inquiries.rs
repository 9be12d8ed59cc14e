use shared::models::{Inquiry, InquirySearch};
use sqlx::PgPool;

use super::like_pattern;

pub async fn create(
    pool: &PgPool,
    account_id: i64,
    user_id: &str,
    title: &str,
    content: &str,
    now: i64,
) -> Result<Inquiry, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO inquiries (account_id, user_id, title, content, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $5)
         RETURNING *",
    )
    .bind(account_id)
    .bind(user_id)
    .bind(title)
    .bind(content)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Inquiry>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM inquiries WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update(pool: &PgPool, id: i64, title: &str, content: &str, now: i64) -> Result<Inquiry, sqlx::Error> {
    sqlx::query_as(
        "UPDATE inquiries SET title = $1, content = $2, updated_at = $3 WHERE id = $4 RETURNING *",
    )
    .bind(title)
    .bind(content)
    .bind(now)
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM inquiries WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// A search category together with its keyword; no filter lists everything
pub type InquiryFilter<'a> = Option<(InquirySearch, &'a str)>;

fn filter_column(search: InquirySearch) -> &'static str {
    match search {
        InquirySearch::Username => "user_id",
        InquirySearch::Title => "title",
    }
}

/// Column to match and the escaped pattern, or `("title", None)` to match all rows
fn filter_parts(filter: InquiryFilter<'_>) -> (&'static str, Option<String>) {
    match filter {
        Some((search, keyword)) => (filter_column(search), Some(like_pattern(keyword))),
        None => ("title", None),
    }
}

/// Inquiries newest first, optionally filtered by writer or title substring
pub async fn search(
    pool: &PgPool,
    filter: InquiryFilter<'_>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Inquiry>, sqlx::Error> {
    let (col, pattern) = filter_parts(filter);
    let sql = format!(
        "SELECT * FROM inquiries
         WHERE ($1::TEXT IS NULL OR {col} ILIKE $1 ESCAPE '\\')
         ORDER BY created_at DESC, id DESC
         LIMIT $2 OFFSET $3"
    );
    sqlx::query_as(&sql)
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
}

pub async fn count(pool: &PgPool, filter: InquiryFilter<'_>) -> Result<i64, sqlx::Error> {
    let (col, pattern) = filter_parts(filter);
    let sql = format!(
        "SELECT COUNT(*) FROM inquiries WHERE ($1::TEXT IS NULL OR {col} ILIKE $1 ESCAPE '\\')"
    );
    sqlx::query_scalar(&sql).bind(pattern).fetch_one(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_parts() {
        assert_eq!(filter_parts(None), ("title", None));
        assert_eq!(
            filter_parts(Some((InquirySearch::Username, "guest"))),
            ("user_id", Some("%guest%".to_string()))
        );
        assert_eq!(
            filter_parts(Some((InquirySearch::Title, "50%"))),
            ("title", Some("%50\\%%".to_string()))
        );
    }
}
