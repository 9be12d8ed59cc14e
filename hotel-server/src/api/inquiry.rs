//! Inquiry board

use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Inquiry, InquirySearch};
use shared::paging::{Page, clamp_page, total_pages};
use shared::request::offset;
use validator::Validate;

use crate::auth::CurrentAccount;
use crate::db;
use crate::db::inquiries::InquiryFilter;
use crate::error::ServiceResult;
use crate::state::AppState;
use crate::util::validate;

use super::extract::{JsonBody, PathParam, QueryParams};
use super::{ApiResult, INQUIRY_PAGE_BLOCK, keyword};

/// GET /api/inquiries?cat=&keyword=&page=
#[derive(Debug, Default, Deserialize)]
pub struct InquiryListQuery {
    /// `username` or `title`; anything else lists every inquiry
    pub cat: Option<String>,
    /// Ignored unless `cat` names a search
    pub keyword: Option<String>,
    /// One-based
    pub page: Option<u32>,
}

impl InquiryListQuery {
    pub fn filter(&self) -> InquiryFilter<'_> {
        let search = self.cat.as_deref().and_then(InquirySearch::from_param)?;
        let keyword = keyword(self.keyword.as_deref())?;
        Some((search, keyword))
    }
}

/// Newest first
pub async fn list_inquiries(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<InquiryListQuery>,
) -> ApiResult<Page<Inquiry>> {
    let filter = query.filter();
    let size = state.inquiry_page_size;

    let total_items = db::inquiries::count(&state.pool, filter).await?;
    let requested = query.page.unwrap_or(1).saturating_sub(1);
    let index = clamp_page(requested, total_pages(total_items, size));

    let items = db::inquiries::search(
        &state.pool,
        filter,
        i64::from(size),
        offset(index, size),
    )
    .await?;

    Ok(Json(Page::new(items, index, size, total_items, INQUIRY_PAGE_BLOCK)))
}

/// GET /api/inquiries/{id}
pub async fn read_inquiry(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<Inquiry> {
    let inquiry = db::inquiries::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::InquiryNotFound))?;
    Ok(Json(inquiry))
}

#[derive(Debug, Deserialize, Validate)]
pub struct InquiryRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
}

impl InquiryRequest {
    fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            ..self
        }
    }
}

/// POST /api/inquiries
pub async fn write_inquiry(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    JsonBody(req): JsonBody<InquiryRequest>,
) -> ApiResult<Inquiry> {
    let req = req.trimmed();
    validate(&req)?;
    let inquiry = db::inquiries::create(
        &state.pool,
        account.account_id,
        &account.user_id,
        &req.title,
        &req.content,
        shared::util::now_millis(),
    )
    .await?;
    Ok(Json(inquiry))
}

/// Writer or admin only
async fn load_owned(
    state: &AppState,
    account: &CurrentAccount,
    id: i64,
) -> ServiceResult<Inquiry> {
    let inquiry = db::inquiries::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::InquiryNotFound))?;
    if inquiry.account_id != account.account_id && !account.is_admin() {
        return Err(AppError::new(ErrorCode::InquiryNotOwned).into());
    }
    Ok(inquiry)
}

/// PUT /api/inquiries/{id}
pub async fn edit_inquiry(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<InquiryRequest>,
) -> ApiResult<Inquiry> {
    let req = req.trimmed();
    validate(&req)?;
    load_owned(&state, &account, id).await?;
    let inquiry = db::inquiries::update(
        &state.pool,
        id,
        &req.title,
        &req.content,
        shared::util::now_millis(),
    )
    .await?;
    Ok(Json(inquiry))
}

/// DELETE /api/inquiries/{id}
pub async fn delete_inquiry(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<serde_json::Value> {
    load_owned(&state, &account, id).await?;
    if !db::inquiries::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::InquiryNotFound).into());
    }
    if account.is_admin() {
        tracing::info!(inquiry_id = id, admin = %account.user_id, "Inquiry removed by admin");
    }
    Ok(Json(serde_json::json!({ "deleted": id })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;

    fn parse(uri: &str) -> InquiryListQuery {
        let uri: http::Uri = uri.parse().unwrap();
        Query::<InquiryListQuery>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn test_blank_category_lists_everything() {
        let query = parse("http://localhost/api/inquiries?cat=&keyword=x");
        assert_eq!(query.filter(), None);
    }

    #[test]
    fn test_unknown_category_lists_everything() {
        let query = parse("http://localhost/api/inquiries?cat=content&keyword=refund&page=2");
        assert_eq!(query.filter(), None);
        assert_eq!(query.page, Some(2));
    }

    #[test]
    fn test_keyword_without_category_is_ignored() {
        let query = parse("http://localhost/api/inquiries?keyword=refund");
        assert_eq!(query.filter(), None);
    }

    #[test]
    fn test_blank_title_rejected() {
        let req = InquiryRequest {
            title: "  \t ".into(),
            content: "When is checkout?".into(),
        }
        .trimmed();
        assert_eq!(validate(&req).unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_category_with_keyword_filters() {
        let query = parse("http://localhost/api/inquiries?cat=username&keyword=%20guest01%20");
        assert_eq!(query.filter(), Some((InquirySearch::Username, "guest01")));

        let query = parse("http://localhost/api/inquiries?cat=title&keyword=");
        assert_eq!(query.filter(), None);
    }
}
