//! Hotel list, detail page and reviews

use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    HotelDetail, HotelSearchField, HotelSummary, MAX_REVIEW_SCORE, MIN_REVIEW_SCORE, Review,
};
use shared::paging::{Page, clamp_page, total_pages};
use shared::request::offset;
use shared::util::star_string;

use crate::auth::CurrentAccount;
use crate::db;
use crate::state::AppState;

use super::extract::{JsonBody, PathParam, QueryParams};
use super::{ApiResult, HOTEL_PAGE_BLOCK, keyword};

/// Reviews shown on the detail page
const DETAIL_REVIEW_LIMIT: i64 = 50;

/// GET /api/hotels?keyword=&num=&page=
#[derive(Debug, Default, Deserialize)]
pub struct HotelListQuery {
    pub keyword: Option<String>,
    /// 0 = name, 1 = address
    pub num: Option<u8>,
    /// One-based
    pub page: Option<u32>,
}

pub async fn list_hotels(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<HotelListQuery>,
) -> ApiResult<Page<HotelSummary>> {
    let field = HotelSearchField::from_num(query.num);
    let keyword = keyword(query.keyword.as_deref());
    let size = state.hotel_page_size;

    let total_items = db::hotels::count(&state.pool, field, keyword).await?;
    let requested = query.page.unwrap_or(1).saturating_sub(1);
    let index = clamp_page(requested, total_pages(total_items, size));

    let hotels = db::hotels::search(
        &state.pool,
        field,
        keyword,
        i64::from(size),
        offset(index, size),
    )
    .await?;

    Ok(Json(Page::new(hotels, index, size, total_items, HOTEL_PAGE_BLOCK)))
}

/// GET /api/hotels/{id}
pub async fn hotel_detail(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<HotelDetail> {
    let hotel = db::hotels::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::HotelNotFound))?;
    let rooms = db::rooms::list_by_hotel(&state.pool, id).await?;
    let reviews = db::reviews::list_by_hotel(&state.pool, id, DETAIL_REVIEW_LIMIT).await?;
    let (avg_score, _) = db::hotels::score(&state.pool, id).await?;

    Ok(Json(HotelDetail {
        status: hotel.status,
        hotel,
        avg_score,
        stars: star_string(avg_score),
        rooms,
        reviews,
    }))
}

/// POST /api/hotels/{id}/reviews
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub score: i16,
    #[serde(default)]
    pub content: String,
}

fn check_score(score: i16) -> Result<(), AppError> {
    if !(MIN_REVIEW_SCORE..=MAX_REVIEW_SCORE).contains(&score) {
        return Err(AppError::new(ErrorCode::InvalidReviewScore)
            .with_detail("min", MIN_REVIEW_SCORE)
            .with_detail("max", MAX_REVIEW_SCORE));
    }
    Ok(())
}

pub async fn add_review(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    PathParam(hotel_id): PathParam<i64>,
    JsonBody(req): JsonBody<ReviewRequest>,
) -> ApiResult<Review> {
    check_score(req.score)?;
    if db::hotels::find_by_id(&state.pool, hotel_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::HotelNotFound).into());
    }

    let review = db::reviews::create(
        &state.pool,
        hotel_id,
        account.account_id,
        &account.user_id,
        req.score,
        req.content.trim(),
        shared::util::now_millis(),
    )
    .await?;
    Ok(Json(review))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        assert!(check_score(1).is_ok());
        assert!(check_score(5).is_ok());
        assert_eq!(check_score(0).unwrap_err().code, ErrorCode::InvalidReviewScore);
        assert_eq!(check_score(6).unwrap_err().code, ErrorCode::InvalidReviewScore);
    }
}
