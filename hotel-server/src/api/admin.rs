//! Admin console: accounts, catalogue management, audit trail
//!
//! Every route here sits behind `session_auth_middleware` and `require_admin`.

use axum::extract::State;
use axum::{Extension, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Account, Hotel, HotelStatus, Room};
use shared::paging::{Page, clamp_page, total_pages};
use shared::request::{PageQuery, offset};
use validator::Validate;

use crate::auth::{ClientIp, CurrentAccount};
use crate::db;
use crate::db::audit::AuditEntry;
use crate::state::AppState;
use crate::util::validate;

use super::extract::{JsonBody, PathParam, QueryParams};
use super::{ApiResult, record_audit};

const ADMIN_PAGE_SIZE: u32 = 20;
const ADMIN_PAGE_BLOCK: u32 = 10;

/// GET /api/admin/accounts?page=
pub async fn list_accounts(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PageQuery>,
) -> ApiResult<Page<Account>> {
    let total_items = db::accounts::count(&state.pool).await?;
    let index = clamp_page(query.index(), total_pages(total_items, ADMIN_PAGE_SIZE));

    let rows = db::accounts::list(
        &state.pool,
        i64::from(ADMIN_PAGE_SIZE),
        offset(index, ADMIN_PAGE_SIZE),
    )
    .await?;
    let accounts = rows.into_iter().map(|row| row.into_account()).collect();

    Ok(Json(Page::new(
        accounts,
        index,
        ADMIN_PAGE_SIZE,
        total_items,
        ADMIN_PAGE_BLOCK,
    )))
}

/// POST /api/admin/hotels
#[derive(Debug, Deserialize, Validate)]
pub struct HotelRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[validate(url)]
    pub image_url: Option<String>,
    /// New hotels open unless told otherwise
    #[serde(default)]
    pub status: HotelStatus,
}

pub async fn create_hotel(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAccount>,
    ClientIp(ip): ClientIp,
    JsonBody(req): JsonBody<HotelRequest>,
) -> ApiResult<Hotel> {
    validate(&req)?;
    let new = db::hotels::NewHotel {
        name: req.name.trim(),
        phone: req.phone.trim(),
        address: req.address.trim(),
        description: &req.description,
        image_url: req.image_url.as_deref(),
        status: req.status,
    };
    let hotel = db::hotels::create(&state.pool, &new, shared::util::now_millis()).await?;

    record_audit(
        &state,
        admin.account_id,
        "hotel_create",
        Some(serde_json::json!({ "hotel_id": hotel.id })),
        Some(&ip),
    )
    .await;
    Ok(Json(hotel))
}

/// PUT /api/admin/hotels/{id}/status
#[derive(Debug, Deserialize)]
pub struct HotelStatusRequest {
    pub status: HotelStatus,
}

/// Open or close a hotel; closing leaves existing bookings alone
pub async fn set_hotel_status(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAccount>,
    ClientIp(ip): ClientIp,
    PathParam(hotel_id): PathParam<i64>,
    JsonBody(req): JsonBody<HotelStatusRequest>,
) -> ApiResult<Hotel> {
    if !db::hotels::update_status(&state.pool, hotel_id, req.status).await? {
        return Err(AppError::new(ErrorCode::HotelNotFound).into());
    }
    let hotel = db::hotels::find_by_id(&state.pool, hotel_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::HotelNotFound))?;

    tracing::info!(hotel_id, status = req.status.as_db(), admin = %admin.user_id, "Hotel status changed");
    record_audit(
        &state,
        admin.account_id,
        "hotel_status",
        Some(serde_json::json!({ "hotel_id": hotel_id, "status": req.status.as_db() })),
        Some(&ip),
    )
    .await;
    Ok(Json(hotel))
}

/// POST /api/admin/hotels/{id}/rooms
#[derive(Debug, Deserialize, Validate)]
pub struct RoomRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub price: Decimal,
    #[validate(range(min = 1))]
    pub capacity: i32,
    #[serde(default)]
    pub description: String,
    #[validate(url)]
    pub image_url: Option<String>,
}

pub async fn create_room(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAccount>,
    ClientIp(ip): ClientIp,
    PathParam(hotel_id): PathParam<i64>,
    JsonBody(req): JsonBody<RoomRequest>,
) -> ApiResult<Room> {
    validate(&req)?;
    if req.price.is_sign_negative() {
        return Err(AppError::new(ErrorCode::ValueOutOfRange)
            .with_detail("field", "price")
            .into());
    }
    if db::hotels::find_by_id(&state.pool, hotel_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::HotelNotFound).into());
    }

    let new = db::rooms::NewRoom {
        hotel_id,
        name: req.name.trim(),
        price: req.price,
        capacity: req.capacity,
        description: &req.description,
        image_url: req.image_url.as_deref(),
    };
    let room = db::rooms::create(&state.pool, &new).await?;

    record_audit(
        &state,
        admin.account_id,
        "room_create",
        Some(serde_json::json!({ "hotel_id": hotel_id, "room_id": room.id })),
        Some(&ip),
    )
    .await;
    Ok(Json(room))
}

/// GET /api/admin/audit?account_id=&page=
#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    pub account_id: Option<i64>,
    /// One-based
    pub page: Option<u32>,
}

pub async fn audit_log(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<AuditQuery>,
) -> ApiResult<Page<AuditEntry>> {
    let total_items = db::audit::count(&state.pool, query.account_id).await?;
    let requested = query.page.unwrap_or(1).saturating_sub(1);
    let index = clamp_page(requested, total_pages(total_items, ADMIN_PAGE_SIZE));

    let entries = db::audit::query(
        &state.pool,
        query.account_id,
        i64::from(ADMIN_PAGE_SIZE),
        offset(index, ADMIN_PAGE_SIZE),
    )
    .await?;

    Ok(Json(Page::new(
        entries,
        index,
        ADMIN_PAGE_SIZE,
        total_items,
        ADMIN_PAGE_BLOCK,
    )))
}
