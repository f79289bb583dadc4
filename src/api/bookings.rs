//! Booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::booking::{BookingView, CreateBooking},
};

use super::SharerId;

/// Approval decision for a waiting booking
#[derive(Deserialize)]
pub struct ApprovedParam {
    pub approved: bool,
}

/// State filter and pagination for booking listings
#[derive(Deserialize)]
pub struct BookingListParams {
    pub state: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

/// Create a new booking for an item
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Booker user ID")
    ),
    responses(
        (status = 201, description = "Booking created", body = BookingView),
        (status = 400, description = "Invalid booking window, item unavailable or period taken"),
        (status = 403, description = "Owner cannot book own item"),
        (status = 404, description = "Booker or item not found")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    SharerId(booker_id): SharerId,
    Json(booking): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingView>)> {
    let created = state.services.bookings.create(booker_id, booking).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Approve or reject a waiting booking (item owner only)
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking ID"),
        ("approved" = bool, Query, description = "true to approve, false to reject"),
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner user ID")
    ),
    responses(
        (status = 200, description = "Booking status updated", body = BookingView),
        (status = 400, description = "Booking is no longer waiting"),
        (status = 403, description = "Caller is not the item owner"),
        (status = 404, description = "Booking, caller or item not found")
    )
)]
pub async fn confirm_booking(
    State(state): State<crate::AppState>,
    SharerId(caller_id): SharerId,
    Path(booking_id): Path<i64>,
    Query(params): Query<ApprovedParam>,
) -> AppResult<Json<BookingView>> {
    let updated = state
        .services
        .bookings
        .confirm(booking_id, caller_id, params.approved)
        .await?;
    Ok(Json(updated))
}

/// Get a booking by ID (booker or item owner only)
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingView),
        (status = 403, description = "Caller is neither booker nor owner"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    SharerId(caller_id): SharerId,
    Path(booking_id): Path<i64>,
) -> AppResult<Json<BookingView>> {
    let booking = state
        .services
        .bookings
        .get_by_id(booking_id, caller_id)
        .await?;
    Ok(Json(booking))
}

/// List the caller's bookings, filtered by state
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(
        ("state" = Option<String>, Query, description = "ALL, CURRENT, PAST, FUTURE, WAITING or REJECTED (default: ALL)"),
        ("from" = Option<i64>, Query, description = "Offset (default: 0)"),
        ("size" = Option<i64>, Query, description = "Page size (default: 10)"),
        ("X-Sharer-User-Id" = i64, Header, description = "Booker user ID")
    ),
    responses(
        (status = 200, description = "Bookings made by the caller", body = Vec<BookingView>),
        (status = 400, description = "Unknown state or bad pagination"),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    SharerId(booker_id): SharerId,
    Query(params): Query<BookingListParams>,
) -> AppResult<Json<Vec<BookingView>>> {
    let bookings = state
        .services
        .bookings
        .list_for_booker(
            booker_id,
            params.state.as_deref().unwrap_or("ALL"),
            params.from.unwrap_or(0),
            params.size.unwrap_or(10),
        )
        .await?;
    Ok(Json(bookings))
}

/// List bookings on the caller's items, filtered by state
#[utoipa::path(
    get,
    path = "/bookings/owner",
    tag = "bookings",
    params(
        ("state" = Option<String>, Query, description = "ALL, CURRENT, PAST, FUTURE, WAITING or REJECTED (default: ALL)"),
        ("from" = Option<i64>, Query, description = "Offset (default: 0)"),
        ("size" = Option<i64>, Query, description = "Page size (default: 10)"),
        ("X-Sharer-User-Id" = i64, Header, description = "Owner user ID")
    ),
    responses(
        (status = 200, description = "Bookings on the caller's items", body = Vec<BookingView>),
        (status = 400, description = "Unknown state or bad pagination"),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_owner_bookings(
    State(state): State<crate::AppState>,
    SharerId(owner_id): SharerId,
    Query(params): Query<BookingListParams>,
) -> AppResult<Json<Vec<BookingView>>> {
    let bookings = state
        .services
        .bookings
        .list_for_owner(
            owner_id,
            params.state.as_deref().unwrap_or("ALL"),
            params.from.unwrap_or(0),
            params.size.unwrap_or(10),
        )
        .await?;
    Ok(Json(bookings))
}
