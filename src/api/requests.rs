//! Request board endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::request::{CreateRequest, RequestView},
};

use super::{items::PageParams, validate_payload, SharerId};

/// Post a request for an item not yet listed
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    request_body = CreateRequest,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Requester user ID")
    ),
    responses(
        (status = 201, description = "Request created", body = RequestView),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Requester not found")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    SharerId(requester_id): SharerId,
    Json(request): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<RequestView>)> {
    validate_payload(&request)?;
    let created = state.services.requests.create(requester_id, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List the caller's own requests with matching items
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Requester user ID")
    ),
    responses(
        (status = 200, description = "The caller's requests", body = Vec<RequestView>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_my_requests(
    State(state): State<crate::AppState>,
    SharerId(requester_id): SharerId,
) -> AppResult<Json<Vec<RequestView>>> {
    let requests = state.services.requests.list_mine(requester_id).await?;
    Ok(Json(requests))
}

/// List other users' requests, paginated
#[utoipa::path(
    get,
    path = "/requests/all",
    tag = "requests",
    params(
        ("from" = Option<i64>, Query, description = "Offset (default: 0)"),
        ("size" = Option<i64>, Query, description = "Page size (default: 10)"),
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID")
    ),
    responses(
        (status = 200, description = "Requests from other users", body = Vec<RequestView>),
        (status = 400, description = "Bad pagination"),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_other_requests(
    State(state): State<crate::AppState>,
    SharerId(caller_id): SharerId,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Vec<RequestView>>> {
    let requests = state
        .services
        .requests
        .list_others(caller_id, params.from.unwrap_or(0), params.size.unwrap_or(10))
        .await?;
    Ok(Json(requests))
}

/// Get a single request with matching items
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(
        ("id" = i64, Path, description = "Request ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID")
    ),
    responses(
        (status = 200, description = "Request details", body = RequestView),
        (status = 404, description = "Caller or request not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    SharerId(caller_id): SharerId,
    Path(id): Path<i64>,
) -> AppResult<Json<RequestView>> {
    let request = state.services.requests.get_by_id(id, caller_id).await?;
    Ok(Json(request))
}
