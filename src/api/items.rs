//! Item catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{
        comment::{CommentView, CreateComment},
        item::{CreateItem, Item, ItemDetails, ItemView, UpdateItem},
    },
};

use super::{validate_payload, SharerId};

/// Pagination for item listings
#[derive(Deserialize)]
pub struct PageParams {
    pub from: Option<i64>,
    pub size: Option<i64>,
}

/// Search text and pagination
#[derive(Deserialize)]
pub struct SearchParams {
    pub text: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

/// List the caller's items with booking and comment enrichment
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(
        ("from" = Option<i64>, Query, description = "Offset (default: 0)"),
        ("size" = Option<i64>, Query, description = "Page size (default: 10)"),
        ("X-Sharer-User-Id" = i64, Header, description = "Owner user ID")
    ),
    responses(
        (status = 200, description = "The caller's items", body = Vec<ItemDetails>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_items(
    State(state): State<crate::AppState>,
    SharerId(owner_id): SharerId,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Vec<ItemDetails>>> {
    let items = state
        .services
        .items
        .list_by_owner(owner_id, params.from.unwrap_or(0), params.size.unwrap_or(10))
        .await?;
    Ok(Json(items))
}

/// Get item details by ID
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID")
    ),
    responses(
        (status = 200, description = "Item details", body = ItemDetails),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    SharerId(caller_id): SharerId,
    Path(id): Path<i64>,
) -> AppResult<Json<ItemDetails>> {
    let item = state.services.items.get_by_id(id, caller_id).await?;
    Ok(Json(item))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItem,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Owner user ID")
    ),
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Owner or referenced request not found")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    SharerId(owner_id): SharerId,
    Json(item): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    validate_payload(&item)?;
    let created = state.services.items.create(owner_id, item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partially update an item (owner only)
#[utoipa::path(
    patch,
    path = "/items/{id}",
    tag = "items",
    request_body = UpdateItem,
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Owner user ID")
    ),
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 403, description = "Caller is not the owner"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_item(
    State(state): State<crate::AppState>,
    SharerId(owner_id): SharerId,
    Path(id): Path<i64>,
    Json(patch): Json<UpdateItem>,
) -> AppResult<Json<Item>> {
    validate_payload(&patch)?;
    let updated = state.services.items.update(owner_id, id, patch).await?;
    Ok(Json(updated))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn delete_item(
    State(state): State<crate::AppState>,
    SharerId(_caller_id): SharerId,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.items.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Search available items by name or description
#[utoipa::path(
    get,
    path = "/items/search",
    tag = "items",
    params(
        ("text" = Option<String>, Query, description = "Search text; empty matches nothing"),
        ("from" = Option<i64>, Query, description = "Offset (default: 0)"),
        ("size" = Option<i64>, Query, description = "Page size (default: 10)"),
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID")
    ),
    responses(
        (status = 200, description = "Matching available items", body = Vec<ItemView>),
        (status = 400, description = "Bad pagination")
    )
)]
pub async fn search_items(
    State(state): State<crate::AppState>,
    SharerId(_caller_id): SharerId,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<ItemView>>> {
    let items = state
        .services
        .items
        .search(
            params.text.as_deref().unwrap_or(""),
            params.from.unwrap_or(0),
            params.size.unwrap_or(10),
        )
        .await?;
    Ok(Json(items))
}

/// Leave a comment on an item after a completed rental
#[utoipa::path(
    post,
    path = "/items/{id}/comment",
    tag = "items",
    request_body = CreateComment,
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Author user ID")
    ),
    responses(
        (status = 201, description = "Comment created", body = CommentView),
        (status = 400, description = "Author has no completed booking on the item"),
        (status = 404, description = "Item or author not found")
    )
)]
pub async fn add_comment(
    State(state): State<crate::AppState>,
    SharerId(author_id): SharerId,
    Path(id): Path<i64>,
    Json(comment): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<CommentView>)> {
    validate_payload(&comment)?;
    let created = state.services.items.add_comment(author_id, id, comment).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
