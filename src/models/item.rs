//! Item (catalog) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::booking::BookingRef;
use super::comment::CommentView;

/// Item model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

/// Item as returned by search and request enrichment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

impl From<Item> for ItemView {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
        }
    }
}

/// Short item reference embedded in booking views
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemRef {
    pub id: i64,
    pub name: String,
}

impl From<&Item> for ItemRef {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
        }
    }
}

/// Item details with booking window and comment enrichment.
///
/// `last_booking`/`next_booking` are only populated for the item's owner.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
    pub last_booking: Option<BookingRef>,
    pub next_booking: Option<BookingRef>,
    pub comments: Vec<CommentView>,
}

/// Create item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[validate(length(min = 1, message = "Name must not be blank"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description must not be blank"))]
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

/// Update item request. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}
