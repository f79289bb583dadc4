//! Item request model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::item::ItemView;

/// Item request model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Request {
    pub id: i64,
    pub description: String,
    pub requester_id: i64,
    pub created: DateTime<Utc>,
}

/// Request as returned to clients, with the items offered against it
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RequestView {
    pub id: i64,
    pub description: String,
    pub created: DateTime<Utc>,
    pub items: Vec<ItemView>,
}

/// Create request payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRequest {
    #[validate(length(min = 1, message = "Description must not be blank"))]
    pub description: String,
}
