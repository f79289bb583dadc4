//! Comment model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Comment model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: DateTime<Utc>,
}

/// Comment as returned to clients, with the author's name resolved
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

/// Create comment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateComment {
    #[validate(length(min = 1, message = "Comment text must not be blank"))]
    pub text: String,
}
