//! Item requests repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{request::Request, Pagination},
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get request by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Request> {
        sqlx::query_as::<_, Request>("SELECT * FROM requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", id)))
    }

    /// Create a new request
    pub async fn create(&self, requester_id: i64, description: &str) -> AppResult<Request> {
        let created = sqlx::query_as::<_, Request>(
            r#"
            INSERT INTO requests (description, requester_id, created)
            VALUES ($1, $2, NOW())
            RETURNING *
            "#,
        )
        .bind(description)
        .bind(requester_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// A user's own requests, newest first
    pub async fn find_by_requester(&self, requester_id: i64) -> AppResult<Vec<Request>> {
        let requests = sqlx::query_as::<_, Request>(
            "SELECT * FROM requests WHERE requester_id = $1 ORDER BY created DESC",
        )
        .bind(requester_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    /// Requests created by other users, newest first, one page at a time
    pub async fn find_by_other_users(
        &self,
        requester_id: i64,
        page: &Pagination,
    ) -> AppResult<Vec<Request>> {
        let requests = sqlx::query_as::<_, Request>(
            r#"
            SELECT * FROM requests
            WHERE requester_id != $1
            ORDER BY created DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(requester_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }
}
