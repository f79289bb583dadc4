//! Comments repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::comment::{Comment, CommentView},
};

#[derive(Clone)]
pub struct CommentsRepository {
    pool: Pool<Postgres>,
}

impl CommentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create a new comment
    pub async fn create(&self, author_id: i64, item_id: i64, text: &str) -> AppResult<Comment> {
        let created = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (text, item_id, author_id, created)
            VALUES ($1, $2, $3, NOW())
            RETURNING *
            "#,
        )
        .bind(text)
        .bind(item_id)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Comments on an item with author names, oldest first
    pub async fn find_by_item(&self, item_id: i64) -> AppResult<Vec<CommentView>> {
        let comments = sqlx::query_as::<_, CommentView>(
            r#"
            SELECT c.id, c.text, u.name AS author_name, c.created
            FROM comments c
            JOIN users u ON c.author_id = u.id
            WHERE c.item_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }
}
