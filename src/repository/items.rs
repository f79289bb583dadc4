//! Items repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        item::{CreateItem, Item},
        Pagination,
    },
};

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Postgres>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get item by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Item> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))
    }

    /// Create a new item owned by `owner_id`
    pub async fn create(&self, owner_id: i64, item: &CreateItem) -> AppResult<Item> {
        let created = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, description, available, owner_id, request_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .bind(owner_id)
        .bind(item.request_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Persist an updated item row
    pub async fn update(&self, item: &Item) -> AppResult<Item> {
        let updated = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items SET name = $1, description = $2, available = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .bind(item.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    /// Delete an item by ID
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Get an owner's items, one page at a time
    pub async fn find_by_owner(&self, owner_id: i64, page: &Pagination) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE owner_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
        )
        .bind(owner_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Case-insensitive substring search over name and description,
    /// restricted to available items
    pub async fn search(&self, text: &str, page: &Pagination) -> AppResult<Vec<Item>> {
        let pattern = like_pattern(text);
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT * FROM items
            WHERE available = TRUE
              AND (LOWER(name) LIKE $1 OR LOWER(description) LIKE $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Items offered against a request, newest first
    pub async fn find_by_request(&self, request_id: i64) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE request_id = $1 ORDER BY id DESC",
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}

/// Build a `%...%` LIKE pattern, treating the query text as a literal.
/// `%`, `_` and `\` in the text are escaped so they match themselves.
fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_wrapped_in_wildcards() {
        assert_eq!(like_pattern("Drill"), "%drill%");
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("drill_bit"), "%drill\\_bit%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
