//! Bookings repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, BookingRef, BookingStatus},
};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Create a new booking in WAITING status
    pub async fn create(
        &self,
        booker_id: i64,
        item_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Booking> {
        let created = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (start_date, end_date, item_id, booker_id, status)
            VALUES ($1, $2, $3, $4, 'WAITING')
            RETURNING *
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(item_id)
        .bind(booker_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Persist a status transition
    pub async fn update_status(&self, id: i64, status: BookingStatus) -> AppResult<Booking> {
        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    /// All bookings made by a user, newest window first
    pub async fn find_by_booker(&self, booker_id: i64) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE booker_id = $1 ORDER BY start_date DESC",
        )
        .bind(booker_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    /// All bookings on items owned by a user, newest window first
    pub async fn find_by_owner_items(&self, owner_id: i64) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT b.* FROM bookings b
            JOIN items i ON b.item_id = i.id
            WHERE i.owner_id = $1
            ORDER BY b.start_date DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    /// Most recent approved booking that has already ended
    pub async fn find_last_for_item(&self, item_id: i64) -> AppResult<Option<BookingRef>> {
        let booking = sqlx::query_as::<_, BookingRef>(
            r#"
            SELECT id, booker_id, start_date, end_date FROM bookings
            WHERE item_id = $1 AND status = 'APPROVED' AND end_date < NOW()
            ORDER BY end_date DESC
            LIMIT 1
            "#,
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(booking)
    }

    /// Nearest approved booking that has not yet started
    pub async fn find_next_for_item(&self, item_id: i64) -> AppResult<Option<BookingRef>> {
        let booking = sqlx::query_as::<_, BookingRef>(
            r#"
            SELECT id, booker_id, start_date, end_date FROM bookings
            WHERE item_id = $1 AND status = 'APPROVED' AND start_date > NOW()
            ORDER BY start_date
            LIMIT 1
            "#,
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(booking)
    }

    /// Whether the user has a booking on the item whose window has elapsed
    pub async fn has_finished_booking(&self, booker_id: i64, item_id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE booker_id = $1 AND item_id = $2 AND end_date < NOW()
            )
            "#,
        )
        .bind(booker_id)
        .bind(item_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Whether `[start, end)` overlaps a pending or approved booking on the item
    pub async fn overlaps_existing(
        &self,
        item_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE item_id = $1
                  AND status IN ('WAITING', 'APPROVED')
                  AND start_date < $3
                  AND end_date > $2
            )
            "#,
        )
        .bind(item_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
