//! Booking engine: creation, confirmation and temporal listing

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingState, BookingStatus, BookingView, CreateBooking},
        item::Item,
        user::User,
        Pagination,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a booking in WAITING status.
    ///
    /// The booker must not own the item, the item must be available, the
    /// window must lie in the future, and it must not overlap a pending or
    /// approved booking on the same item.
    pub async fn create(&self, booker_id: i64, booking: CreateBooking) -> AppResult<BookingView> {
        let booker = self.repository.users.get_by_id(booker_id).await?;
        let item = self.repository.items.get_by_id(booking.item_id).await?;

        validate_window(booking.start, booking.end, Utc::now())?;

        if item.owner_id == booker_id {
            return Err(AppError::Forbidden(format!(
                "Owner cannot book own item with id {}",
                item.id
            )));
        }
        if !item.available {
            return Err(AppError::Validation(format!(
                "Item with id {} is not available for booking",
                item.id
            )));
        }
        if self
            .repository
            .bookings
            .overlaps_existing(item.id, booking.start, booking.end)
            .await?
        {
            return Err(AppError::Validation(format!(
                "Item with id {} is already booked for this period",
                item.id
            )));
        }

        let created = self
            .repository
            .bookings
            .create(booker_id, item.id, booking.start, booking.end)
            .await?;
        tracing::info!(
            "Booking {} created by user {} for item {}",
            created.id,
            booker_id,
            item.id
        );
        Ok(view_of(created, &item, &booker))
    }

    /// Approve or reject a WAITING booking. Owner only; the transition is
    /// terminal, so a second call fails with a validation error.
    pub async fn confirm(
        &self,
        booking_id: i64,
        caller_id: i64,
        approved: bool,
    ) -> AppResult<BookingView> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        self.repository.users.get_by_id(caller_id).await?;
        let item = self.repository.items.get_by_id(booking.item_id).await?;

        if item.owner_id != caller_id {
            return Err(AppError::Forbidden(
                "Only the item owner can change the booking status".to_string(),
            ));
        }
        if booking.status != BookingStatus::Waiting {
            return Err(AppError::Validation(
                "Booking status change unavailable".to_string(),
            ));
        }

        let status = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };
        let updated = self
            .repository
            .bookings
            .update_status(booking.id, status)
            .await?;
        tracing::info!("Booking {} status changed to {}", updated.id, updated.status);

        let booker = self.repository.users.get_by_id(updated.booker_id).await?;
        Ok(view_of(updated, &item, &booker))
    }

    /// Get a booking, visible to its booker and the item owner only
    pub async fn get_by_id(&self, booking_id: i64, caller_id: i64) -> AppResult<BookingView> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        let item = self.repository.items.get_by_id(booking.item_id).await?;

        if booking.booker_id != caller_id && item.owner_id != caller_id {
            return Err(AppError::Forbidden(
                "Only the booker or the item owner can view a booking".to_string(),
            ));
        }

        let booker = self.repository.users.get_by_id(booking.booker_id).await?;
        Ok(view_of(booking, &item, &booker))
    }

    /// Bookings made by a user, filtered by state, newest window first
    pub async fn list_for_booker(
        &self,
        booker_id: i64,
        state: &str,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<BookingView>> {
        let state = BookingState::parse(state)?;
        let page = Pagination::new(from, size)?;
        self.repository.users.get_by_id(booker_id).await?;

        let bookings = self.repository.bookings.find_by_booker(booker_id).await?;
        self.page_views(bookings, state, page).await
    }

    /// Bookings on items owned by a user, filtered by state, newest window first
    pub async fn list_for_owner(
        &self,
        owner_id: i64,
        state: &str,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<BookingView>> {
        let state = BookingState::parse(state)?;
        let page = Pagination::new(from, size)?;
        self.repository.users.get_by_id(owner_id).await?;

        let bookings = self
            .repository
            .bookings
            .find_by_owner_items(owner_id)
            .await?;
        self.page_views(bookings, state, page).await
    }

    async fn page_views(
        &self,
        bookings: Vec<Booking>,
        state: BookingState,
        page: Pagination,
    ) -> AppResult<Vec<BookingView>> {
        let now = Utc::now();
        let filtered: Vec<Booking> = bookings
            .into_iter()
            .filter(|b| state.matches(b, now))
            .collect();

        let mut views = Vec::new();
        for booking in page.slice(&filtered) {
            let item = self.repository.items.get_by_id(booking.item_id).await?;
            let booker = self.repository.users.get_by_id(booking.booker_id).await?;
            views.push(view_of(booking, &item, &booker));
        }
        Ok(views)
    }
}

/// Booking windows must lie in the future and be non-empty
fn validate_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> AppResult<()> {
    if start < now || end < now || end <= start {
        return Err(AppError::Validation("Invalid booking window".to_string()));
    }
    Ok(())
}

fn view_of(booking: Booking, item: &Item, booker: &User) -> BookingView {
    BookingView {
        id: booking.id,
        start: booking.start_date,
        end: booking.end_date,
        status: booking.status,
        booker: booker.clone().into(),
        item: item.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn window_in_future_is_accepted() {
        let now = Utc::now();
        assert!(validate_window(now + Duration::days(1), now + Duration::days(3), now).is_ok());
    }

    #[test]
    fn window_ending_before_it_starts_is_rejected() {
        let now = Utc::now();
        let err =
            validate_window(now + Duration::days(3), now + Duration::days(1), now).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn zero_length_window_is_rejected() {
        let now = Utc::now();
        let start = now + Duration::days(1);
        assert!(validate_window(start, start, now).is_err());
    }

    #[test]
    fn window_starting_in_the_past_is_rejected() {
        let now = Utc::now();
        assert!(validate_window(now - Duration::hours(1), now + Duration::days(1), now).is_err());
    }

    #[test]
    fn window_entirely_in_the_past_is_rejected() {
        let now = Utc::now();
        assert!(validate_window(now - Duration::days(3), now - Duration::days(1), now).is_err());
    }
}
