//! Booking model, status lifecycle and listing filters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

use super::item::ItemRef;
use super::user::UserRef;

/// Booking lifecycle status.
///
/// Only WAITING is non-terminal: the item owner moves it to APPROVED or
/// REJECTED exactly once. CANCELED exists as a stored value but no
/// operation produces it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "booking_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
    Canceled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Canceled => "CANCELED",
        };
        f.write_str(s)
    }
}

/// Booking model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub item_id: i64,
    pub booker_id: i64,
    pub status: BookingStatus,
}

/// Listing filter for booking queries, matched against wall-clock now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    pub fn parse(state: &str) -> AppResult<Self> {
        match state {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            _ => Err(AppError::Validation(format!("Unknown state: {}", state))),
        }
    }

    /// Whether a booking falls into this bucket at instant `now`.
    ///
    /// PAST additionally requires an APPROVED status: a WAITING booking for
    /// an elapsed window never became a rental.
    pub fn matches(&self, booking: &Booking, now: DateTime<Utc>) -> bool {
        match self {
            BookingState::All => true,
            BookingState::Current => booking.start_date <= now && now < booking.end_date,
            BookingState::Past => {
                booking.end_date < now && booking.status == BookingStatus::Approved
            }
            BookingState::Future => booking.start_date > now,
            BookingState::Waiting => booking.status == BookingStatus::Waiting,
            BookingState::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

/// Booking as returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingView {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub booker: UserRef,
    pub item: ItemRef,
}

/// Short booking reference embedded in item views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRef {
    pub id: i64,
    pub booker_id: i64,
    #[sqlx(rename = "start_date")]
    pub start: DateTime<Utc>,
    #[sqlx(rename = "end_date")]
    pub end: DateTime<Utc>,
}

/// Create booking request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub item_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn booking(start: DateTime<Utc>, end: DateTime<Utc>, status: BookingStatus) -> Booking {
        Booking {
            id: 1,
            start_date: start,
            end_date: end,
            item_id: 1,
            booker_id: 1,
            status,
        }
    }

    #[test]
    fn parse_accepts_known_states() {
        assert_eq!(BookingState::parse("ALL").unwrap(), BookingState::All);
        assert_eq!(BookingState::parse("PAST").unwrap(), BookingState::Past);
        assert_eq!(
            BookingState::parse("CURRENT").unwrap(),
            BookingState::Current
        );
    }

    #[test]
    fn parse_rejects_unknown_state_naming_it() {
        let err = BookingState::parse("SOMEDAY").unwrap_err();
        match err {
            AppError::Validation(msg) => assert_eq!(msg, "Unknown state: SOMEDAY"),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn past_requires_elapsed_end_and_approved_status() {
        let now = Utc::now();
        let done = booking(
            now - Duration::days(3),
            now - Duration::days(1),
            BookingStatus::Approved,
        );
        assert!(BookingState::Past.matches(&done, now));

        // elapsed window but never approved
        let stale = booking(
            now - Duration::days(3),
            now - Duration::days(1),
            BookingStatus::Waiting,
        );
        assert!(!BookingState::Past.matches(&stale, now));

        let running = booking(
            now - Duration::days(1),
            now + Duration::days(1),
            BookingStatus::Approved,
        );
        assert!(!BookingState::Past.matches(&running, now));
    }

    #[test]
    fn future_matches_start_strictly_after_now() {
        let now = Utc::now();
        let ahead = booking(
            now + Duration::hours(1),
            now + Duration::days(1),
            BookingStatus::Waiting,
        );
        assert!(BookingState::Future.matches(&ahead, now));

        let started = booking(
            now - Duration::hours(1),
            now + Duration::days(1),
            BookingStatus::Approved,
        );
        assert!(!BookingState::Future.matches(&started, now));
    }

    #[test]
    fn current_matches_half_open_window() {
        let now = Utc::now();
        let running = booking(
            now - Duration::hours(1),
            now + Duration::hours(1),
            BookingStatus::Rejected,
        );
        // CURRENT is purely temporal, status plays no part
        assert!(BookingState::Current.matches(&running, now));

        let at_end = booking(now - Duration::hours(2), now, BookingStatus::Approved);
        assert!(!BookingState::Current.matches(&at_end, now));
    }

    #[test]
    fn status_filters_ignore_time() {
        let now = Utc::now();
        let rejected_long_ago = booking(
            now - Duration::days(10),
            now - Duration::days(9),
            BookingStatus::Rejected,
        );
        assert!(BookingState::Rejected.matches(&rejected_long_ago, now));
        assert!(!BookingState::Waiting.matches(&rejected_long_ago, now));
    }

    #[test]
    fn all_matches_everything() {
        let now = Utc::now();
        let b = booking(now, now + Duration::days(1), BookingStatus::Canceled);
        assert!(BookingState::All.matches(&b, now));
    }
}
