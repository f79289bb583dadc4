//! Business logic services

pub mod bookings;
pub mod items;
pub mod requests;
pub mod users;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    repository: Repository,
    pub users: users::UsersService,
    pub items: items::ItemsService,
    pub bookings: bookings::BookingsService,
    pub requests: requests::RequestsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            users: users::UsersService::new(repository.clone()),
            items: items::ItemsService::new(repository.clone()),
            bookings: bookings::BookingsService::new(repository.clone()),
            requests: requests::RequestsService::new(repository.clone()),
            repository,
        }
    }

    /// Round-trip a trivial query to verify the database is reachable
    pub async fn ping_database(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.repository.pool)
            .await?;
        Ok(())
    }
}
