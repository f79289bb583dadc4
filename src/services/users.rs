//! User directory service

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all users
    pub async fn get_all(&self) -> AppResult<Vec<User>> {
        self.repository.users.list_all().await
    }

    /// Get user by ID
    pub async fn get_by_id(&self, user_id: i64) -> AppResult<User> {
        self.repository.users.get_by_id(user_id).await
    }

    /// Create a new user. Email must be unique.
    pub async fn create(&self, user: CreateUser) -> AppResult<User> {
        if self.repository.users.email_exists(&user.email, None).await? {
            return Err(AppError::Conflict(format!(
                "User with email {} already exists",
                user.email
            )));
        }
        let created = self.repository.users.create(&user).await?;
        tracing::info!("User {} created", created.id);
        Ok(created)
    }

    /// Partial update. Email uniqueness is checked excluding the user itself.
    pub async fn update(&self, user_id: i64, patch: UpdateUser) -> AppResult<User> {
        let mut user = self.repository.users.get_by_id(user_id).await?;
        if let Some(ref email) = patch.email {
            if self
                .repository
                .users
                .email_exists(email, Some(user_id))
                .await?
            {
                return Err(AppError::Conflict(format!(
                    "User with email {} already exists",
                    email
                )));
            }
        }
        apply_patch(&mut user, patch);
        let updated = self.repository.users.update(&user).await?;
        tracing::info!("User {} updated", updated.id);
        Ok(updated)
    }

    /// Delete a user by ID
    pub async fn delete(&self, user_id: i64) -> AppResult<()> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository.users.delete(user_id).await?;
        tracing::info!("User {} deleted", user_id);
        Ok(())
    }
}

/// Merge present patch fields onto the user. Blank values are ignored.
fn apply_patch(user: &mut User, patch: UpdateUser) {
    if let Some(name) = patch.name {
        if !name.trim().is_empty() {
            user.name = name;
        }
    }
    if let Some(email) = patch.email {
        if !email.trim().is_empty() {
            user.email = email;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[test]
    fn patch_overwrites_present_fields_only() {
        let mut u = user();
        apply_patch(
            &mut u,
            UpdateUser {
                name: None,
                email: Some("alice@new.example.com".to_string()),
            },
        );
        assert_eq!(u.name, "Alice");
        assert_eq!(u.email, "alice@new.example.com");
    }

    #[test]
    fn blank_values_are_ignored() {
        let mut u = user();
        apply_patch(
            &mut u,
            UpdateUser {
                name: Some("".to_string()),
                email: Some("  ".to_string()),
            },
        );
        assert_eq!(u.name, "Alice");
        assert_eq!(u.email, "alice@example.com");
    }
}
