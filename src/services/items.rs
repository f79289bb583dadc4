//! Item catalog service, including the comment log

use crate::{
    error::{AppError, AppResult},
    models::{
        comment::{CommentView, CreateComment},
        item::{CreateItem, Item, ItemDetails, ItemView, UpdateItem},
        Pagination,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ItemsService {
    repository: Repository,
}

impl ItemsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new item for an owner
    pub async fn create(&self, owner_id: i64, item: CreateItem) -> AppResult<Item> {
        self.repository.users.get_by_id(owner_id).await?;
        if let Some(request_id) = item.request_id {
            self.repository.requests.get_by_id(request_id).await?;
        }
        let created = self.repository.items.create(owner_id, &item).await?;
        tracing::info!("Item {} created by user {}", created.id, owner_id);
        Ok(created)
    }

    /// Partial update, restricted to the item's owner
    pub async fn update(&self, owner_id: i64, item_id: i64, patch: UpdateItem) -> AppResult<Item> {
        self.repository.users.get_by_id(owner_id).await?;
        let mut item = self.repository.items.get_by_id(item_id).await?;
        if item.owner_id != owner_id {
            return Err(AppError::Forbidden(
                "Only the owner can update an item".to_string(),
            ));
        }
        apply_patch(&mut item, patch);
        let updated = self.repository.items.update(&item).await?;
        tracing::info!("Item {} updated", updated.id);
        Ok(updated)
    }

    /// Delete an item by ID
    pub async fn delete(&self, item_id: i64) -> AppResult<()> {
        self.repository.items.get_by_id(item_id).await?;
        self.repository.items.delete(item_id).await?;
        tracing::info!("Item {} deleted", item_id);
        Ok(())
    }

    /// Get an item with its comments; booking windows are only disclosed
    /// to the owner
    pub async fn get_by_id(&self, item_id: i64, caller_id: i64) -> AppResult<ItemDetails> {
        let item = self.repository.items.get_by_id(item_id).await?;
        self.to_details(item, caller_id).await
    }

    /// An owner's items with enrichment, one page at a time
    pub async fn list_by_owner(
        &self,
        owner_id: i64,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<ItemDetails>> {
        let page = Pagination::new(from, size)?;
        self.repository.users.get_by_id(owner_id).await?;
        let items = self.repository.items.find_by_owner(owner_id, &page).await?;

        let mut details = Vec::new();
        for item in items {
            details.push(self.to_details(item, owner_id).await?);
        }
        Ok(details)
    }

    /// Text search over available items. An empty query matches nothing.
    pub async fn search(&self, text: &str, from: i64, size: i64) -> AppResult<Vec<ItemView>> {
        let page = Pagination::new(from, size)?;
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let items = self.repository.items.search(text, &page).await?;
        Ok(items.into_iter().map(ItemView::from).collect())
    }

    /// Leave feedback on an item. The author must have a booking on the
    /// item whose window has already elapsed.
    pub async fn add_comment(
        &self,
        author_id: i64,
        item_id: i64,
        comment: CreateComment,
    ) -> AppResult<CommentView> {
        let item = self.repository.items.get_by_id(item_id).await?;
        let author = self.repository.users.get_by_id(author_id).await?;

        if !self
            .repository
            .bookings
            .has_finished_booking(author_id, item_id)
            .await?
        {
            return Err(AppError::Validation(format!(
                "User with id {} has no completed booking for item {}",
                author_id, item.id
            )));
        }

        let created = self
            .repository
            .comments
            .create(author_id, item_id, &comment.text)
            .await?;
        tracing::info!(
            "Comment {} added to item {} by user {}",
            created.id,
            item_id,
            author_id
        );
        Ok(CommentView {
            id: created.id,
            text: created.text,
            author_name: author.name,
            created: created.created,
        })
    }

    async fn to_details(&self, item: Item, caller_id: i64) -> AppResult<ItemDetails> {
        let comments = self.repository.comments.find_by_item(item.id).await?;
        let (last_booking, next_booking) = if item.owner_id == caller_id {
            (
                self.repository.bookings.find_last_for_item(item.id).await?,
                self.repository.bookings.find_next_for_item(item.id).await?,
            )
        } else {
            (None, None)
        };
        Ok(ItemDetails {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
            last_booking,
            next_booking,
            comments,
        })
    }
}

/// Merge present patch fields onto the item. Blank names are ignored.
fn apply_patch(item: &mut Item, patch: UpdateItem) {
    if let Some(name) = patch.name {
        if !name.trim().is_empty() {
            item.name = name;
        }
    }
    if let Some(description) = patch.description {
        item.description = description;
    }
    if let Some(available) = patch.available {
        item.available = available;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Item {
        Item {
            id: 1,
            name: "Drill".to_string(),
            description: "Cordless drill".to_string(),
            available: true,
            owner_id: 7,
            request_id: None,
        }
    }

    #[test]
    fn patch_overwrites_present_fields_only() {
        let mut it = item();
        apply_patch(
            &mut it,
            UpdateItem {
                name: Some("Hammer drill".to_string()),
                description: None,
                available: Some(false),
            },
        );
        assert_eq!(it.name, "Hammer drill");
        assert_eq!(it.description, "Cordless drill");
        assert!(!it.available);
    }

    #[test]
    fn blank_name_is_ignored() {
        let mut it = item();
        apply_patch(
            &mut it,
            UpdateItem {
                name: Some("   ".to_string()),
                description: None,
                available: None,
            },
        );
        assert_eq!(it.name, "Drill");
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut it = item();
        apply_patch(
            &mut it,
            UpdateItem {
                name: None,
                description: None,
                available: None,
            },
        );
        assert_eq!(it.name, "Drill");
        assert_eq!(it.description, "Cordless drill");
        assert!(it.available);
    }
}
