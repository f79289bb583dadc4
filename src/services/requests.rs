//! Request board service

use crate::{
    error::AppResult,
    models::{
        item::ItemView,
        request::{CreateRequest, Request, RequestView},
        Pagination,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Post a new request
    pub async fn create(&self, requester_id: i64, request: CreateRequest) -> AppResult<RequestView> {
        self.repository.users.get_by_id(requester_id).await?;
        let created = self
            .repository
            .requests
            .create(requester_id, &request.description)
            .await?;
        tracing::info!("Request {} created by user {}", created.id, requester_id);
        self.to_view(created).await
    }

    /// The caller's own requests, newest first
    pub async fn list_mine(&self, requester_id: i64) -> AppResult<Vec<RequestView>> {
        self.repository.users.get_by_id(requester_id).await?;
        let requests = self
            .repository
            .requests
            .find_by_requester(requester_id)
            .await?;
        self.to_views(requests).await
    }

    /// Other users' requests, newest first, one page at a time
    pub async fn list_others(
        &self,
        requester_id: i64,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<RequestView>> {
        let page = Pagination::new(from, size)?;
        self.repository.users.get_by_id(requester_id).await?;
        let requests = self
            .repository
            .requests
            .find_by_other_users(requester_id, &page)
            .await?;
        self.to_views(requests).await
    }

    /// Get a single request, visible to any existing user
    pub async fn get_by_id(&self, request_id: i64, caller_id: i64) -> AppResult<RequestView> {
        self.repository.users.get_by_id(caller_id).await?;
        let request = self.repository.requests.get_by_id(request_id).await?;
        self.to_view(request).await
    }

    async fn to_views(&self, requests: Vec<Request>) -> AppResult<Vec<RequestView>> {
        let mut views = Vec::new();
        for request in requests {
            views.push(self.to_view(request).await?);
        }
        Ok(views)
    }

    async fn to_view(&self, request: Request) -> AppResult<RequestView> {
        let items = self.repository.items.find_by_request(request.id).await?;
        Ok(RequestView {
            id: request.id,
            description: request.description,
            created: request.created,
            items: items.into_iter().map(ItemView::from).collect(),
        })
    }
}
